use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, ExecResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation.
    ///
    /// `-` negates numbers; `not` casts its operand to `bool` and negates it,
    /// so it accepts every kind.
    pub(in crate::interpreter::evaluator) fn eval_unary_op(&mut self,
                                                           op: UnaryOperator,
                                                           expr: &Expr,
                                                           line: usize,
                                                           env: &Env)
                                                           -> ExecResult<Value> {
        let value = self.eval(expr, env)?;
        match op {
            UnaryOperator::Negate => Ok(value.negate(line)?),
            UnaryOperator::Not => Ok(Value::Bool(!value.truthy())),
        }
    }
}
