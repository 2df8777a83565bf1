use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, ExecResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a non-assigning binary operation.
    ///
    /// Both operands are evaluated left to right, then the operator is
    /// applied through [`Value::binary_op`].
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            left: &Expr,
                                                            op: BinaryOperator,
                                                            right: &Expr,
                                                            line: usize,
                                                            env: &Env)
                                                            -> ExecResult<Value> {
        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        Ok(left.binary_op(op, &right, line)?)
    }
}
