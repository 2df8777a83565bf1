use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, ExecResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `and` / `or`.
    ///
    /// Operands are cast to `bool` and the right one is only evaluated when
    /// the left one does not decide the result. The result is always a
    /// boolean.
    pub(in crate::interpreter::evaluator) fn eval_logical_op(&mut self,
                                                             left: &Expr,
                                                             op: LogicalOperator,
                                                             right: &Expr,
                                                             env: &Env)
                                                             -> ExecResult<Value> {
        let left = self.eval(left, env)?.truthy();
        let result = match op {
            LogicalOperator::And => left && self.eval(right, env)?.truthy(),
            LogicalOperator::Or => left || self.eval(right, env)?.truthy(),
        };
        Ok(Value::Bool(result))
    }
}
