use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::core::{Context, ExecResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `target = value` and the compound forms such as `+=`.
    ///
    /// The right side is evaluated first. A compound assignment then reads
    /// the target's current value and applies the base operator. The
    /// expression's value is the value assigned.
    pub(in crate::interpreter::evaluator) fn eval_assignment(&mut self,
                                                             target: &Expr,
                                                             op: BinaryOperator,
                                                             value: &Expr,
                                                             line: usize,
                                                             env: &Env)
                                                             -> ExecResult<Value> {
        let rhs = self.eval(value, env)?;

        if let Expr::Dot { name, .. } = target {
            return Err(RuntimeError::PropertyAssignment { name: name.clone(),
                                                          line }.into());
        }

        if let Expr::Subscript { object, index, .. } = target {
            let container = self.eval(object, env)?;
            let key = self.eval(index, env)?;
            let value = match op.compound_base() {
                Some(base) => container.subscript(&key, line)?.binary_op(base, &rhs, line)?,
                None => rhs,
            };
            container.subscript_assign(&key, &value, line)?;
            return Ok(value);
        }

        let value = match op.compound_base() {
            Some(base) => self.eval(target, env)?.binary_op(base, &rhs, line)?,
            None => rhs,
        };
        self.assign(target, &value, line, env)?;
        Ok(value)
    }

    /// Stores `value` into an assignable expression.
    ///
    /// Variables are written through the frame chain, subscripts through the
    /// container's `subscript_assign`. Properties cannot be assigned.
    pub(in crate::interpreter::evaluator) fn assign(&mut self,
                                                    target: &Expr,
                                                    value: &Value,
                                                    line: usize,
                                                    env: &Env)
                                                    -> ExecResult<()> {
        match target {
            Expr::Variable { name, .. } => env.write(name, value, line)?,
            Expr::Subscript { object, index, .. } => {
                let container = self.eval(object, env)?;
                let key = self.eval(index, env)?;
                container.subscript_assign(&key, value, line)?;
            },
            Expr::Dot { name, .. } => {
                return Err(RuntimeError::PropertyAssignment { name: name.clone(),
                                                              line }.into());
            },
            _ => return Err(RuntimeError::InvalidAssignmentTarget { line }.into()),
        }
        Ok(())
    }
}
