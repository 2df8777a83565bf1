use crate::{
    ast::{Expr, ForLoop},
    error::RuntimeError,
    interpreter::{
        environment::{Env, Scope},
        evaluator::{
            core::{Context, ExecResult},
            utils::{LoopFlow, loop_flow},
        },
        value::core::Value,
    },
};

impl Context {
    /// Executes a counting `for` loop.
    ///
    /// The loop runs in its own frame. The start bound is evaluated once and
    /// copied into a private counter; the end bound is evaluated again for
    /// every check. While the counter is at least 1 away from the end, the
    /// counter is assigned to the target, the body runs, and the counter
    /// steps by +1 if the end is above it or -1 otherwise. Changing the loop
    /// variable inside the body therefore does not change the iteration.
    ///
    /// ```text
    /// for let i in 0 .. 3 { }   # i = 0, 1, 2
    /// for let i in 3 .. 0 { }   # i = 3, 2, 1
    /// ```
    pub(in crate::interpreter::evaluator) fn exec_for(&mut self,
                                                      for_loop: &ForLoop,
                                                      env: &Env)
                                                      -> ExecResult<()> {
        let ForLoop { target,
                      declare,
                      start,
                      end,
                      body,
                      line, } = for_loop;
        let line = *line;
        let frame = Scope::child(env);

        let mut counter = self.eval(start, &frame)?;
        match (declare, target) {
            (true, Expr::Variable { name, .. }) => frame.declare(name, &counter, line)?,
            (true, _) => return Err(RuntimeError::InvalidAssignmentTarget { line }.into()),
            (false, _) => self.assign(target, &counter, line, &frame)?,
        }

        loop {
            let bound = self.eval(end, &frame)?;
            if counter.sub(&bound, line)?.magnitude(line)? < 1.0 {
                break;
            }

            self.assign(target, &counter, line, &frame)?;
            if let LoopFlow::Exit = loop_flow(self.eval_block(body, &frame))? {
                break;
            }

            let bound = self.eval(end, &frame)?;
            let step = if bound.greater(&counter, line)? { 1 } else { -1 };
            counter = counter.add(&Value::Integer(step), line)?;
        }

        Ok(())
    }
}
