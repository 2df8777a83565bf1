use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, ExecResult, Unwind},
        value::core::Value,
    },
};

/// What a loop does after one run of its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFlow {
    /// Go on with the next iteration.
    Next,
    /// Leave the loop.
    Exit,
}

/// Interprets the outcome of a loop body.
///
/// `continue` and normal completion move on to the next iteration, `break`
/// leaves the loop, and `return` or errors propagate further.
pub fn loop_flow(outcome: ExecResult<Value>) -> ExecResult<LoopFlow> {
    match outcome {
        Ok(_) | Err(Unwind::Continue { .. }) => Ok(LoopFlow::Next),
        Err(Unwind::Break { .. }) => Ok(LoopFlow::Exit),
        Err(other) => Err(other),
    }
}

/// Fails unless exactly `expected` arguments were supplied.
///
/// # Errors
/// Returns `RuntimeError::ArityMismatch`.
pub const fn check_arity(expected: usize, found: usize, line: usize) -> EvalResult<()> {
    if expected != found {
        return Err(RuntimeError::ArityMismatch { expected,
                                                 found,
                                                 line });
    }
    Ok(())
}
