use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::{Env, Scope},
        evaluator::{
            core::{Context, EvalResult, ExecResult, Unwind},
            utils::check_arity,
        },
        value::{
            core::Value,
            function::{Closure, Function},
        },
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       line: usize,
                                                       env: &Env)
                                                       -> ExecResult<Value> {
        let callee = self.eval(callee, env)?;
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument, env)?);
        }
        Ok(self.call(&callee, &args, line)?)
    }

    /// Calls a function or type value with already evaluated arguments.
    ///
    /// Calling a type with no arguments produces its default value.
    ///
    /// # Errors
    /// - `RuntimeError::ArityMismatch` if the argument count is wrong.
    /// - `RuntimeError::NotCallable` for values that are neither functions nor
    ///   constructible types.
    /// - `RuntimeError::StackOverflow` past the call depth limit.
    /// - Any error raised by the function body.
    pub fn call(&mut self, callee: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
        match callee {
            Value::Function(Function::Native(native)) => {
                check_arity(native.arity, args.len(), line)?;
                native.invoke(args, line)
            },
            Value::Function(Function::User(closure)) => self.call_closure(closure, args, line),
            Value::Type(kind) => {
                check_arity(0, args.len(), line)?;
                Value::default_of(*kind, line)
            },
            other => Err(RuntimeError::NotCallable { kind: other.kind(),
                                                     line }),
        }
    }

    /// Runs a user function in a new frame whose parent is the frame the
    /// function was created in.
    ///
    /// Parameters are declared in that frame, followed by the function's own
    /// name unless a parameter already uses it, so named functions can
    /// recurse even when they are anonymous at the call site.
    fn call_closure(&mut self, closure: &Rc<Closure>, args: &[Value], line: usize) -> EvalResult<Value> {
        let def = &closure.def;
        check_arity(def.params.len(), args.len(), line)?;

        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow { depth: self.max_call_depth,
                                                     line });
        }

        let frame = Scope::child(&closure.env);
        for (param, arg) in def.params.iter().zip(args) {
            frame.declare(param, arg, line)?;
        }
        if let Some(name) = &def.name
           && !frame.binds(name)
        {
            frame.declare(name, &Value::Function(Function::User(Rc::clone(closure))), line)?;
        }

        debug!(name = def.name.as_deref().unwrap_or("<anonymous>"),
               arity = def.params.len(),
               depth = self.call_depth,
               "calling function");

        self.call_depth += 1;
        let outcome = self.eval_block(&def.body, &frame);
        self.call_depth -= 1;

        match outcome {
            Ok(value) | Err(Unwind::Return { value, .. }) => Ok(value),
            Err(signal) => Err(signal.into_error()),
        }
    }
}
