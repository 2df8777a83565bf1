use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{environment::Env, evaluator::core::EvalResult, value::core::Value},
};

/// Signature of functions implemented in Rust.
///
/// Receives the already evaluated arguments and the line of the call.
pub type NativeFn = dyn Fn(&[Value], usize) -> EvalResult<Value>;

/// Signature of methods implemented in Rust. The first argument is the
/// receiver the method was read from.
pub type MethodFn = fn(&Value, &[Value], usize) -> EvalResult<Value>;

/// A function value.
///
/// Cloning a `Function` clones the handle, never the function: all copies
/// share the definition and, for closures, the captured frame.
#[derive(Clone)]
pub enum Function {
    /// A function written in the language itself.
    User(Rc<Closure>),
    /// A built-in or a bound method implemented in Rust.
    Native(Rc<NativeFunction>),
}

/// A user function together with the frame it was created in.
pub struct Closure {
    /// The shared definition; its address is the function's identity.
    pub def: Rc<FunctionDef>,
    /// The frame that was active when the function literal was evaluated.
    pub env: Env,
}

/// A function implemented in Rust with a fixed number of parameters.
pub struct NativeFunction {
    /// Name used in diagnostics.
    pub name:  String,
    /// Exact number of arguments accepted.
    pub arity: usize,
    /// The implementation.
    pub body:  NativeBody,
}

/// The implementation of a [`NativeFunction`].
pub enum NativeBody {
    /// A free function such as `print`.
    Free(Box<NativeFn>),
    /// A method bound to the value it was read from, such as `t.remove`.
    Method {
        /// The value the method operates on.
        receiver: Value,
        /// The implementation.
        body:     MethodFn,
    },
}

impl NativeFunction {
    /// Runs the function with already checked arguments.
    ///
    /// # Errors
    /// Whatever the implementation fails with.
    pub fn invoke(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        match &self.body {
            NativeBody::Free(body) => body(args, line),
            NativeBody::Method { receiver, body } => body(receiver, args, line),
        }
    }
}

impl Function {
    /// Creates a native function value.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, function::Function};
    ///
    /// let double = Function::native("double", 1, |args, line| args[0].mul(&args[0], line));
    /// assert_eq!(double.arity(), 1);
    /// ```
    pub fn native(name: &str,
                  arity: usize,
                  body: impl Fn(&[Value], usize) -> EvalResult<Value> + 'static)
                  -> Self {
        Self::Native(Rc::new(NativeFunction { name: name.to_string(),
                                              arity,
                                              body: NativeBody::Free(Box::new(body)) }))
    }

    /// Creates a method bound to `receiver`.
    ///
    /// The receiver is shared with the value it came from, so the method sees
    /// later changes to it.
    #[must_use]
    pub fn method(name: &str, arity: usize, receiver: &Value, body: MethodFn) -> Self {
        Self::Native(Rc::new(NativeFunction { name: name.to_string(),
                                              arity,
                                              body: NativeBody::Method { receiver: receiver.clone(),
                                                                         body } }))
    }

    /// Creates a closure over `env` from a parsed definition.
    #[must_use]
    pub fn closure(def: &Rc<FunctionDef>, env: &Env) -> Self {
        Self::User(Rc::new(Closure { def: Rc::clone(def),
                                     env: Rc::clone(env), }))
    }

    /// The number of arguments the function must be called with.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::User(closure) => closure.def.params.len(),
            Self::Native(native) => native.arity,
        }
    }

    /// The function's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::User(closure) => closure.def.name.as_deref(),
            Self::Native(native) => Some(&native.name),
        }
    }

    /// Function equality: same arity and same body.
    ///
    /// Two closures created from the same literal are equal even if they
    /// captured different frames. Native functions are equal only to
    /// themselves.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::User(a), Self::User(b)) => {
                a.def.params.len() == b.def.params.len() && Rc::ptr_eq(&a.def, &b.def)
            },
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// An address identifying the function body, consistent with
    /// [`Function::same_as`].
    #[must_use]
    pub fn identity(&self) -> usize {
        match self {
            Self::User(closure) => Rc::as_ptr(&closure.def).addr(),
            Self::Native(native) => Rc::as_ptr(native).addr(),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(closure) => {
                write!(f,
                       "<function {}/{}>",
                       closure.def.name.as_deref().unwrap_or("anonymous"),
                       closure.def.params.len())
            },
            Self::Native(native) => write!(f, "<native {}/{}>", native.name, native.arity),
        }
    }
}
