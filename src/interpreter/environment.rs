use std::{cell::RefCell, collections::HashMap, mem, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::Value,
            teardown::{Garbage, release},
        },
    },
};

/// Shared handle to a frame.
///
/// Frames are reference counted because closures keep the frame they were
/// created in alive after the block that created it has finished. A closure
/// stored in its own frame forms a cycle and is never freed.
pub type Env = Rc<Scope>;

/// A single frame of the scope chain.
///
/// Each frame maps names to values and links to the frame it is nested in.
/// Lookups and assignments walk outwards; declarations always target the
/// frame itself.
#[derive(Debug, Default)]
pub struct Scope {
    parent:    Option<Env>,
    variables: RefCell<HashMap<String, Value>>,
}

impl Scope {
    /// Creates an empty root frame with no parent.
    ///
    /// Built-ins are not included; see
    /// [`seed`](crate::interpreter::evaluator::function::builtin::seed).
    #[must_use]
    pub fn root() -> Env {
        Rc::new(Self::default())
    }

    /// Creates an empty frame nested in `parent`.
    #[must_use]
    pub fn child(parent: &Env) -> Env {
        Rc::new(Self { parent:    Some(Rc::clone(parent)),
                       variables: RefCell::default(), })
    }

    /// Binds `name` in this frame.
    ///
    /// The value is stored with binding semantics (see
    /// [`Value::for_binding`]).
    ///
    /// # Errors
    /// Returns `RuntimeError::Redeclaration` if this frame already binds
    /// `name`. Names in enclosing frames may be shadowed.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::{environment::Scope, value::core::Value};
    ///
    /// let root = Scope::root();
    /// root.declare("x", &Value::Integer(1), 1).unwrap();
    /// assert!(root.declare("x", &Value::Integer(2), 2).is_err());
    ///
    /// let inner = Scope::child(&root);
    /// inner.declare("x", &Value::Integer(3), 3).unwrap();
    /// assert_eq!(root.read("x", 4).unwrap(), Value::Integer(1));
    /// ```
    pub fn declare(&self, name: &str, value: &Value, line: usize) -> EvalResult<()> {
        let mut variables = self.variables.borrow_mut();
        if variables.contains_key(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     line });
        }
        variables.insert(name.to_string(), value.for_binding());
        Ok(())
    }

    /// Returns the value bound to `name` in the nearest frame that binds it.
    ///
    /// The returned value shares storage with the binding, so in-place
    /// changes such as `s[0] = "x"` affect the variable itself.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedVariable` if no frame binds `name`.
    pub fn read(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.variables.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.read(name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Replaces the value of `name` in the nearest frame that binds it.
    ///
    /// # Errors
    /// Returns `RuntimeError::ImplicitDeclaration` if no frame binds `name`;
    /// assignment never creates variables.
    pub fn write(&self, name: &str, value: &Value, line: usize) -> EvalResult<()> {
        if let Some(slot) = self.variables.borrow_mut().get_mut(name) {
            *slot = value.for_binding();
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.write(name, value, line),
            None => Err(RuntimeError::ImplicitDeclaration { name: name.to_string(),
                                                            line }),
        }
    }

    /// Returns `true` if this frame itself binds `name`.
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    /// Unlinks the parent and moves every binding out.
    pub(crate) fn take_contents(&mut self) -> (Option<Env>, HashMap<String, Value>) {
        (self.parent.take(), mem::take(self.variables.get_mut()))
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let (parent, variables) = self.take_contents();
        if parent.is_none() && variables.is_empty() {
            return;
        }
        release(parent.map(Garbage::Scope)
                      .into_iter()
                      .chain(variables.into_values().map(Garbage::Value))
                      .collect());
    }
}
