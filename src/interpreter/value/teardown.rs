use std::rc::Rc;

use crate::interpreter::{
    environment::Env,
    value::{
        core::Value,
        function::{Function, NativeBody},
    },
};

/// Something whose last handle may be going away.
pub(crate) enum Garbage {
    /// A value taken out of a table, a frame or a bound method.
    Value(Value),
    /// A frame captured by a closure or linked as a parent.
    Scope(Env),
}

/// Drops `pending` without recursing into nested tables, closures, methods
/// and frames.
///
/// Anything held only by the item being dropped is emptied into the worklist
/// first, so its own `Drop` finds nothing left to release. Values still
/// shared elsewhere are only decremented.
pub(crate) fn release(mut pending: Vec<Garbage>) {
    while let Some(item) = pending.pop() {
        match item {
            Garbage::Value(Value::Table(mut table)) => {
                if let Some(table) = Rc::get_mut(&mut table) {
                    let entries = table.get_mut().take_entries();
                    pending.extend(entries.into_iter()
                                          .flat_map(|(key, value)| [key, value])
                                          .map(Garbage::Value));
                }
            },
            Garbage::Value(Value::Function(Function::User(closure))) => {
                if let Ok(closure) = Rc::try_unwrap(closure) {
                    pending.push(Garbage::Scope(closure.env));
                }
            },
            Garbage::Value(Value::Function(Function::Native(native))) => {
                if let Ok(native) = Rc::try_unwrap(native)
                   && let NativeBody::Method { receiver, .. } = native.body
                {
                    pending.push(Garbage::Value(receiver));
                }
            },
            Garbage::Scope(mut scope) => {
                if let Some(scope) = Rc::get_mut(&mut scope) {
                    let (parent, variables) = scope.take_contents();
                    pending.extend(parent.map(Garbage::Scope));
                    pending.extend(variables.into_values().map(Garbage::Value));
                }
            },
            Garbage::Value(_) => {},
        }
    }
}
