use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::{StringRef, Value},
            function::Function,
            table::TableRef,
        },
    },
    util::num::{checked_index, usize_to_i64_checked},
};

impl Value {
    /// Reads the property `name`.
    ///
    /// Strings provide `length()` and `format(table)`; tables provide
    /// `length()`, `clear()` and `remove(key)`. Methods are returned as
    /// functions bound to the receiver.
    ///
    /// # Errors
    /// Returns `RuntimeError::NoSuchProperty` for any other name or kind.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, function::Function};
    ///
    /// let Value::Function(Function::Native(length)) = Value::from("abc").dot("length", 1).unwrap()
    /// else {
    ///     unreachable!()
    /// };
    /// assert_eq!(length.invoke(&[], 1).unwrap(), Value::Integer(3));
    /// ```
    pub fn dot(&self, name: &str, line: usize) -> EvalResult<Self> {
        let method = match (self, name) {
            (Self::String(_), "length") => {
                Function::method("length", 0, self, |receiver, _, line| {
                    usize_to_i64_checked(receiver.as_string(line)?.borrow().len(), line).map(Self::Integer)
                })
            },
            (Self::String(_), "format") => {
                Function::method("format", 1, self, |receiver, args, line| {
                    format_string(receiver.as_string(line)?, args[0].as_table(line)?, line).map(Self::from)
                })
            },
            (Self::Table(_), "length") => {
                Function::method("length", 0, self, |receiver, _, line| {
                    usize_to_i64_checked(receiver.as_table(line)?.borrow().len(), line).map(Self::Integer)
                })
            },
            (Self::Table(_), "clear") => {
                Function::method("clear", 0, self, |receiver, _, line| {
                    receiver.as_table(line)?.borrow_mut().clear();
                    Ok(Self::Null)
                })
            },
            (Self::Table(_), "remove") => {
                Function::method("remove", 1, self, |receiver, args, line| {
                    Ok(receiver.as_table(line)?
                               .borrow_mut()
                               .remove(&args[0], line)?
                               .unwrap_or(Self::Null))
                })
            },
            _ => {
                return Err(RuntimeError::NoSuchProperty { kind: self.kind(),
                                                          name: name.to_string(),
                                                          line });
            },
        };
        Ok(Self::Function(method))
    }

    /// Reads `self[index]`.
    ///
    /// A string index must be an integer in `0..length` and yields a
    /// one-character string. A table lookup yields the stored value, or null
    /// for a missing key.
    ///
    /// # Errors
    /// Fails for out-of-range or non-integer string indices, table keys, and
    /// kinds that cannot be indexed.
    pub fn subscript(&self, index: &Self, line: usize) -> EvalResult<Self> {
        match self {
            Self::String(s) => {
                let chars = s.borrow();
                let i = string_index(index, chars.len(), line)?;
                Ok(Self::from(vec![chars[i]]))
            },
            Self::Table(t) => Ok(t.borrow().get(index, line)?.unwrap_or(Self::Null)),
            _ => Err(self.unsupported("[]", index, line)),
        }
    }

    /// Performs `self[index] = value` in place.
    ///
    /// For strings, `value` must be a string of at most one character: a
    /// single character replaces the one at `index`, the empty string deletes
    /// it. For tables the entry is inserted or replaced.
    ///
    /// # Errors
    /// Fails like [`Value::subscript`], and for string replacements that are
    /// not strings of at most one character.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::core::Value;
    ///
    /// let s = Value::from("cat");
    /// s.subscript_assign(&Value::Integer(0), &Value::from("b"), 1).unwrap();
    /// assert_eq!(s, Value::from("bat"));
    ///
    /// s.subscript_assign(&Value::Integer(2), &Value::from(""), 1).unwrap();
    /// assert_eq!(s, Value::from("ba"));
    /// ```
    pub fn subscript_assign(&self, index: &Self, value: &Self, line: usize) -> EvalResult<()> {
        match self {
            Self::String(s) => {
                let replacement = match value {
                    Self::String(v) => v.borrow().clone(),
                    other => {
                        return Err(RuntimeError::InvalidArgument { details: format!("cannot store {} in a string",
                                                                                   other.kind()),
                                                                   line });
                    },
                };
                let mut chars = s.borrow_mut();
                let i = string_index(index, chars.len(), line)?;
                match replacement.as_slice() {
                    [] => {
                        chars.remove(i);
                    },
                    [c] => chars[i] = *c,
                    _ => {
                        return Err(RuntimeError::InvalidArgument { details: "expected a single character".to_string(),
                                                                   line });
                    },
                }
                Ok(())
            },
            Self::Table(t) => t.borrow_mut().insert(index, value, line),
            _ => Err(self.unsupported("[]=", index, line)),
        }
    }
}

fn string_index(index: &Value, length: usize, line: usize) -> EvalResult<usize> {
    match index {
        Value::Integer(i) => checked_index(*i, length, line),
        other => Err(RuntimeError::InvalidArgument { details: format!("string index must be an integer, found {}",
                                                                     other.kind()),
                                                     line }),
    }
}

/// Replaces every `{name}` in `pattern` with `table[name] as string`.
///
/// Missing names format as `null`. A `{` without a matching `}`, a nested
/// `{` and a lone `}` are errors.
fn format_string(pattern: &StringRef, table: &TableRef, line: usize) -> EvalResult<String> {
    let pattern = pattern.borrow().clone();
    let mut output = String::new();
    let mut chars = pattern.into_iter();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(RuntimeError::InvalidFormat { details: "unclosed '{'".to_string(),
                                                                     line });
                        },
                        Some(c) => name.push(c),
                    }
                }
                let value = table.borrow()
                                 .get(&Value::from(name), line)?
                                 .unwrap_or(Value::Null);
                output.push_str(&value.to_display(line)?);
            },
            '}' => {
                return Err(RuntimeError::InvalidFormat { details: "unmatched '}'".to_string(),
                                                         line });
            },
            c => output.push(c),
        }
    }

    Ok(output)
}
