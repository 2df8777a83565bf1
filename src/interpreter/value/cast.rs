use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::{MAX_NESTING_DEPTH, Value},
            kind::ValueKind,
            table::TableRef,
        },
    },
    util::stack::ensure_sufficient_stack,
};

impl Value {
    /// Converts the value to another kind with `as`.
    ///
    /// Every kind casts to itself and to `bool`. Everything except types casts
    /// to `string`. Booleans and strings cast to `number`; strings must hold
    /// an integer, surrounding whitespace allowed. All other combinations
    /// fail.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidCast` outside the conversion matrix and
    /// `RuntimeError::InvalidNumber` for strings that are not integers.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, kind::ValueKind};
    ///
    /// let n = Value::from(" 42 ").cast(ValueKind::Number, 1).unwrap();
    /// assert_eq!(n, Value::Integer(42));
    ///
    /// let s = Value::Bool(true).cast(ValueKind::String, 1).unwrap();
    /// assert_eq!(s, Value::from("true"));
    ///
    /// assert!(Value::from("abc").cast(ValueKind::Number, 1).is_err());
    /// ```
    pub fn cast(&self, kind: ValueKind, line: usize) -> EvalResult<Self> {
        if self.kind() == kind {
            return Ok(self.clone());
        }
        match (self, kind) {
            (_, ValueKind::Bool) => Ok(Self::Bool(self.truthy())),
            (_, ValueKind::String) => self.to_display(line).map(Self::from),
            (Self::Bool(b), ValueKind::Number) => Ok(Self::Integer(i64::from(*b))),
            (Self::String(s), ValueKind::Number) => {
                let text: String = s.borrow().iter().collect();
                text.trim()
                    .parse()
                    .map(Self::Integer)
                    .map_err(|_| RuntimeError::InvalidNumber { text, line })
            },
            _ => Err(RuntimeError::InvalidCast { from: self.kind(),
                                                 to: kind,
                                                 line }),
        }
    }

    /// The value cast to `bool`.
    ///
    /// Null, `false`, zero, the empty string and the empty table are false;
    /// everything else, including functions and types, is true.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::String(s) => !s.borrow().is_empty(),
            Self::Table(t) => !t.borrow().is_empty(),
            Self::Function(_) | Self::Type(_) => true,
        }
    }

    /// The text of the value cast to `string`, as printed by `print`.
    ///
    /// Tables render as `{key: value, ...}` in insertion order, with string
    /// keys and values in single quotes. An entry holding the table itself
    /// renders as `{...}`.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidCast` for types, including types stored
    /// inside a table, and `RuntimeError::StackOverflow` for tables nested
    /// more than [`MAX_NESTING_DEPTH`] levels deep, which includes any other
    /// cycle.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, table::Table};
    ///
    /// assert_eq!(Value::Real(2.0).to_display(1).unwrap(), "2.0");
    /// assert_eq!(Value::Null.to_display(1).unwrap(), "null");
    ///
    /// let mut table = Table::new();
    /// table.insert(&Value::from("a"), &Value::Integer(1), 1).unwrap();
    /// table.insert(&Value::Integer(2), &Value::from("b"), 1).unwrap();
    /// assert_eq!(Value::from(table).to_display(1).unwrap(), "{'a': 1, 2: 'b'}");
    /// ```
    pub fn to_display(&self, line: usize) -> EvalResult<String> {
        let mut out = String::new();
        self.render(&mut out, 0, line)?;
        Ok(out)
    }

    fn render(&self, out: &mut String, depth: usize, line: usize) -> EvalResult<()> {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Integer(n) => out.push_str(&n.to_string()),
            Self::Real(r) => out.push_str(&format_real(*r)),
            Self::String(s) => out.extend(s.borrow().iter()),
            Self::Table(t) => render_table(t, out, depth, line)?,
            Self::Function(_) => out.push_str("<function>"),
            Self::Type(_) => {
                return Err(RuntimeError::InvalidCast { from: ValueKind::Type,
                                                       to: ValueKind::String,
                                                       line });
            },
        }
        Ok(())
    }
}

/// Formats a real so that it always reads as one: `2.0`, not `2`.
fn format_real(r: f64) -> String {
    if r.is_nan() {
        "nan".to_string()
    } else if r.is_infinite() {
        String::from(if r > 0.0 { "inf" } else { "-inf" })
    } else if r.abs() >= 1e16 {
        format!("{r:e}")
    } else if r.fract() == 0.0 {
        format!("{r:.1}")
    } else {
        r.to_string()
    }
}

fn render_table(table: &TableRef, out: &mut String, depth: usize, line: usize) -> EvalResult<()> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(RuntimeError::StackOverflow { depth: MAX_NESTING_DEPTH,
                                                 line });
    }

    let render_entry = |value: &Value, out: &mut String| -> EvalResult<()> {
        match value {
            Value::Table(inner) if Rc::ptr_eq(inner, table) => out.push_str("{...}"),
            Value::String(s) => {
                out.push('\'');
                out.extend(s.borrow().iter());
                out.push('\'');
            },
            other => ensure_sufficient_stack(|| other.render(out, depth + 1, line))?,
        }
        Ok(())
    };

    out.push('{');
    for (i, (key, value)) in table.borrow().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_entry(key, out)?;
        out.push_str(": ");
        render_entry(value, out)?;
    }
    out.push('}');
    Ok(())
}

impl fmt::Display for Value {
    /// Like [`Value::to_display`], but renders types by name instead of
    /// failing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(kind) => write!(f, "{kind}"),
            other => match other.to_display(0) {
                Ok(text) => write!(f, "{text}"),
                Err(_) => write!(f, "<{}>", other.kind()),
            },
        }
    }
}
