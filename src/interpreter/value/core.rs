use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            function::Function,
            kind::{BindPolicy, ValueKind},
            table::{Table, TableRef},
        },
    },
};

/// How many tables deep equality and rendering descend before giving up
/// with `RuntimeError::StackOverflow`.
pub const MAX_NESTING_DEPTH: usize = 10_000;

/// Shared, mutable character buffer backing a string value.
///
/// Strings can be changed in place through index assignment (`s[0] = "x"`),
/// so the buffer sits behind a `RefCell`. Binding a string to a name copies
/// the buffer; reading a name hands out the buffer it owns.
pub type StringRef = Rc<RefCell<Vec<char>>>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values that can appear in expressions,
/// assignments, function returns, and conditions. The set is closed: every
/// operation matches on it exhaustively and fails with a `RuntimeError` for
/// kinds it does not support.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value. Produced by `null`, empty blocks and missing
    /// table entries.
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A real value (double precision floating-point).
    Real(f64),
    /// A mutable string.
    String(StringRef),
    /// A table, shared between every binding that holds it.
    Table(TableRef),
    /// A function, shared between every binding that holds it.
    Function(Function),
    /// A reified value kind, e.g. the value of the expression `number`.
    Type(ValueKind),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::new(RefCell::new(v.chars().collect())))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::from(v.as_str())
    }
}

impl From<Vec<char>> for Value {
    fn from(v: Vec<char>) -> Self {
        Self::String(Rc::new(RefCell::new(v)))
    }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self {
        Self::Table(v.into_ref())
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(v)
    }
}

impl From<ValueKind> for Value {
    fn from(v: ValueKind) -> Self {
        Self::Type(v)
    }
}

impl From<&LiteralValue> for Value {
    /// Creates a fresh runtime value for a literal. String literals get a new
    /// buffer every time they are evaluated.
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Null => Self::Null,
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::String(s) => Self::from(s.as_str()),
            LiteralValue::Type(kind) => Self::Type(*kind),
        }
    }
}

impl Value {
    /// Returns the kind of the value.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, kind::ValueKind};
    ///
    /// assert_eq!(Value::Integer(1).kind(), ValueKind::Number);
    /// assert_eq!(Value::Real(1.5).kind(), ValueKind::Number);
    /// assert_eq!(Value::from("a").kind(), ValueKind::String);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) | Self::Real(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Table(_) => ValueKind::Table,
            Self::Function(_) => ValueKind::Function,
            Self::Type(_) => ValueKind::Type,
        }
    }

    /// Returns the value to store when `self` is bound to a name, a
    /// parameter or a table slot.
    ///
    /// Kinds with [`BindPolicy::Copy`] are deep-copied, so later in-place
    /// changes to one binding are not visible through the other. Kinds with
    /// [`BindPolicy::Share`] return another handle to the same storage.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::{core::Value, table::Table};
    ///
    /// let s = Value::from("abc");
    /// let (Value::String(a), Value::String(b)) = (&s, &s.for_binding()) else { unreachable!() };
    /// assert!(!std::rc::Rc::ptr_eq(a, b));
    ///
    /// let t = Value::from(Table::new());
    /// let (Value::Table(a), Value::Table(b)) = (&t, &t.for_binding()) else { unreachable!() };
    /// assert!(std::rc::Rc::ptr_eq(a, b));
    /// ```
    #[must_use]
    pub fn for_binding(&self) -> Self {
        match self.kind().bind_policy() {
            BindPolicy::Share => self.clone(),
            BindPolicy::Copy => match self {
                Self::String(s) => Self::from(s.borrow().clone()),
                other => other.clone(),
            },
        }
    }

    /// Produces the value obtained by calling a type with no arguments.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnsupportedOperation` for the function and type
    /// kinds, which cannot be constructed.
    pub fn default_of(kind: ValueKind, line: usize) -> EvalResult<Self> {
        Ok(match kind {
            ValueKind::Null => Self::Null,
            ValueKind::Bool => Self::Bool(false),
            ValueKind::Number => Self::Integer(0),
            ValueKind::String => Self::from(""),
            ValueKind::Table => Self::from(Table::new()),
            ValueKind::Function | ValueKind::Type => {
                return Err(RuntimeError::UnsupportedOperation { op: "()",
                                                                left: ValueKind::Type,
                                                                right: kind,
                                                                line });
            },
        })
    }

    /// Returns the buffer behind a string value.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidArgument` for any other kind.
    pub fn as_string(&self, line: usize) -> EvalResult<&StringRef> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(RuntimeError::InvalidArgument { details: format!("expected string, found {}",
                                                                         other.kind()),
                                                         line }),
        }
    }

    /// Returns the table behind a table value.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidArgument` for any other kind.
    pub fn as_table(&self, line: usize) -> EvalResult<&TableRef> {
        match self {
            Self::Table(t) => Ok(t),
            other => Err(RuntimeError::InvalidArgument { details: format!("expected table, found {}",
                                                                         other.kind()),
                                                         line }),
        }
    }
}

impl PartialEq for Value {
    /// Language equality, as computed by `==`. Tables too deeply nested to
    /// compare are unequal.
    fn eq(&self, other: &Self) -> bool {
        matches!(self.equals(other, 0), Ok(true))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Integer(n) => write!(f, "Integer({n})"),
            Self::Real(r) => write!(f, "Real({r:?})"),
            Self::String(s) => write!(f, "String({:?})", s.borrow().iter().collect::<String>()),
            Self::Table(t) => write!(f, "Table(len = {})", t.borrow().len()),
            Self::Function(func) => write!(f, "Function({func:?})"),
            Self::Type(kind) => write!(f, "Type({kind})"),
        }
    }
}
