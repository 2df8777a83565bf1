use std::fmt::Display;

/// The closed set of runtime value kinds.
///
/// Every [`Value`](crate::interpreter::value::core::Value) has exactly one
/// kind, fixed when it is constructed. Kinds are also values themselves: the
/// type names `number`, `string`, ... evaluate to `Value::Type(kind)` and can
/// be used as cast targets or called to produce a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `nulltype`
    Null,
    /// `bool`
    Bool,
    /// `number`, covering both integers and reals.
    Number,
    /// `string`
    String,
    /// `table`
    Table,
    /// Functions, both user-defined and built-in.
    Function,
    /// Types themselves.
    Type,
}

/// How a value of some kind behaves when it is bound to a name, a parameter
/// or a table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindPolicy {
    /// The binding receives an independent deep copy.
    Copy,
    /// The binding refers to the same underlying storage.
    Share,
}

impl ValueKind {
    /// Returns the binding policy of this kind.
    ///
    /// Null, booleans, numbers, strings and types are copied; tables and
    /// functions are shared.
    ///
    /// # Example
    /// ```
    /// use tern::interpreter::value::kind::{BindPolicy, ValueKind};
    ///
    /// assert_eq!(ValueKind::String.bind_policy(), BindPolicy::Copy);
    /// assert_eq!(ValueKind::Table.bind_policy(), BindPolicy::Share);
    /// ```
    #[must_use]
    pub const fn bind_policy(self) -> BindPolicy {
        match self {
            Self::Null | Self::Bool | Self::Number | Self::String | Self::Type => BindPolicy::Copy,
            Self::Table | Self::Function => BindPolicy::Share,
        }
    }

    /// The name the kind has in source code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "nulltype",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Table => "table",
            Self::Function => "function",
            Self::Type => "type",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
