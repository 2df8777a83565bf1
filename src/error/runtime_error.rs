use crate::interpreter::value::kind::ValueKind;

/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the source line of the expression or statement that
/// failed. Errors propagate unchanged to the caller of `execute`; the
/// interpreter never recovers from them on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Read or assignment of a name no enclosing frame defines.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assignment to a name that was never declared with `let`.
    #[error("Error on line {line}: Implicit variable definition is not allowed: '{name}'.")]
    ImplicitDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A second declaration of a name in the same frame.
    #[error("Error on line {line}: '{name}' is already defined in this scope.")]
    Redeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary operator applied to operand kinds it does not support.
    #[error("Error on line {line}: Operator '{op}' is not supported between {left} and {right}.")]
    UnsupportedOperation {
        /// The operator spelling.
        op:    &'static str,
        /// Kind of the left operand.
        left:  ValueKind,
        /// Kind of the right operand.
        right: ValueKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A unary operator applied to an operand kind it does not support.
    #[error("Error on line {line}: Operator '{op}' is not supported for {operand}.")]
    UnsupportedUnary {
        /// The operator spelling.
        op:      &'static str,
        /// Kind of the operand.
        operand: ValueKind,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A cast outside the conversion matrix.
    #[error("Error on line {line}: Can't cast {from} to {to}.")]
    InvalidCast {
        /// Kind of the value being cast.
        from: ValueKind,
        /// Requested kind.
        to:   ValueKind,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Property access that the value kind does not provide.
    #[error("Error on line {line}: {kind} has no property '{name}'.")]
    NoSuchProperty {
        /// Kind of the accessed value.
        kind: ValueKind,
        /// The property name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call on a value that is neither a function nor a type.
    #[error("Error on line {line}: {kind} is not callable.")]
    NotCallable {
        /// Kind of the called value.
        kind: ValueKind,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Expected {expected} arguments, got {found}.")]
    ArityMismatch {
        /// The declared parameter count.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A string index outside `0..length`.
    #[error("Error on line {line}: Index {index} is out of bounds for length {length}.")]
    IndexOutOfBounds {
        /// The requested index.
        index:  i64,
        /// The length of the indexed string.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A table was used as a table key.
    #[error("Error on line {line}: Tables cannot be used as table keys.")]
    UnhashableKey {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `return`, `break` or `continue` escaped the construct that handles it.
    #[error("Error on line {line}: Uncaught '{keyword}'.")]
    UncaughtControlFlow {
        /// The keyword that escaped.
        keyword: &'static str,
        /// The source line of the escaping statement.
        line:    usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer cannot be converted to a real without losing precision.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string could not be read as a number.
    #[error("Error on line {line}: '{text}' is not a valid number.")]
    InvalidNumber {
        /// The string contents.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was of the wrong kind or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A malformed `format` pattern.
    #[error("Error on line {line}: Invalid format pattern: {details}.")]
    InvalidFormat {
        /// Details about the malformed pattern.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Assignment through `.` is not supported.
    #[error("Error on line {line}: Cannot assign to property '{name}'.")]
    PropertyAssignment {
        /// The property name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of an assignment is not a variable, property or
    /// subscript.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Too many nested function calls, or a table nested too deeply to be
    /// compared or rendered.
    #[error("Error on line {line}: Stack overflow: nesting deeper than {depth} levels.")]
    StackOverflow {
        /// The limit that was exceeded.
        depth: usize,
        /// The source line of the call or operation that exceeded it.
        line:  usize,
    },
    /// Reading from or writing to the host streams failed.
    #[error("Error on line {line}: I/O error: {details}.")]
    Io {
        /// The underlying error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::ImplicitDeclaration { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::UnsupportedOperation { line, .. }
            | Self::UnsupportedUnary { line, .. }
            | Self::InvalidCast { line, .. }
            | Self::NoSuchProperty { line, .. }
            | Self::NotCallable { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::UnhashableKey { line }
            | Self::UncaughtControlFlow { line, .. }
            | Self::DivisionByZero { line }
            | Self::Overflow { line }
            | Self::LiteralTooLarge { line }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidArgument { line, .. }
            | Self::InvalidFormat { line, .. }
            | Self::PropertyAssignment { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::StackOverflow { line, .. }
            | Self::Io { line, .. } => *line,
        }
    }
}
