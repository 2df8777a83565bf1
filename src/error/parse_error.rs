/// Represents all errors that can occur while building the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Encountered a token that cannot start or continue the current
    /// construct.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// A description of the token found.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A specific token was required but another one was found.
    #[error("Error on line {line}: Expected {expected}, found {found}.")]
    Expected {
        /// What the parser was looking for.
        expected: &'static str,
        /// A description of the token found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The token stream ended in the middle of a construct.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The line of the last token read.
        line: usize,
    },
    /// A function without a name appeared where only a declaration makes
    /// sense.
    #[error("Error on line {line}: Anonymous function used as a statement.")]
    AnonymousFunctionStatement {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The target of a `for` loop cannot be assigned to, or `for let` was
    /// not followed by a plain name.
    #[error("Error on line {line}: Invalid for loop variable.")]
    InvalidLoopTarget {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Replaces the placeholder line of an end-of-input error with the line of
    /// the last token in the stream.
    #[must_use]
    pub fn at_end(self, last_line: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput { line: 0 } => Self::UnexpectedEndOfInput { line: last_line },
            other => other,
        }
    }
}
