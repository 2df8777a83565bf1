/// The reason a piece of source text could not be turned into a token.
///
/// This is the error type the lexer is generated with, so it must be
/// `Default`: unmatched input maps to [`LexErrorKind::UnexpectedCharacter`].
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
pub enum LexErrorKind {
    /// No token starts with this character (including a lone `!`).
    #[default]
    #[error("Unexpected character")]
    UnexpectedCharacter,
    /// A `0b`/`0x` prefix was not followed by a digit of that base.
    #[error("Expected a base {radix} digit")]
    InvalidDigit {
        /// The base selected by the prefix.
        radix: u32,
    },
    /// A literal with a fractional part used a non-decimal prefix.
    #[error("Real literals must be decimal")]
    RealNotDecimal,
    /// An integer literal does not fit into 64 bits.
    #[error("Literal is too large")]
    LiteralTooLarge,
    /// The input ended before the closing quote.
    #[error("Unterminated string literal")]
    UnterminatedString,
    /// A backslash was followed by a character with no escape meaning.
    #[error("Invalid escape sequence")]
    InvalidEscape,
}

/// A lexical error, positioned at the offending slice of source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error on line {line}: {kind} near '{slice}'.")]
pub struct LexError {
    /// What went wrong.
    pub kind:  LexErrorKind,
    /// The source text the lexer was looking at.
    pub slice: String,
    /// The source line where the error occurred.
    pub line:  usize,
}
