use logos::{Lexer, Logos};
use tracing::trace;

use crate::{
    error::{LexError, LexErrorKind},
    interpreter::value::kind::ValueKind,
};

/// The payload of a numeric literal token.
///
/// The lexer decides the number subkind: a literal containing a `.` is real,
/// everything else is an integer in the base selected by its prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    /// `42`, `0x1F`, `0b101`, `10_000`
    Integer(i64),
    /// `3.14`, `2.`
    Real(f64),
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `0x1F` or `10_000`.
    #[regex(r"[0-9]", lex_number)]
    Number(NumberLiteral),
    /// String literal tokens delimited by `'` or `"`.
    #[regex(r#"["']"#, lex_string)]
    String(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// A type name used as a value, such as `number` or `table`.
    #[token("nulltype", |_| ValueKind::Null)]
    #[token("bool", |_| ValueKind::Bool)]
    #[token("number", |_| ValueKind::Number)]
    #[token("string", |_| ValueKind::String)]
    #[token("table", |_| ValueKind::Table)]
    Type(ValueKind),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `let`
    #[token("let")]
    Let,
    /// `not`
    #[token("not")]
    Not,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `in`
    #[token("in")]
    In,
    /// `as`
    #[token("as")]
    As,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `..`
    #[token("..")]
    DotDot,
    /// `+`
    #[token("+")]
    Plus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-`
    #[token("-")]
    Minus,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*`
    #[token("*")]
    Star,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/`
    #[token("/")]
    Slash,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `//=`
    #[token("//=")]
    DoubleSlashAssign,
    /// `%`
    #[token("%")]
    Percent,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,
    /// `# Comments.`
    #[token("#", skip_comment)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and form feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,
}

/// State carried by the lexer between tokens.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line, starting at 1.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Converts source text into `(Token, line)` pairs.
///
/// # Errors
/// Returns a [`LexError`] for the first piece of source that is not a valid
/// token, such as a lone `!`, a malformed number literal or an unterminated
/// string.
///
/// # Example
/// ```
/// use tern::interpreter::lexer::{NumberLiteral, Token, tokenize};
///
/// let tokens = tokenize("let x = 0x1F;").unwrap();
/// assert_eq!(tokens[3], (Token::Number(NumberLiteral::Integer(31)), 1));
///
/// assert!(tokenize("0b1.1").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(kind) => {
                return Err(LexError { kind,
                                      slice: lexer.slice().to_string(),
                                      line: lexer.extras.line });
            },
        }
    }

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Scans the rest of a number literal whose first digit was just matched.
///
/// A `0b` or `0x` prefix selects base 2 or 16 and must be followed by a digit
/// of that base. Underscores are ignored. A single `.` makes the literal real;
/// a second `.`, or a `.` directly followed by another `.`, ends the literal.
fn lex_number(lex: &mut Lexer<Token>) -> Result<NumberLiteral, LexErrorKind> {
    let rest = lex.remainder().as_bytes();
    let first = lex.slice();

    let radix = match (first, rest.first()) {
        ("0", Some(b'b')) => 2,
        ("0", Some(b'x')) => 16,
        _ => 10,
    };

    let mut digits = String::new();
    let mut consumed = 0;

    if radix == 10 {
        digits.push_str(first);
    } else {
        consumed = 1;
        if !rest.get(1).is_some_and(|&b| char::from(b).is_digit(radix)) {
            lex.bump(consumed);
            return Err(LexErrorKind::InvalidDigit { radix });
        }
    }

    let mut seen_dot = false;
    while let Some(&byte) = rest.get(consumed) {
        let c = char::from(byte);
        match c {
            '_' => {},
            '.' if seen_dot || rest.get(consumed + 1) == Some(&b'.') => break,
            '.' => {
                seen_dot = true;
                digits.push(c);
            },
            c if c.is_digit(radix) => digits.push(c),
            _ => break,
        }
        consumed += 1;
    }
    lex.bump(consumed);

    if seen_dot {
        if radix != 10 {
            return Err(LexErrorKind::RealNotDecimal);
        }
        return digits.parse()
                     .map(NumberLiteral::Real)
                     .map_err(|_| LexErrorKind::UnexpectedCharacter);
    }

    i64::from_str_radix(&digits, radix).map(NumberLiteral::Integer)
                                       .map_err(|_| LexErrorKind::LiteralTooLarge)
}

/// Scans a string literal up to the quote character that opened it.
fn lex_string(lex: &mut Lexer<Token>) -> Result<String, LexErrorKind> {
    let quote = lex.slice();
    let rest = lex.remainder();

    let mut value = String::new();
    let mut newlines = 0;
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let escaped = match chars.next() {
                    Some((_, 'n')) => '\n',
                    Some((_, 't')) => '\t',
                    Some((_, '\\')) => '\\',
                    Some((_, '"')) => '"',
                    Some((_, '\'')) => '\'',
                    Some((j, other)) => {
                        lex.bump(j + other.len_utf8());
                        return Err(LexErrorKind::InvalidEscape);
                    },
                    None => break,
                };
                value.push(escaped);
            },
            c if quote.starts_with(c) => {
                lex.bump(i + c.len_utf8());
                lex.extras.line += newlines;
                return Ok(value);
            },
            c => {
                if c == '\n' {
                    newlines += 1;
                }
                value.push(c);
            },
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

fn skip_comment(lex: &mut Lexer<Token>) -> logos::Skip {
    let rest = lex.remainder();
    lex.bump(rest.find('\n').unwrap_or(rest.len()));
    logos::Skip
}
