use pretty_assertions::assert_eq;
use rstest::rstest;
use tern::{
    error::LexErrorKind,
    interpreter::{
        lexer::{NumberLiteral, Token},
        value::kind::ValueKind,
    },
    tokenize,
};

fn tokens(src: &str) -> Vec<Token> {
    tokenize(src).unwrap_or_else(|e| panic!("Tokenizing {src:?} failed: {e}"))
                 .into_iter()
                 .map(|(token, _)| token)
                 .collect()
}

fn error_kind(src: &str) -> LexErrorKind {
    match tokenize(src) {
        Ok(tokens) => panic!("Tokenizing {src:?} succeeded with {tokens:?}"),
        Err(e) => e.kind,
    }
}

#[rstest]
#[case("42", 42)]
#[case("0b101", 5)]
#[case("0x1F", 31)]
#[case("0xff", 255)]
#[case("10_000", 10_000)]
#[case("0", 0)]
#[case("007", 7)]
fn integer_literals(#[case] src: &str, #[case] expected: i64) {
    assert_eq!(tokens(src), vec![Token::Number(NumberLiteral::Integer(expected))]);
}

#[rstest]
#[case("3.14", 3.14)]
#[case("2.", 2.0)]
#[case("1_000.5", 1000.5)]
fn real_literals(#[case] src: &str, #[case] expected: f64) {
    assert_eq!(tokens(src), vec![Token::Number(NumberLiteral::Real(expected))]);
}

#[test]
fn second_dot_ends_the_literal() {
    assert_eq!(tokens("1.2.3"),
               vec![Token::Number(NumberLiteral::Real(1.2)),
                    Token::Dot,
                    Token::Number(NumberLiteral::Integer(3))]);
}

#[test]
fn range_dots_are_not_part_of_the_number() {
    assert_eq!(tokens("1..10"),
               vec![Token::Number(NumberLiteral::Integer(1)),
                    Token::DotDot,
                    Token::Number(NumberLiteral::Integer(10))]);
}

#[rstest]
#[case("0b1.1", LexErrorKind::RealNotDecimal)]
#[case("0x1.8", LexErrorKind::RealNotDecimal)]
#[case("0b2", LexErrorKind::InvalidDigit { radix: 2 })]
#[case("0x", LexErrorKind::InvalidDigit { radix: 16 })]
#[case("9223372036854775808", LexErrorKind::LiteralTooLarge)]
#[case("'abc", LexErrorKind::UnterminatedString)]
#[case(r#""a\qb""#, LexErrorKind::InvalidEscape)]
#[case("!", LexErrorKind::UnexpectedCharacter)]
#[case("x @ y", LexErrorKind::UnexpectedCharacter)]
fn malformed_input(#[case] src: &str, #[case] expected: LexErrorKind) {
    assert_eq!(error_kind(src), expected);
}

#[rstest]
#[case(r"'it\'s'", "it's")]
#[case(r#""say \"hi\"""#, "say \"hi\"")]
#[case(r"'a\tb\nc\\'", "a\tb\nc\\")]
#[case(r#""'""#, "'")]
#[case("''", "")]
fn string_literals(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(tokens(src), vec![Token::String(expected.to_string())]);
}

#[test]
fn keywords_types_and_identifiers() {
    assert_eq!(tokens("let letter = not nothing and true or null;"),
               vec![Token::Let,
                    Token::Identifier("letter".to_string()),
                    Token::Assign,
                    Token::Not,
                    Token::Identifier("nothing".to_string()),
                    Token::And,
                    Token::Bool(true),
                    Token::Or,
                    Token::Null,
                    Token::Semicolon]);

    assert_eq!(tokens("nulltype bool number string table"),
               vec![Token::Type(ValueKind::Null),
                    Token::Type(ValueKind::Bool),
                    Token::Type(ValueKind::Number),
                    Token::Type(ValueKind::String),
                    Token::Type(ValueKind::Table)]);
}

#[test]
fn longest_operator_wins() {
    assert_eq!(tokens("a //= b << c >>= d <= e != f"),
               vec![Token::Identifier("a".to_string()),
                    Token::DoubleSlashAssign,
                    Token::Identifier("b".to_string()),
                    Token::ShiftLeft,
                    Token::Identifier("c".to_string()),
                    Token::ShiftRightAssign,
                    Token::Identifier("d".to_string()),
                    Token::LessEqual,
                    Token::Identifier("e".to_string()),
                    Token::NotEqual,
                    Token::Identifier("f".to_string())]);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_eq!(tokens("# heading\n  x # trailing\n\t;"),
               vec![Token::Identifier("x".to_string()), Token::Semicolon]);
}

#[test]
fn tokens_carry_their_line() {
    let tokens = tokenize("let a = 1;\n\n# note\nlet b = 'two\nlines';\nb;").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|(_, line)| *line).collect();
    assert_eq!(lines, vec![1, 1, 1, 1, 1, 4, 4, 4, 5, 5, 6, 6]);
}

#[test]
fn errors_report_line_and_slice() {
    let error = tokenize("let a = 1;\nlet b = $;").unwrap_err();
    assert_eq!(error.line, 2);
    assert_eq!(error.slice, "$");
    assert_eq!(error.to_string(), "Error on line 2: Unexpected character near '$'.");
}
