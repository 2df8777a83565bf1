use std::iter::Peekable;

use crate::{
    ast::Block,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::{Item, parse_item},
            utils::expect,
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. A bare expression directly
/// followed by the closing `}` is the block's value.
///
/// Grammar: `block := "{" statement* expression? "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The parsed [`Block`].
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBrace, "'{'")?;

    let mut statements = Vec::new();
    let mut value = None;

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => {},
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }

        match parse_item(tokens, true)? {
            Item::Statement(statement) => statements.push(statement),
            Item::Value(expr) => value = Some(Box::new(expr)),
        }
    }

    Ok(Block { statements,
               value,
               line })
}
