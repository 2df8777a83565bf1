use std::{iter::Peekable, rc::Rc};

use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            block::parse_block,
            statement::parse_statement,
            unary::block_of,
            utils::{consume_if, expect, parse_comma_separated, parse_identifier},
        },
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// All tokens must be consumed; anything left over that does not form a
/// statement is an error. An unexpected end of input is reported on the line
/// of the last token.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use tern::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("let x = 1; x += 2;").unwrap();
/// assert_eq!(parse(&tokens).unwrap().len(), 2);
///
/// let tokens = tokenize("let x = ").unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Vec<Statement>> {
    let last_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        let statement = parse_statement(&mut iter).map_err(|e| e.at_end(last_line))?;
        trace!(?statement, "parsed statement");
        statements.push(statement);
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := logical_or ("=" expression)?`
///
/// Assignment is right-associative, so `a = b = 1` assigns `1` to `b` and
/// then to `a`. Whether the left side can be assigned to is decided when the
/// assignment runs.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| {
        let left = parse_logical_or(tokens)?;

        if let Some((Token::Assign, line)) = tokens.peek() {
            tokens.next();
            let right = parse_expression(tokens)?;
            return Ok(Expr::BinaryOp { left: Box::new(left),
                                       op: BinaryOperator::Assign,
                                       right: Box::new(right),
                                       line: *line });
        }

        Ok(left)
    })
}

/// Parses an expression that starts with a block: `if`, `{ ... }` or
/// `function`.
///
/// In statement position these forms end at their closing brace and do not
/// continue into binary operators.
pub fn parse_expression_with_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, line)) => {
            tokens.next();
            parse_if(tokens, *line)
        },
        Some((Token::LBrace, _)) => Ok(Expr::Block(parse_block(tokens)?)),
        Some((Token::Function, _)) => Ok(Expr::Function(Rc::new(parse_function(tokens)?))),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses an `if` expression with an optional `else`.
///
/// Syntax:
/// ```text
///     if <condition> { ... }
///     else if <condition> { ... }
///     else { ... }
/// ```
/// An `else if` is parsed as an `else` block holding the nested `if` as its
/// value.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;
    let then_branch = parse_block(tokens)?;

    let else_branch = if consume_if(tokens, &Token::Else) {
        match tokens.peek() {
            Some((Token::If, else_line)) => {
                tokens.next();
                Some(block_of(parse_if(tokens, *else_line)?))
            },
            _ => Some(parse_block(tokens)?),
        }
    } else {
        None
    };

    Ok(Expr::IfExpr { condition: Box::new(condition),
                      then_branch,
                      else_branch,
                      line })
}

/// Parses `function [name] ( params ) { body }`.
///
/// The stream must be positioned at the `function` keyword.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Function, "'function'")?;

    let name = match tokens.peek() {
        Some((Token::Identifier(_), _)) => Some(parse_identifier(tokens)?),
        _ => None,
    };

    expect(tokens, &Token::LParen, "'('")?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(FunctionDef { name,
                     params,
                     body,
                     line })
}
