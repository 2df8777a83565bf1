use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, ForLoop, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, parse_expression_with_block, parse_function},
            unary::parse_path,
            utils::{consume_if, expect, next_is, parse_identifier},
        },
    },
};

/// One element of a statement list.
///
/// Inside a block, the last element may be a bare expression that gives the
/// block its value.
pub(in crate::interpreter::parser) enum Item {
    /// An ordinary statement.
    Statement(Statement),
    /// A trailing expression directly followed by `}`.
    Value(Expr),
}

/// Parses a single top-level statement.
///
/// Top-level statements have no trailing value, so every expression statement
/// not led by `if`, `{` or `function` must end with `;`.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match parse_item(tokens, false)? {
        Item::Statement(statement) => Ok(statement),
        Item::Value(expr) => {
            let line = expr.line_number();
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses a statement, or a block's trailing expression when `in_block` is
/// set and the expression is directly followed by `}`.
///
/// Grammar:
/// ```text
/// statement := "let" identifier ("=" expression)? ";"
///            | "while" expression block
///            | "for" "let"? path "in" expression ".." expression block
///            | "return" expression? ";"
///            | "break" ";" | "continue" ";"
///            | "function" identifier "(" params ")" block ";"?
///            | ";"
///            | expression_with_block ";"?
///            | expression ";"
/// ```
pub(in crate::interpreter::parser) fn parse_item<'a, I>(tokens: &mut Peekable<I>,
                                                        in_block: bool)
                                                        -> ParseResult<Item>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let statement = match token {
        Token::Let => parse_let(tokens, line)?,
        Token::While => {
            tokens.next();
            let condition = parse_expression(tokens)?;
            let body = parse_block(tokens)?;
            Statement::While { condition,
                               body,
                               line }
        },
        Token::For => parse_for(tokens, line)?,
        Token::Return => {
            tokens.next();
            let value = if next_is(tokens, &Token::Semicolon) {
                None
            } else {
                Some(parse_expression(tokens)?)
            };
            expect(tokens, &Token::Semicolon, "';' after return")?;
            Statement::Return { value, line }
        },
        Token::Break => {
            tokens.next();
            expect(tokens, &Token::Semicolon, "';' after break")?;
            Statement::Break { line }
        },
        Token::Continue => {
            tokens.next();
            expect(tokens, &Token::Semicolon, "';' after continue")?;
            Statement::Continue { line }
        },
        Token::Semicolon => {
            tokens.next();
            Statement::Empty
        },
        Token::Function => {
            let def = parse_function(tokens)?;
            if def.name.is_some() {
                consume_if(tokens, &Token::Semicolon);
                Statement::Function(Rc::new(def))
            } else if in_block && next_is(tokens, &Token::RBrace) {
                return Ok(Item::Value(Expr::Function(Rc::new(def))));
            } else {
                return Err(ParseError::AnonymousFunctionStatement { line });
            }
        },
        Token::If | Token::LBrace => {
            let expr = parse_expression_with_block(tokens)?;
            if !consume_if(tokens, &Token::Semicolon) && in_block && next_is(tokens, &Token::RBrace)
            {
                return Ok(Item::Value(expr));
            }
            Statement::Expression { expr, line }
        },
        _ => {
            let expr = parse_expression(tokens)?;
            if in_block && next_is(tokens, &Token::RBrace) {
                return Ok(Item::Value(expr));
            }
            expect(tokens, &Token::Semicolon, "';' after expression")?;
            Statement::Expression { expr, line }
        },
    };

    Ok(Item::Statement(statement))
}

/// Parses `let name [= value];`.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let name = parse_identifier(tokens)?;

    let value = if consume_if(tokens, &Token::Assign) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect(tokens, &Token::Semicolon, "';' after declaration")?;

    Ok(Statement::Let { name, value, line })
}

/// Parses `for [let] target in start .. end { ... }`.
///
/// With `let`, the target must be a plain name that the loop declares in its
/// own frame. Without it, the target may be any assignable expression.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let declare = consume_if(tokens, &Token::Let);

    let target = parse_path(tokens)?;
    let valid = if declare {
        matches!(target, Expr::Variable { .. })
    } else {
        target.is_lvalue()
    };
    if !valid {
        return Err(ParseError::InvalidLoopTarget { line });
    }

    expect(tokens, &Token::In, "'in'")?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::DotDot, "'..'")?;
    let end = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::For(ForLoop { target,
                                declare,
                                start,
                                end,
                                body,
                                line }))
}
