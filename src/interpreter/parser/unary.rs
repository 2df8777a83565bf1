use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Block, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{NumberLiteral, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, parse_function, parse_if},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
        value::kind::ValueKind,
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses casts: a unary expression followed by any number of `as <type>`.
///
/// The target is a path expression, so both `x as number` and `x as t` (with
/// `t` holding a type) are accepted. Casts associate to the left.
///
/// The rule is: `cast := unary ("as" path)*`
pub fn parse_cast<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_unary(tokens)?;
    while let Some((Token::As, line)) = tokens.peek() {
        tokens.next();
        let target = parse_path(tokens)?;
        expr = Expr::Cast { expr: Box::new(expr),
                            target: Box::new(target),
                            line: *line };
    }
    Ok(expr)
}

/// Parses prefix `-` and `not`.
///
/// Both are right-recursive, so `not not x` and `- -x` nest.
///
/// The rule is: `unary := ("-" | "not") unary | path`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
        Some((Token::Not, line)) => Some((UnaryOperator::Not, *line)),
        _ => None,
    };

    match op {
        Some((op, line)) => {
            tokens.next();
            let expr = ensure_sufficient_stack(|| parse_unary(tokens))?;
            Ok(Expr::UnaryOp { op,
                               expr: Box::new(expr),
                               line })
        },
        None => parse_path(tokens),
    }
}

/// Parses a primary expression followed by calls, property accesses and
/// subscripts, folded left in source order.
///
/// `a.b(c)[d]` becomes `Subscript(Call(Dot(a, b), [c]), d)`.
///
/// The rule is: `path := primary ("(" args ")" | "." identifier | "["
/// expression "]")*`
pub fn parse_path<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;
    loop {
        match tokens.peek() {
            Some((Token::LParen, line)) => {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    line: *line };
            },
            Some((Token::Dot, line)) => {
                tokens.next();
                let name = parse_identifier(tokens)?;
                expr = Expr::Dot { object: Box::new(expr),
                                   name,
                                   line: *line };
            },
            Some((Token::LBracket, line)) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, "']'")?;
                expr = Expr::Subscript { object: Box::new(expr),
                                         index: Box::new(index),
                                         line: *line };
            },
            _ => break,
        }
    }
    Ok(expr)
}

/// Parses a primary expression.
///
/// Primary expressions are literals, type names, table literals, variables,
/// parenthesized expressions and the block-led forms `if`, `{ ... }` and
/// `function`, which may appear anywhere a value is expected.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for any token that cannot start an
/// expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    let literal = |value: LiteralValue| Expr::Literal { value, line };

    match token {
        Token::Number(NumberLiteral::Integer(n)) => {
            tokens.next();
            Ok(literal(LiteralValue::Integer(*n)))
        },
        Token::Number(NumberLiteral::Real(x)) => {
            tokens.next();
            Ok(literal(LiteralValue::Real(*x)))
        },
        Token::String(s) => {
            tokens.next();
            Ok(literal(LiteralValue::String(s.clone())))
        },
        Token::Bool(b) => {
            tokens.next();
            Ok(literal(LiteralValue::Bool(*b)))
        },
        Token::Null => {
            tokens.next();
            Ok(literal(LiteralValue::Null))
        },
        Token::Type(ValueKind::Table) => {
            tokens.next();
            if let Some((Token::LBrace, _)) = tokens.peek() {
                return parse_table_literal(tokens, line);
            }
            Ok(literal(LiteralValue::Type(ValueKind::Table)))
        },
        Token::Type(kind) => {
            tokens.next();
            Ok(literal(LiteralValue::Type(*kind)))
        },
        Token::Identifier(name) => {
            tokens.next();
            Ok(Expr::Variable { name: name.clone(),
                                line })
        },
        Token::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::If => {
            tokens.next();
            parse_if(tokens, line)
        },
        Token::LBrace => Ok(Expr::Block(parse_block(tokens)?)),
        Token::Function => Ok(Expr::Function(Rc::new(parse_function(tokens)?))),
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

/// Parses the body of `table { key: value, ... }` after the `table` keyword.
///
/// Keys are primary expressions, except that a bare identifier is taken as
/// its own name: `table { x: 1 }` uses the string `"x"` as key. Use
/// parentheses, `table { (x): 1 }`, to key by a variable's value.
fn parse_table_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBrace, "'{'")?;

    let entries = parse_comma_separated(tokens,
                                        |tokens| {
                                            let key = match parse_primary(tokens)? {
                                                Expr::Variable { name, line } => {
                                                    Expr::Literal { value: LiteralValue::String(name),
                                                                    line }
                                                },
                                                key => key,
                                            };
                                            expect(tokens, &Token::Colon, "':'")?;
                                            let value = parse_expression(tokens)?;
                                            Ok((key, value))
                                        },
                                        &Token::RBrace)?;

    Ok(Expr::TableLiteral { entries, line })
}

/// Wraps a single expression as a block, for constructs that desugar into
/// one.
#[must_use]
pub fn block_of(expr: Expr) -> Block {
    let line = expr.line_number();
    Block { statements: Vec::new(),
            value: Some(Box::new(expr)),
            line }
}
