use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_cast},
    },
};

/// Parses `or` chains.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;
    while let Some((Token::Or, line)) = tokens.peek() {
        tokens.next();
        let right = parse_logical_and(tokens)?;
        left = Expr::LogicalOp { left: Box::new(left),
                                 op: LogicalOperator::Or,
                                 right: Box::new(right),
                                 line: *line };
    }
    Ok(left)
}

/// Parses `and` chains.
///
/// The rule is: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_equality(tokens)?;
    while let Some((Token::And, line)) = tokens.peek() {
        tokens.next();
        let right = parse_equality(tokens)?;
        left = Expr::LogicalOp { left: Box::new(left),
                                 op: LogicalOperator::And,
                                 right: Box::new(right),
                                 line: *line };
    }
    Ok(left)
}

/// Parses a single `==` or `!=`.
///
/// Equality does not chain: `a == b == c` is a syntax error at the second
/// `==`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)?`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_single(tokens,
                 &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                 parse_comparison)
}

/// Parses a single relational operator: `<`, `>`, `<=` or `>=`.
///
/// The rule is: `comparison := shift (("<" | ">" | "<=" | ">=") shift)?`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_single(tokens,
                 &[BinaryOperator::Less,
                   BinaryOperator::Greater,
                   BinaryOperator::LessEqual,
                   BinaryOperator::GreaterEqual],
                 parse_shift)
}

/// Parses bit shifts, including `<<=` and `>>=`.
///
/// The rule is: `shift := additive (("<<" | ">>" | "<<=" | ">>=") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens,
                &[BinaryOperator::ShiftLeft,
                  BinaryOperator::ShiftRight,
                  BinaryOperator::ShiftLeftAssign,
                  BinaryOperator::ShiftRightAssign],
                parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators `+` and `-` together with their
/// compound forms, so `x += 1 + 2` groups as `(x += 1) + 2`.
///
/// The rule is: `additive := multiplicative (("+" | "-" | "+=" | "-=")
/// multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens,
                &[BinaryOperator::Add,
                  BinaryOperator::Sub,
                  BinaryOperator::AddAssign,
                  BinaryOperator::SubAssign],
                parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/`, `//`, `%` and their compound
/// forms. Operands are cast expressions.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens,
                &[BinaryOperator::Mul,
                  BinaryOperator::Div,
                  BinaryOperator::FloorDiv,
                  BinaryOperator::Mod,
                  BinaryOperator::MulAssign,
                  BinaryOperator::DivAssign,
                  BinaryOperator::FloorDivAssign,
                  BinaryOperator::ModAssign],
                parse_cast)
}

/// Folds `operand (op operand)*` into a left-associative tree for the given
/// operators.
fn parse_chain<'a, I>(tokens: &mut Peekable<I>,
                      operators: &[BinaryOperator],
                      operand: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            tokens.next();
            let right = operand(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses `operand (op operand)?` for non-associative levels.
fn parse_single<'a, I>(tokens: &mut Peekable<I>,
                       operators: &[BinaryOperator],
                       operand: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = operand(tokens)?;
    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && operators.contains(&op)
    {
        tokens.next();
        let right = operand(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   line: *line });
    }
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
///
/// `=` is not included: plain assignment is handled at the lowest precedence
/// level by `parse_expression`.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    use BinaryOperator as Op;
    let op = match token {
        Token::Plus => Op::Add,
        Token::Minus => Op::Sub,
        Token::Star => Op::Mul,
        Token::Slash => Op::Div,
        Token::DoubleSlash => Op::FloorDiv,
        Token::Percent => Op::Mod,
        Token::ShiftLeft => Op::ShiftLeft,
        Token::ShiftRight => Op::ShiftRight,
        Token::Less => Op::Less,
        Token::Greater => Op::Greater,
        Token::LessEqual => Op::LessEqual,
        Token::GreaterEqual => Op::GreaterEqual,
        Token::Equal => Op::Equal,
        Token::NotEqual => Op::NotEqual,
        Token::PlusAssign => Op::AddAssign,
        Token::MinusAssign => Op::SubAssign,
        Token::StarAssign => Op::MulAssign,
        Token::SlashAssign => Op::DivAssign,
        Token::DoubleSlashAssign => Op::FloorDivAssign,
        Token::PercentAssign => Op::ModAssign,
        Token::ShiftLeftAssign => Op::ShiftLeftAssign,
        Token::ShiftRightAssign => Op::ShiftRightAssign,
        _ => return None,
    };
    Some(op)
}
