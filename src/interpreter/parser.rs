/// Binary operator parsing.
///
/// Parses every infix level of the precedence ladder from logical `or` down
/// to multiplication, including compound assignment operators.
pub mod binary;
/// Block parsing.
///
/// Parses brace-delimited statement lists and their optional trailing value.
pub mod block;
/// Core parsing entry points.
///
/// Contains the program and expression entry points and the `if` and
/// `function` forms shared by statements and expressions.
pub mod core;
/// Statement parsing.
///
/// Handles declarations, loops, jumps and expression statements together with
/// their separator rules.
pub mod statement;
/// Unary, cast, path and primary expression parsing.
pub mod unary;
/// Shared helpers for token matching and comma-separated lists.
pub mod utils;
