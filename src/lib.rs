//! # tern
//!
//! tern is a small, dynamically typed scripting language written in Rust.
//! Programs are tokenized, parsed into a syntax tree and executed by a
//! tree-walking evaluator with lexical scoping, closures, mutable strings
//! and insertion-ordered tables.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Statement,
    error::{Error, RuntimeError},
    interpreter::{environment::Env, evaluator::core::Context},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every error carries the line it was raised on and renders a readable
/// message through `Display`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Wraps them in a single [`Error`](crate::error::Error) for end-to-end
///   runs.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scoping to provide a complete runtime for source
/// code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities for safe numeric conversion and stack management.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Grow the native stack for deeply nested source.
pub mod util;

pub use interpreter::{lexer::tokenize, parser::core::parse};

/// Executes parsed statements against `env` with a fresh evaluation context.
///
/// # Errors
/// Returns the first runtime error raised by the program.
///
/// # Example
/// ```
/// use tern::{execute, interpreter::environment::Scope, parse, tokenize};
///
/// let env = Scope::root();
/// let program = parse(&tokenize("let x = 6 * 7;").unwrap()).unwrap();
/// execute(&program, &env).unwrap();
///
/// assert_eq!(env.read("x", 1).unwrap().to_string(), "42");
/// ```
pub fn execute(statements: &[Statement], env: &Env) -> Result<(), RuntimeError> {
    Context::new().execute(statements, env)
}

/// Tokenizes, parses and executes `source` against `env`.
///
/// Nothing runs unless the whole source tokenizes and parses. Bindings made
/// by the program stay in `env`, so consecutive runs against the same
/// environment build on each other.
///
/// # Errors
/// Returns the lexical, syntax or runtime error that stopped the program.
///
/// # Examples
/// ```
/// use tern::{interpreter::environment::Scope, run};
///
/// let env = Scope::root();
/// assert!(run("let y = 2 + 2;", &env).is_ok());
/// assert!(run("let z = y * 2;", &env).is_ok());
///
/// // 'x' is not defined
/// assert!(run("let w = x + 1;", &env).is_err());
/// ```
pub fn run(source: &str, env: &Env) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    let statements = parse(&tokens)?;
    execute(&statements, env)?;
    Ok(())
}
