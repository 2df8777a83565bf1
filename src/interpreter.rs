/// The environment module implements lexical scoping.
///
/// Frames map names to values and link to their enclosing frame. Blocks,
/// loops and function calls each run in a fresh child frame, and closures keep
/// the frame they were created in alive.
///
/// # Responsibilities
/// - Declares, reads and writes variables along the frame chain.
/// - Applies the copy-or-share binding rule at every binding.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// dispatches operators to the value protocol and propagates control flow
/// signals such as `return` and `break`.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, loops and built-ins.
/// - Reports runtime errors such as unknown names or unsupported operands.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles numeric and string literals, identifiers, keywords and comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and separator rules, reporting errors with line info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the closed set of value kinds (null, booleans,
/// numbers, strings, tables, functions and types) and the operations each of
/// them supports: arithmetic, comparison, casts, calls, properties and
/// subscripts.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements the operator protocol and its error reporting.
/// - Decides whether a value is copied or shared when it is bound to a name.
pub mod value;
