//! # tommy
//!
//! tommy is a small imperative scripting language written in Rust.
//! Source text is tokenized, parsed by a binding-power expression parser and a
//! keyword-delimited statement grammar, and executed by a tree-walking
//! interpreter with lexical scopes, first-class closures, arrays and a handful
//! of built-in functions.
//!
//! ```
//! let program = tommy::parse("let double(n: Int): Int = return n * 2 end\nlet x = double(21)")
//!     .unwrap();
//! assert_eq!(program.len(), 2);
//! ```

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
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use crate::{
    ast::Statement,
    error::{ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` trees produced by the
/// parser, the `Type` model used by annotations, and the operator metadata
/// (symbol, signature, precedence and associativity) shared by the parser,
/// the evaluator and the type inferrer.
pub mod ast;
/// Provides unified error types for parsing, evaluation and type inference.
///
/// Every error carries the source line it refers to. Runtime errors are
/// additionally annotated with the statement that was executing.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// Ties together lexing, parsing, evaluation and the runtime value model.
pub mod interpreter;
/// Static type inference for expressions.
///
/// An independent utility: the interpreter checks types dynamically and never
/// calls into it.
pub mod typechecker;
/// Safe numeric conversions shared by the evaluator and built-ins.
pub mod util;

/// Parses a whole program.
///
/// No partial tree is returned: the first lexical or syntactic error aborts
/// parsing.
///
/// # Errors
/// The first `ParseError` encountered.
///
/// # Example
/// ```
/// use tommy::{error::ParseError, parse};
///
/// assert!(parse("let x = 1; print(x)").is_ok());
/// assert!(matches!(parse("let = 1"), Err(ParseError::Expected { .. })));
/// ```
pub fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(source)?;

    parse_program(&mut tokens.iter().peekable()).map_err(|err| match err {
        ParseError::UnexpectedEndOfInput { line: 0 } => {
            let line = tokens.last().map_or(1, |(_, line)| *line);
            ParseError::UnexpectedEndOfInput { line }
        },
        other => other,
    })
}

/// Runs a parsed program in a fresh context that prints to standard output.
///
/// # Errors
/// The first runtime error, annotated with the statement that raised it.
pub fn run(program: &[Statement]) -> Result<(), RuntimeError> {
    Context::new().execute(program)
}

/// Parses and runs a script.
///
/// This is the convenience entry point used by the command-line binary. It
/// parses the whole source first, so a syntax error anywhere means nothing is
/// executed.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use tommy::get_result;
///
/// // Simple program: no error should occur.
/// assert!(get_result("let result = 2 + 2").is_ok());
///
/// // Example with an intentional error (unknown variable).
/// assert!(get_result("let y = x + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let program = parse(source)?;
    run(&program)?;
    Ok(())
}
