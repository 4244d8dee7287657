//! # tinycalc
//!
//! tinycalc is a small arithmetic expression evaluator written in Rust.
//! It lexes, parses and evaluates integer and floating-point expressions built
//! from `+`, `-`, `*`, `/` and parentheses, and reports every failure as a
//! structured error with a source position.

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
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::interpreter::{lexer::Lexer, parser::Parser};

/// Provides the unified error type for lexing, parsing and evaluation.
///
/// Every failure in the pipeline is an [`Error`] carrying an [`ErrorKind`], a
/// description and the start and end positions of the offending span. Nothing
/// in the pipeline panics on user input.
///
/// # Responsibilities
/// - Defines the error kinds for all failure modes.
/// - Renders errors as `<Kind>: <details>` plus the file and 1-based line.
pub mod error;
/// Orchestrates the evaluation pipeline.
///
/// Ties together positions, the lexer, the evaluating parser and the numeric
/// value type.
pub mod interpreter;
/// Logging setup for binaries embedding the evaluator.
pub mod logging;

pub use error::{Error, ErrorKind};
pub use interpreter::value::Number;

/// Evaluates `text` and returns its numeric value.
///
/// `source_name` is only used to label errors. Lexing runs to completion
/// first; if it fails the parser is never invoked. The whole input must form
/// one expression; leftover tokens are an error.
///
/// # Errors
/// Returns the first lexical, structural or arithmetic error encountered.
///
/// # Examples
/// ```
/// use tinycalc::{ErrorKind, Number, run};
///
/// assert_eq!(run("<doc>", "3 + 4 * 2"), Ok(Number::Integer(11)));
/// assert_eq!(run("<doc>", "7 / 2"), Ok(Number::Float(3.5)));
///
/// let err = run("<doc>", "3+$4").unwrap_err();
/// assert_eq!(err.kind, ErrorKind::IllegalCharacter);
/// assert_eq!(err.to_string(), "Illegal Character: '$'\nFile <doc>, line 1");
/// ```
pub fn run(source_name: &str, text: &str) -> Result<Number, Error> {
    debug!(source_name, "evaluating");

    let mut lexer = Lexer::new(source_name, text);
    let tokens = lexer.make_tokens()?;

    let result = Parser::new(&tokens, lexer.position().clone()).parse();
    match &result {
        Ok(value) => debug!(%value, "evaluated"),
        Err(error) => debug!(kind = %error.kind, "evaluation failed"),
    }
    result
}
