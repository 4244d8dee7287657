use std::fmt;

use crate::interpreter::position::Position;

/// The category of an [`Error`].
///
/// Lexical kinds come from the lexer, structural kinds from the parser when
/// the token sequence breaks the grammar, and arithmetic kinds from folding
/// operands together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character outside the recognised set.
    IllegalCharacter,
    /// An integer literal that does not fit in 64 bits.
    LiteralTooLarge,
    /// A token appeared where the grammar required something else.
    UnexpectedToken,
    /// The tokens ran out while the grammar still required one.
    UnexpectedEndOfInput,
    /// A complete expression was followed by more tokens.
    UnexpectedTrailingInput,
    /// Division with a zero divisor.
    DivisionByZero,
    /// Integer arithmetic left the `i64` range.
    Overflow,
    /// Parentheses nested past the parser's depth limit.
    NestingTooDeep,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IllegalCharacter => "Illegal Character",
            Self::LiteralTooLarge => "Literal Too Large",
            Self::UnexpectedToken => "Unexpected Token",
            Self::UnexpectedEndOfInput => "Unexpected End Of Input",
            Self::UnexpectedTrailingInput => "Unexpected Trailing Input",
            Self::DivisionByZero => "Division By Zero",
            Self::Overflow => "Overflow",
            Self::NestingTooDeep => "Nesting Too Deep",
        };
        f.write_str(name)
    }
}

/// A failure anywhere in the pipeline, located in the source.
///
/// `start` and `end` delimit the offending span. The rendered form is
///
/// ```text
/// <Kind>: <details>
/// File <source_name>, line <line + 1>
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {details}\nFile {}, line {}", .start.source_name(), .start.line() + 1)]
pub struct Error {
    /// Position of the first offending character.
    pub start:   Position,
    /// Position just past the offending span.
    pub end:     Position,
    /// Which stage failed and how.
    pub kind:    ErrorKind,
    /// Human readable description, e.g. the illegal character in quotes.
    pub details: String,
}

impl Error {
    pub fn new(kind: ErrorKind, start: Position, end: Position, details: impl Into<String>) -> Self {
        Self { start,
               end,
               kind,
               details: details.into() }
    }

    /// Renders the error the way the interactive front end prints it.
    ///
    /// Equivalent to `to_string()`.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}
