/// The lexer module tokenizes source text for the parser.
///
/// The lexer reads the raw text and produces tokens for number literals,
/// operators and parentheses, each paired with its source position.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Reports illegal characters and oversized literals with a precise span.
pub mod lexer;
/// The parser module evaluates the token stream.
///
/// Recursive descent over the arithmetic grammar. Each rule computes its value
/// directly instead of building a tree.
///
/// # Responsibilities
/// - Enforces precedence and left associativity.
/// - Reports unexpected tokens, missing tokens and trailing input.
/// - Turns arithmetic faults into located errors.
pub mod parser;
/// Source positions for tokens and errors.
pub mod position;
/// The numeric result type and its promoting arithmetic.
pub mod value;
