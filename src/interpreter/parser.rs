use std::{iter::Peekable, slice::Iter};

use tracing::trace;

use crate::{
    error::{Error, ErrorKind},
    interpreter::{
        lexer::{Spanned, Token, TokenKind},
        position::Position,
        value::{ArithmeticFault, Number, Operator},
    },
};

pub type ParseResult<T> = Result<T, Error>;

/// Deepest parenthesis nesting the parser will descend into.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent parser that evaluates as it goes.
///
/// Grammar, loosest binding first:
///
/// ```text
/// expr   := term (("+" | "-") term)*
/// term   := factor (("*" | "/") factor)*
/// factor := INT | FLOAT | "(" expr ")"
/// ```
///
/// No syntax tree is built; each rule returns the [`Number`] its production
/// denotes. The token slice is only borrowed, and at most one token of
/// lookahead is used. Parentheses may nest at most [`MAX_DEPTH`] levels.
pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Spanned>>,
    /// Where end-of-input errors are reported.
    eof:    Position,
    /// Number of currently open parentheses.
    depth:  usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`. `eof` is the cursor at the end of the
    /// source text.
    #[must_use]
    pub fn new(tokens: &'a [Spanned], eof: Position) -> Self {
        Self { tokens: tokens.iter().peekable(),
               eof,
               depth: 0 }
    }

    /// Evaluates the whole token sequence as one expression.
    ///
    /// # Errors
    /// Anything [`Parser::expr`] reports, plus `UnexpectedTrailingInput` when
    /// tokens remain after a complete expression.
    pub fn parse(&mut self) -> ParseResult<Number> {
        let value = self.expr()?;

        match self.tokens.peek() {
            None => Ok(value),
            Some(spanned) => {
                Err(Error::new(ErrorKind::UnexpectedTrailingInput,
                               spanned.start.clone(),
                               spanned.end.clone(),
                               format!("Expected end of input, found {}", spanned.token)))
            },
        }
    }

    /// Parses addition and subtraction, folding left to right.
    ///
    /// Stops at the first token that is not `+` or `-`; any remaining tokens
    /// are left for the caller.
    ///
    /// # Errors
    /// Propagates errors from [`Parser::term`] and arithmetic faults at the
    /// operator token.
    pub fn expr(&mut self) -> ParseResult<Number> {
        let mut result = self.term()?;

        while let Some(spanned) = self.tokens.peek().copied() {
            let op = match spanned.token {
                Token::Plus => Operator::Add,
                Token::Minus => Operator::Sub,
                _ => break,
            };
            self.eat(spanned.token.kind())?;
            let rhs = self.term()?;
            result = fold(result, op, rhs, spanned)?;
        }

        Ok(result)
    }

    /// Parses multiplication and division, folding left to right.
    ///
    /// # Errors
    /// Propagates errors from [`Parser::factor`] and arithmetic faults at the
    /// operator token.
    pub fn term(&mut self) -> ParseResult<Number> {
        let mut result = self.factor()?;

        while let Some(spanned) = self.tokens.peek().copied() {
            let op = match spanned.token {
                Token::Multiply => Operator::Mul,
                Token::Divide => Operator::Div,
                _ => break,
            };
            self.eat(spanned.token.kind())?;
            let rhs = self.factor()?;
            result = fold(result, op, rhs, spanned)?;
        }

        Ok(result)
    }

    /// Parses a number literal or a parenthesised expression.
    ///
    /// # Errors
    /// - `UnexpectedToken` if the current token cannot start a factor.
    /// - `UnexpectedEndOfInput` if there is no current token, or the closing
    ///   parenthesis is missing at the end.
    /// - `NestingTooDeep` at a `(` that would open more than [`MAX_DEPTH`]
    ///   levels.
    pub fn factor(&mut self) -> ParseResult<Number> {
        let Some(spanned) = self.tokens.peek().copied() else {
            return Err(self.end_of_input("number or '('"));
        };

        match spanned.token {
            Token::Integer(n) => {
                self.eat(TokenKind::Integer)?;
                Ok(Number::from(n))
            },
            Token::Float(x) => {
                self.eat(TokenKind::Float)?;
                Ok(Number::from(x))
            },
            Token::LParen => {
                if self.depth >= MAX_DEPTH {
                    return Err(Error::new(ErrorKind::NestingTooDeep,
                                          spanned.start.clone(),
                                          spanned.end.clone(),
                                          format!("Parentheses nest deeper than {MAX_DEPTH} levels")));
                }
                self.eat(TokenKind::LParen)?;
                self.depth += 1;
                let value = self.expr();
                self.depth -= 1;
                let value = value?;
                self.eat(TokenKind::RParen)?;
                Ok(value)
            },
            _ => Err(unexpected(spanned, "number or '('", &spanned.token)),
        }
    }

    /// Consumes the current token if it has kind `expected`.
    ///
    /// # Errors
    /// - `UnexpectedToken` naming the expected and found tokens.
    /// - `UnexpectedEndOfInput` if the tokens are exhausted.
    pub fn eat(&mut self, expected: TokenKind) -> ParseResult<()> {
        match self.tokens.peek().copied() {
            Some(spanned) if spanned.token.kind() == expected => {
                trace!(token = %spanned.token, "eat");
                self.tokens.next();
                Ok(())
            },
            Some(spanned) => Err(unexpected(spanned, expected, &spanned.token)),
            None => Err(self.end_of_input(expected)),
        }
    }

    fn end_of_input(&self, expected: impl std::fmt::Display) -> Error {
        Error::new(ErrorKind::UnexpectedEndOfInput,
                   self.eof.clone(),
                   self.eof.clone(),
                   format!("Expected {expected}, found end of input"))
    }
}

fn unexpected(at: &Spanned, expected: impl std::fmt::Display, found: &Token) -> Error {
    Error::new(ErrorKind::UnexpectedToken,
               at.start.clone(),
               at.end.clone(),
               format!("Expected {expected}, found {found}"))
}

/// Combines two operands, reporting arithmetic faults at the operator.
fn fold(lhs: Number, op: Operator, rhs: Number, at: &Spanned) -> ParseResult<Number> {
    trace!(%lhs, %op, %rhs, "fold");
    lhs.apply(op, rhs).map_err(|fault| {
                          let (kind, details) = match fault {
                              ArithmeticFault::DivisionByZero => {
                                  (ErrorKind::DivisionByZero, format!("{lhs} {op} {rhs}"))
                              },
                              ArithmeticFault::Overflow => {
                                  (ErrorKind::Overflow,
                                   format!("{lhs} {op} {rhs} does not fit in a number"))
                              },
                          };
                          Error::new(kind, at.start.clone(), at.end.clone(), details)
                      })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::Lexer;

    fn eval(text: &str) -> ParseResult<Number> {
        let mut lexer = Lexer::new("<test>", text);
        let tokens = lexer.make_tokens()?;
        Parser::new(&tokens, lexer.position().clone()).parse()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(eval("3+4*2"), Ok(Number::Integer(11)));
        assert_eq!(eval("2*3-4/2"), Ok(Number::Float(4.0)));
    }

    #[test]
    fn same_precedence_folds_left() {
        assert_eq!(eval("10-4-3"), Ok(Number::Integer(3)));
        assert_eq!(eval("16/4/2"), Ok(Number::Float(2.0)));
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(eval("(3+4)*2"), Ok(Number::Integer(14)));
        assert_eq!(eval("((1))"), Ok(Number::Integer(1)));
    }

    #[test]
    fn expr_leaves_trailing_tokens_for_the_caller() {
        let mut lexer = Lexer::new("<test>", "1+2 3");
        let tokens = lexer.make_tokens().unwrap();
        let mut parser = Parser::new(&tokens, lexer.position().clone());
        assert_eq!(parser.expr(), Ok(Number::Integer(3)));
        assert_eq!(parser.tokens.len(), 1);
    }

    #[test]
    fn nesting_is_bounded() {
        let at_limit = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(eval(&at_limit), Ok(Number::Integer(1)));

        let past_limit = format!("2*{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        let err = eval(&past_limit).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep);
        let first_rejected = 2 + isize::try_from(MAX_DEPTH).unwrap();
        assert_eq!(err.start.index(), first_rejected);
    }

    #[test]
    fn depth_is_released_after_each_group() {
        let group = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let siblings = format!("{group}+{group}+{group}");
        assert_eq!(eval(&siblings), Ok(Number::Integer(3)));
    }

    #[test]
    fn trailing_tokens_fail_a_full_parse() {
        let err = eval("3+4)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedTrailingInput);
        assert_eq!(err.start.index(), 3);
        assert_eq!(err.details, "Expected end of input, found ')'");
    }

    #[test]
    fn missing_closing_paren_is_end_of_input() {
        let err = eval("(3+4").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.details, "Expected ')', found end of input");
        assert_eq!(err.start.index(), 4);
    }

    #[test]
    fn wrong_token_in_place_of_closing_paren() {
        let err = eval("(3 4").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.details, "Expected ')', found 4");
        assert_eq!((err.start.index(), err.end.index()), (3, 4));
    }

    #[test]
    fn operator_where_a_factor_belongs() {
        let err = eval("3+*4").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.details, "Expected number or '(', found '*'");
        assert_eq!(err.start.index(), 2);
    }

    #[test]
    fn dangling_operator_is_end_of_input() {
        let err = eval("3+").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.details, "Expected number or '(', found end of input");
    }

    #[test]
    fn empty_input_is_end_of_input() {
        assert_eq!(eval("").unwrap_err().kind, ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn arithmetic_faults_point_at_the_operator() {
        let err = eval("1 / 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(err.start.index(), 2);
        assert_eq!(err.details, "1 / 0");

        let err = eval("9223372036854775807 + 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.start.index(), 20);
    }
}
