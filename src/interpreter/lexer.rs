use std::{fmt, sync::Arc};

use logos::Logos;
use tracing::{debug, trace};

use crate::{
    error::{Error, ErrorKind},
    interpreter::position::Position,
};

/// Represents a lexical token in the source input.
///
/// Number literals follow a longest-match rule: digits with at most one
/// decimal point. A second `.` starts the next token, so `1.2.3` lexes as
/// `Float(1.2)` followed by `Float(0.3)`. A `.` with no digit on either side
/// matches nothing and is reported as an illegal character.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexFault)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Floating-point literal tokens, such as `3.14`, `.5` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    Float(f64),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Multiply,
    /// `/`
    #[token("/")]
    Divide,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

/// The payload-free tag of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Float,
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
}

impl Token {
    /// Returns the tag of this token, dropping any literal payload.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Integer(_) => TokenKind::Integer,
            Self::Float(_) => TokenKind::Float,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Multiply => TokenKind::Multiply,
            Self::Divide => TokenKind::Divide,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::LParen => "'('",
            Self::RParen => "')'",
        };
        f.write_str(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Why the token scanner rejected a slice of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    /// No token pattern matched.
    #[default]
    Unrecognized,
    /// An integer literal overflowed `i64`.
    LiteralTooLarge,
}

/// A token together with the cursor snapshots around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    /// Position of the first character of the token.
    pub start: Position,
    /// Position just past the last character of the token.
    pub end:   Position,
}

/// Turns source text into [`Spanned`] tokens.
///
/// The token patterns are matched by the `logos` scanner; the lexer walks its
/// own [`Position`] cursor along with it, one character at a time, so every
/// token and every error carries a line and column.
pub struct Lexer {
    text:         Arc<str>,
    pos:          Position,
    current_char: Option<char>,
    /// Byte offset of `current_char` in `text`.
    offset:       usize,
}

impl Lexer {
    /// Creates a lexer positioned on the first character of `text`.
    pub fn new(source_name: &str, text: &str) -> Self {
        let text: Arc<str> = Arc::from(text);
        let pos = Position::new(source_name, Arc::clone(&text));
        let mut lexer = Self { text,
                               pos,
                               current_char: None,
                               offset: 0 };
        lexer.advance();
        lexer
    }

    /// The live cursor. After a successful [`Lexer::make_tokens`] it rests at
    /// the end of the text.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.pos
    }

    /// Scans the whole input.
    ///
    /// Space and tab are skipped. Scanning stops at the first character that
    /// cannot begin a token; no partial token list is returned in that case.
    ///
    /// # Errors
    /// - `IllegalCharacter` spanning exactly the offending character.
    /// - `LiteralTooLarge` spanning an integer literal that overflows `i64`.
    ///
    /// # Example
    /// ```
    /// use tinycalc::interpreter::lexer::{Lexer, Token};
    ///
    /// let tokens = Lexer::new("<doc>", "2 * (1.5)").make_tokens().unwrap();
    /// let kinds: Vec<Token> = tokens.into_iter().map(|s| s.token).collect();
    /// assert_eq!(kinds,
    ///            vec![Token::Integer(2),
    ///                 Token::Multiply,
    ///                 Token::LParen,
    ///                 Token::Float(1.5),
    ///                 Token::RParen]);
    /// ```
    pub fn make_tokens(&mut self) -> Result<Vec<Spanned>, Error> {
        let text = Arc::clone(&self.text);
        let mut scanner = Token::lexer(&text);
        let mut tokens = Vec::new();

        while let Some(result) = scanner.next() {
            let span = scanner.span();
            self.seek(span.start);
            let start = self.pos.clone();

            match result {
                Ok(token) => {
                    self.seek(span.end);
                    trace!(%token, index = start.index(), "token");
                    tokens.push(Spanned { token,
                                          start,
                                          end: self.pos.clone() });
                },
                Err(LexFault::LiteralTooLarge) => {
                    self.seek(span.end);
                    return Err(Error::new(ErrorKind::LiteralTooLarge,
                                          start,
                                          self.pos.clone(),
                                          format!("{} does not fit in a 64-bit integer",
                                                  scanner.slice())));
                },
                Err(LexFault::Unrecognized) => return Err(self.illegal_character(start)),
            }
        }

        self.seek(self.text.len());
        debug!(count = tokens.len(), "lexing finished");
        Ok(tokens)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char {
            self.offset += ch.len_utf8();
        }
        self.pos.advance(self.current_char);
        self.current_char = self.text[self.offset..].chars().next();
    }

    /// Advances the cursor until it reaches byte offset `target`.
    fn seek(&mut self, target: usize) {
        while self.offset < target && self.current_char.is_some() {
            self.advance();
        }
    }

    fn illegal_character(&mut self, start: Position) -> Error {
        let details = self.current_char.map(|ch| format!("{ch:?}")).unwrap_or_default();
        if self.current_char.is_some() {
            self.advance();
        }
        debug!(%details, index = start.index(), "illegal character");
        Error::new(ErrorKind::IllegalCharacter, start, self.pos.clone(), details)
    }
}

fn parse_integer(lex: &mut logos::Lexer<Token>) -> Result<i64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::LiteralTooLarge)
}

fn parse_float(lex: &mut logos::Lexer<Token>) -> Result<f64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::Unrecognized)
}
