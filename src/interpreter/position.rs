use std::sync::Arc;

/// A cursor into a named source buffer.
///
/// `index` and `column` start at `-1` so that the first call to
/// [`Position::advance`] lands on the first character. `index` counts
/// characters, one per advance. `line` and `column` are zero based.
///
/// Cloning yields an independent snapshot; the source name and text are
/// shared immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    index:       isize,
    line:        usize,
    column:      isize,
    source_name: Arc<str>,
    source_text: Arc<str>,
}

impl Position {
    /// Creates a cursor sitting just before the first character of
    /// `source_text`.
    pub fn new(source_name: impl Into<Arc<str>>, source_text: impl Into<Arc<str>>) -> Self {
        Self { index:       -1,
               line:        0,
               column:      -1,
               source_name: source_name.into(),
               source_text: source_text.into(), }
    }

    /// Moves the cursor forward by one character.
    ///
    /// `current_char` is the character being stepped over. Stepping over a
    /// newline bumps `line` and resets `column` to 0, so the character after
    /// the newline sits at column 0.
    ///
    /// # Example
    /// ```
    /// use tinycalc::interpreter::position::Position;
    ///
    /// let mut pos = Position::new("<test>", "a\nb");
    /// pos.advance(None);
    /// pos.advance(Some('a'));
    /// assert_eq!((pos.index(), pos.line(), pos.column()), (1, 0, 1));
    /// pos.advance(Some('\n'));
    /// assert_eq!((pos.index(), pos.line(), pos.column()), (2, 1, 0));
    /// ```
    pub const fn advance(&mut self, current_char: Option<char>) -> &mut Self {
        self.index += 1;
        self.column += 1;

        if let Some('\n') = current_char {
            self.line += 1;
            self.column = 0;
        }

        self
    }

    /// Character offset into the source text.
    #[must_use]
    pub const fn index(&self) -> isize {
        self.index
    }

    /// Zero-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Zero-based column number.
    #[must_use]
    pub const fn column(&self) -> isize {
        self.column
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}
