//! Chapter views into a manuscript's token sequence.
//!
//! A [`Chapter`] borrows the manuscript's tokens and records a `[start, end)`
//! range; nothing is copied. The borrow ties every view to the manuscript it
//! came from, so the token sequence cannot change while views are alive.

use std::borrow::Cow;
use std::ops::Range;

use crate::token::{names, Macro, Token};

/// A chapter: the tokens from its heading macros up to and including its
/// COLLATE, or up to the end of the manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter<'a> {
    tokens: &'a [Token],
    count: usize,
    start: usize,
    body: usize,
    end: usize,
}

impl<'a> Chapter<'a> {
    pub(crate) fn new(tokens: &'a [Token], count: usize, start: usize, body: usize, end: usize) -> Self {
        debug_assert!(start < body && body <= end && end <= tokens.len());
        Self {
            tokens,
            count,
            start,
            body,
            end,
        }
    }

    /// 1-based ordinal among all chapters in the manuscript.
    ///
    /// Selecting a subset of chapters never renumbers them.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the chapter's first heading macro.
    ///
    /// The heading is part of the range so title and number lookups can see
    /// it. Prose starts after the heading; use [`Chapter::body`] for that.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the chapter's last token.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// All tokens of the chapter, heading macros included.
    #[inline]
    pub fn tokens(&self) -> &'a [Token] {
        &self.tokens[self.start..self.end]
    }

    /// Tokens after the heading macros: the CHAPTER_TITLE, or a CHAPTER
    /// together with the CHAPTER_TITLE directly after it.
    #[inline]
    pub fn body(&self) -> &'a [Token] {
        &self.tokens[self.body..self.end]
    }

    fn find_macro(&self, name: &str) -> Option<&'a Macro> {
        self.tokens()
            .iter()
            .filter_map(Token::as_macro)
            .find(|m| m.name == name)
    }

    /// First argument of the chapter's CHAPTER_TITLE macro, if it has one.
    pub fn declared_title(&self) -> Option<&'a str> {
        self.find_macro(names::CHAPTER_TITLE).map(Macro::first_arg)
    }

    /// The declared title, or the ordinal when there is no CHAPTER_TITLE.
    pub fn title(&self) -> Cow<'a, str> {
        match self.declared_title() {
            Some(title) => Cow::Borrowed(title),
            None => Cow::Owned(self.count.to_string()),
        }
    }

    /// The author-supplied number from the CHAPTER macro, e.g. `"IV"`.
    pub fn number(&self) -> Option<&'a str> {
        self.find_macro(names::CHAPTER).and_then(|m| m.arg(0))
    }

    /// Heading label such as `"Chapter IV"`, or `""` with no CHAPTER number.
    pub fn label(&self) -> String {
        self.number()
            .map(|number| format!("Chapter {}", number))
            .unwrap_or_default()
    }

    /// Approximate word count of the chapter's text lines.
    ///
    /// See [`word_count`] for exactly what is counted.
    pub fn word_count(&self) -> usize {
        word_count(self.tokens())
    }

    /// Check a selector against the ordinal, then the declared title.
    pub fn matches(&self, selector: &str) -> bool {
        self.count.to_string() == selector || self.declared_title() == Some(selector)
    }
}

/// Count words across the Text tokens of `tokens`.
///
/// Each text line is trimmed and split on single spaces, so runs of spaces
/// inside a line count as extra words: `"  a   b  "` counts as 4. Lines that
/// are empty or a single space count as nothing.
pub fn word_count(tokens: &[Token]) -> usize {
    tokens.iter().filter_map(Token::as_text).map(line_words).sum()
}

#[inline]
pub(crate) fn line_words(value: &str) -> usize {
    if value.is_empty() || value == " " {
        return 0;
    }
    value.trim().split(' ').count()
}
