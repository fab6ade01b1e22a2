//! The parsed manuscript: document metadata and chapter extraction.
//!
//! Metadata is not stored separately. Each accessor scans the token sequence
//! for the first macro of a given name, which keeps filtered manuscripts
//! consistent without an index to rebuild.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::chapter::{self, Chapter};
use crate::error::{Error, Result};
use crate::lexer;
use crate::token::{names, Macro, Token};

/// An ordered, immutable token sequence parsed from one manuscript file.
///
/// Filtering operations such as [`Manuscript::select`] build a new
/// manuscript; they never rewrite this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manuscript {
    tokens: Vec<Token>,
}

impl Manuscript {
    /// Parse a manuscript from raw bytes.
    pub fn parse(input: impl AsRef<[u8]>) -> Self {
        let input = input.as_ref();
        let tokens = lexer::tokenize(input);

        debug!(bytes = input.len(), tokens = tokens.len(), "parsed manuscript");

        Self { tokens }
    }

    /// Read and parse the manuscript at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(input))
    }

    /// Wrap an existing token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The first macro named `name`.
    pub fn find_macro(&self, name: &str) -> Option<&Macro> {
        self.tokens
            .iter()
            .filter_map(Token::as_macro)
            .find(|m| m.name == name)
    }

    /// First argument of the first macro named `name`, or `""`.
    pub fn get(&self, name: &str) -> &str {
        self.find_macro(name).map_or("", Macro::first_arg)
    }

    pub fn doc_title(&self) -> &str {
        self.get(names::DOCTITLE)
    }

    pub fn subtitle(&self) -> &str {
        self.get(names::SUBTITLE)
    }

    pub fn author(&self) -> &str {
        self.get(names::AUTHOR)
    }

    pub fn print_style(&self) -> &str {
        self.get(names::PRINTSTYLE)
    }

    pub fn copyright(&self) -> &str {
        self.get(names::COPYRIGHT)
    }

    /// Every chapter, in document order.
    ///
    /// A chapter opens at a CHAPTER or CHAPTER_TITLE macro. A CHAPTER_TITLE
    /// directly after a CHAPTER belongs to the same chapter and is not counted
    /// again. The chapter closes just after the next COLLATE, or at the end of
    /// the manuscript when there is none. Scanning resumes after that point, so
    /// a chapter-opening macro inside an unclosed chapter starts nothing.
    pub fn all_chapters(&self) -> Vec<Chapter<'_>> {
        let tokens = self.tokens.as_slice();
        let mut chapters = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let Some(opening) = tokens[i].as_macro().filter(|m| m.is_chapter_start()) else {
                i += 1;
                continue;
            };

            let start = i;
            let mut body = i + 1;

            if opening.name == names::CHAPTER
                && tokens
                    .get(body)
                    .is_some_and(|t| t.is_macro(names::CHAPTER_TITLE))
            {
                body += 1;
            }

            let end = tokens[body..]
                .iter()
                .position(|t| t.is_macro(names::COLLATE))
                .map_or(tokens.len(), |offset| body + offset + 1);

            chapters.push(Chapter::new(tokens, chapters.len() + 1, start, body, end));
            i = end;
        }
        chapters
    }

    /// Chapters matching any of `selectors`, or all chapters if there are none.
    ///
    /// A selector matches a chapter's decimal ordinal first, then its declared
    /// title. Document order and original ordinals are kept. A selector that
    /// matches nothing fails with [`Error::NoSuchChapter`].
    pub fn chapters<S: AsRef<str>>(&self, selectors: &[S]) -> Result<Vec<Chapter<'_>>> {
        let all = self.all_chapters();

        if selectors.is_empty() {
            debug!(chapters = all.len(), "extracted chapters");
            return Ok(all);
        }

        if let Some(missing) = selectors
            .iter()
            .map(AsRef::as_ref)
            .find(|&s| !all.iter().any(|ch| ch.matches(s)))
        {
            debug!(selector = missing, "selector matched no chapter");
            return Err(Error::NoSuchChapter(missing.to_string()));
        }

        let selected: Vec<_> = all
            .into_iter()
            .filter(|ch| selectors.iter().any(|s| ch.matches(s.as_ref())))
            .collect();

        debug!(chapters = selected.len(), selectors = selectors.len(), "selected chapters");

        Ok(selected)
    }

    /// Tokens before the first chapter-opening macro.
    pub fn front_matter(&self) -> &[Token] {
        let first = self
            .tokens
            .iter()
            .position(|t| t.as_macro().is_some_and(Macro::is_chapter_start))
            .unwrap_or(self.tokens.len());

        &self.tokens[..first]
    }

    /// A new manuscript holding the front matter and the selected chapters.
    pub fn select<S: AsRef<str>>(&self, selectors: &[S]) -> Result<Manuscript> {
        let chapters = self.chapters(selectors)?;
        let mut tokens = self.front_matter().to_vec();

        for ch in &chapters {
            tokens.extend_from_slice(ch.tokens());
        }
        Ok(Self { tokens })
    }

    /// Keep tokens until the running word count reaches `budget`.
    ///
    /// Words are counted per text line the same way as
    /// [`Chapter::word_count`], so the line that crosses the budget is kept
    /// whole. If the manuscript holds fewer words, nothing is dropped.
    pub fn truncate_words(mut self, budget: usize) -> Manuscript {
        let mut sum = 0;
        let mut keep = self.tokens.len();

        for (i, token) in self.tokens.iter().enumerate() {
            if sum >= budget {
                keep = i;
                break;
            }
            if let Some(value) = token.as_text() {
                sum += chapter::line_words(value);
            }
        }

        debug!(budget, words = sum, kept = keep, "truncated manuscript");

        self.tokens.truncate(keep);
        self
    }

    /// Drop a COLLATE macro at the very end, which would otherwise produce a
    /// trailing blank page when typeset.
    pub fn without_trailing_collate(mut self) -> Manuscript {
        if self.tokens.last().is_some_and(|t| t.is_macro(names::COLLATE)) {
            self.tokens.pop();
        }
        self
    }

    /// Total word count over all chapters.
    pub fn word_count(&self) -> usize {
        self.all_chapters().iter().map(Chapter::word_count).sum()
    }

    /// Mean chapter word count, rounded down.
    ///
    /// Fails with [`Error::NoChapters`] rather than dividing by zero.
    pub fn average_chapter_word_count(&self) -> Result<usize> {
        let chapters = self.all_chapters();

        if chapters.is_empty() {
            return Err(Error::NoChapters);
        }

        let sum: usize = chapters.iter().map(Chapter::word_count).sum();
        Ok(sum / chapters.len())
    }

    /// Serialize back to markup, one line per token.
    ///
    /// Macro arguments are always re-quoted, so the output is normalized
    /// rather than a byte-exact copy of the source.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        for token in &self.tokens {
            match token {
                Token::Macro(_) | Token::Text(_) => writeln!(w, "{}", token)?,
                Token::Inline(_) => {}
            }
        }
        w.flush()?;
        Ok(())
    }
}
