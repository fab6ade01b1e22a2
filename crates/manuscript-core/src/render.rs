//! Walking chapters into formatted paragraphs.
//!
//! [`Renderer`] interprets the handful of macros that shape a manuscript's
//! prose (PP, DROPCAP, EPIGRAPH, RIGHT) and the inline escapes for italics
//! and smart quotes. It hands finished [`Paragraph`]s to a [`Sink`], which
//! decides how they look: plain text here, or a document builder elsewhere.

use std::io::Write;

use crate::chapter::Chapter;
use crate::error::Result;
use crate::inline;
use crate::manuscript::Manuscript;
use crate::scanner::Scanner;
use crate::token::{escapes, names, Token};

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// What a paragraph is, so sinks can pick fonts and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The document title on the title page.
    DocTitle,
    /// "by" and the author's name on the title page.
    Byline,
    /// A chapter's number label, e.g. "Chapter IV".
    ChapterNumber,
    ChapterTitle,
    /// One line of an epigraph block.
    Epigraph,
    /// A prose paragraph.
    Body,
}

/// A span of text sharing one format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub text: String,
    pub italic: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: false,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub role: Role,
    pub justify: Justify,
    /// Set on every body paragraph after the first in a chapter.
    pub indent: bool,
    pub runs: Vec<Run>,
}

impl Paragraph {
    fn new(role: Role, justify: Justify, runs: Vec<Run>) -> Self {
        Self {
            role,
            justify,
            indent: false,
            runs,
        }
    }

    /// The paragraph's text with formatting dropped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Destination for rendered paragraphs.
pub trait Sink {
    fn paragraph(&mut self, paragraph: Paragraph) -> Result<()>;

    fn page_break(&mut self) -> Result<()>;

    /// Called once after the last paragraph.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drives a [`Sink`] over a manuscript's chapters.
pub struct Renderer<S> {
    sink: S,
    title_page: bool,
}

impl<S: Sink> Renderer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            title_page: false,
        }
    }

    /// Emit a title page (title, "by", author) before the chapters.
    pub fn with_title_page(mut self, title_page: bool) -> Self {
        self.title_page = title_page;
        self
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render `chapters` of `manuscript`, separated by page breaks.
    pub fn render(&mut self, manuscript: &Manuscript, chapters: &[Chapter<'_>]) -> Result<()> {
        if self.title_page {
            self.render_title_page(manuscript)?;
        }

        for (i, ch) in chapters.iter().enumerate() {
            self.render_chapter(ch)?;

            if i + 1 != chapters.len() {
                self.sink.page_break()?;
            }
        }
        self.sink.finish()
    }

    fn render_title_page(&mut self, manuscript: &Manuscript) -> Result<()> {
        self.sink.paragraph(Paragraph::new(
            Role::DocTitle,
            Justify::Center,
            vec![Run::italic(manuscript.doc_title())],
        ))?;

        for line in ["by", manuscript.author()] {
            self.sink.paragraph(Paragraph::new(
                Role::Byline,
                Justify::Center,
                vec![Run::italic(line)],
            ))?;
        }
        self.sink.page_break()
    }

    /// Render one chapter's heading and body.
    pub fn render_chapter(&mut self, ch: &Chapter<'_>) -> Result<()> {
        let label = ch.label();

        if !label.is_empty() {
            self.sink.paragraph(Paragraph::new(
                Role::ChapterNumber,
                Justify::Center,
                vec![Run::plain(label)],
            ))?;
        }

        self.sink.paragraph(Paragraph::new(
            Role::ChapterTitle,
            Justify::Center,
            vec![Run::italic(ch.title())],
        ))?;

        let mut sc = Scanner::new(ch.body());
        let mut indent = false;

        while let Some(token) = sc.next() {
            match token {
                Token::Macro(m) if m.name == names::EPIGRAPH && m.arg(0) != Some(names::OFF) => {
                    self.render_epigraph(&mut sc)?;
                }
                Token::Macro(m) if m.name == names::PP => {
                    self.render_paragraph(&mut sc, indent)?;
                    indent = true;
                }
                Token::Macro(_) | Token::Text(_) | Token::Inline(_) => {}
            }
        }
        Ok(())
    }

    fn render_epigraph(&mut self, sc: &mut Scanner<'_>) -> Result<()> {
        while let Some(token) = sc.next() {
            match token {
                Token::Macro(m) if m.name == names::EPIGRAPH && m.arg(0) == Some(names::OFF) => {
                    break;
                }
                Token::Text(t) => {
                    self.sink.paragraph(Paragraph::new(
                        Role::Epigraph,
                        Justify::Center,
                        runs(&t.value),
                    ))?;
                }
                Token::Macro(_) | Token::Inline(_) => {}
            }
        }
        Ok(())
    }

    fn render_paragraph(&mut self, sc: &mut Scanner<'_>, indent: bool) -> Result<()> {
        let mut justify = Justify::Left;
        let mut buf = String::new();

        while let Some(token) = sc.next() {
            match token {
                Token::Macro(m) if m.name == names::DROPCAP => buf.push_str(m.first_arg()),
                Token::Macro(m) if m.name == names::RIGHT => justify = Justify::Right,
                Token::Macro(m)
                    if m.name == names::PP || m.name == names::EPIGRAPH || m.is_chapter_start() =>
                {
                    sc.back();
                    break;
                }
                Token::Text(t) => {
                    buf.push_str(&t.value);
                    buf.push(' ');
                }
                Token::Macro(_) | Token::Inline(_) => {}
            }
        }

        let text = buf.strip_suffix(' ').unwrap_or(&buf);

        if text.is_empty() {
            return Ok(());
        }

        self.sink.paragraph(Paragraph {
            role: Role::Body,
            justify,
            indent,
            runs: runs(text),
        })
    }
}

/// Split a line into formatted runs using its inline escapes.
///
/// `\*[IT]` opens an italic run closed by `\*[PREV]`; `\*[lq]` and `\*[rq]`
/// become a plain `"`. Other escapes are dropped.
pub fn runs(text: &str) -> Vec<Run> {
    let tokens = inline::tokenize(text);
    let mut sc = Scanner::new(&tokens);
    let mut runs = Vec::new();

    while let Some(token) = sc.next() {
        match token {
            Token::Text(t) if !t.value.is_empty() => runs.push(Run::plain(t.value.as_str())),
            Token::Inline(i) if i.escape == escapes::ITALIC => {
                let italic = italic_run(&mut sc);
                if !italic.is_empty() {
                    runs.push(Run::italic(italic));
                }
            }
            Token::Inline(i) if i.escape == escapes::LEFT_QUOTE || i.escape == escapes::RIGHT_QUOTE => {
                runs.push(Run::plain("\""));
            }
            Token::Text(_) | Token::Inline(_) | Token::Macro(_) => {}
        }
    }
    runs
}

fn italic_run(sc: &mut Scanner<'_>) -> String {
    let mut buf = String::new();

    while let Some(token) = sc.next() {
        match token {
            Token::Inline(i) if i.escape == escapes::PREVIOUS => break,
            Token::Inline(i) if i.escape == escapes::LEFT_QUOTE || i.escape == escapes::RIGHT_QUOTE => {
                buf.push('"');
            }
            Token::Text(t) => buf.push_str(&t.value),
            Token::Inline(_) | Token::Macro(_) => {}
        }
    }
    buf
}

/// Plain-text sink: no formatting, body paragraphs after the first indented,
/// chapters separated by a blank line.
pub struct PlainText<W> {
    out: W,
    indent: String,
    in_epigraph: bool,
}

impl<W: Write> PlainText<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: " ".repeat(8),
            in_epigraph: false,
        }
    }

    /// Set the indent written before indented body paragraphs.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_epigraph(&mut self) -> Result<()> {
        if self.in_epigraph {
            self.in_epigraph = false;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Sink for PlainText<W> {
    fn paragraph(&mut self, paragraph: Paragraph) -> Result<()> {
        if paragraph.role != Role::Epigraph {
            self.close_epigraph()?;
        }

        match paragraph.role {
            Role::Body if paragraph.indent => {
                write!(self.out, "{}", self.indent)?;
                writeln!(self.out, "{}", paragraph.text())?;
            }
            Role::ChapterTitle => {
                writeln!(self.out, "{}", paragraph.text())?;
                writeln!(self.out)?;
            }
            Role::Epigraph => {
                self.in_epigraph = true;
                writeln!(self.out, "{}", paragraph.text())?;
            }
            Role::Body | Role::DocTitle | Role::Byline | Role::ChapterNumber => {
                writeln!(self.out, "{}", paragraph.text())?;
            }
        }
        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        self.close_epigraph()?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close_epigraph()?;
        self.out.flush()?;
        Ok(())
    }
}
