//! Token types produced by the manuscript lexers.
//!
//! A manuscript is a flat sequence of tokens, one per non-empty source line:
//!
//! - **Macro**: a `.NAME arg...` directive line
//! - **Text**: any other line, verbatim
//! - **Inline**: an escape such as `\*[IT]`, only ever produced when a single
//!   Text value is re-tokenized by [`crate::inline::tokenize`]
//!
//! Tokens are never mutated after the lexer creates them.

use std::fmt;

/// Macro names the parser and renderers give meaning to.
pub mod names {
    pub const DOCTITLE: &str = "DOCTITLE";
    pub const SUBTITLE: &str = "SUBTITLE";
    pub const AUTHOR: &str = "AUTHOR";
    pub const COPYRIGHT: &str = "COPYRIGHT";
    pub const PRINTSTYLE: &str = "PRINTSTYLE";
    pub const CHAPTER: &str = "CHAPTER";
    pub const CHAPTER_TITLE: &str = "CHAPTER_TITLE";
    pub const COLLATE: &str = "COLLATE";
    pub const PP: &str = "PP";
    pub const DROPCAP: &str = "DROPCAP";
    pub const EPIGRAPH: &str = "EPIGRAPH";
    pub const RIGHT: &str = "RIGHT";

    /// Argument closing an `EPIGRAPH` block.
    pub const OFF: &str = "OFF";
}

/// Inline escape names understood by the renderers.
pub mod escapes {
    /// Start of an italic run.
    pub const ITALIC: &str = "IT";
    /// Return to the previous font, closing an italic run.
    pub const PREVIOUS: &str = "PREV";
    /// Left smart quote.
    pub const LEFT_QUOTE: &str = "lq";
    /// Right smart quote.
    pub const RIGHT_QUOTE: &str = "rq";
}

/// A single lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A directive line.
    Macro(Macro),
    /// A plain line of text.
    Text(Text),
    /// An inline escape extracted from a Text value.
    Inline(Inline),
}

impl Token {
    /// Construct a macro token.
    pub fn macro_call<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Token::Macro(Macro {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    /// Construct a text token.
    pub fn text(value: impl Into<String>) -> Self {
        Token::Text(Text {
            value: value.into(),
        })
    }

    /// Construct an inline escape token.
    pub fn inline(escape: impl Into<String>) -> Self {
        Token::Inline(Inline {
            escape: escape.into(),
        })
    }

    /// The macro carried by this token, if any.
    #[inline]
    pub fn as_macro(&self) -> Option<&Macro> {
        match self {
            Token::Macro(m) => Some(m),
            Token::Text(_) | Token::Inline(_) => None,
        }
    }

    /// The text carried by this token, if any.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(t) => Some(&t.value),
            Token::Macro(_) | Token::Inline(_) => None,
        }
    }

    /// Check if this is a macro with the given name.
    #[inline]
    pub fn is_macro(&self, name: &str) -> bool {
        self.as_macro().is_some_and(|m| m.name == name)
    }
}

/// Renders the token as a single line of markup, without the newline.
///
/// Macro arguments are always quoted. An empty last argument is followed by
/// a space so it survives reparsing. Inline tokens render as nothing.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Macro(m) => {
                write!(f, ".{}", m.name)?;
                for arg in &m.args {
                    write!(f, " \"{}\"", arg)?;
                }
                if m.args.last().is_some_and(String::is_empty) {
                    f.write_str(" ")?;
                }
                Ok(())
            }
            Token::Text(t) => f.write_str(&t.value),
            Token::Inline(_) => Ok(()),
        }
    }
}

/// A macro invocation: `.NAME arg1 "arg two"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    /// Name following the leading `.`.
    pub name: String,
    /// Positional arguments, quotes removed.
    pub args: Vec<String>,
}

impl Macro {
    /// The argument at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// The first argument, or `""` when there are none.
    #[inline]
    pub fn first_arg(&self) -> &str {
        self.arg(0).unwrap_or("")
    }

    /// Check if this macro opens a chapter.
    #[inline]
    pub fn is_chapter_start(&self) -> bool {
        self.name == names::CHAPTER || self.name == names::CHAPTER_TITLE
    }
}

/// A line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
}

/// An inline escape, such as `IT` from `\*[IT]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub escape: String,
}
