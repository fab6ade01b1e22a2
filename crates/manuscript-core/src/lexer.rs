//! Line tokenizer.
//!
//! Every non-empty line becomes exactly one token: lines starting with `.` are
//! macros, everything else is text. Empty lines produce nothing.
//!
//! Macro arguments are split on unquoted spaces. A `"` toggles quoting and is
//! itself dropped; there is no escape for an embedded quote. An unterminated
//! quote runs to the end of the line. None of this is reported as an error.

use crate::cursor::{Cursor, Position};
use crate::token::{Macro, Text, Token};

/// Streaming tokenizer over the lines of a manuscript.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over raw manuscript bytes.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Position of the start of the next unread line.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let line = self.cursor.get_line()?;

            if let Some(token) = classify_line(line) {
                return Some(token);
            }
        }
    }
}

/// Tokenize a whole manuscript.
pub fn tokenize(input: &[u8]) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Turn one line into a token, or `None` for an empty line.
pub fn classify_line(line: String) -> Option<Token> {
    if line.is_empty() {
        return None;
    }

    if line.starts_with('.') {
        return Some(Token::Macro(parse_macro(&line)));
    }
    Some(Token::Text(Text { value: line }))
}

/// Parse a macro line such as `.CHAPTER_TITLE "The Storm" extra`.
///
/// The name runs from after the leading `.` to the first space or tab. Each
/// unquoted space after that ends an argument, so two consecutive spaces
/// produce an empty argument between them.
pub fn parse_macro(line: &str) -> Macro {
    let rest = line.strip_prefix('.').unwrap_or(line);
    let mut chars = rest.chars().peekable();

    let name: String = chars
        .by_ref()
        .take_while(|&c| c != ' ' && c != '\t')
        .collect();

    while chars.next_if(|&c| c == ' ' || c == '\t').is_some() {}

    let mut args = Vec::new();
    let mut arg = String::new();
    let mut quoted = false;

    for c in chars {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => args.push(std::mem::take(&mut arg)),
            _ => arg.push(c),
        }
    }

    if !arg.is_empty() {
        args.push(arg);
    }

    Macro { name, args }
}
