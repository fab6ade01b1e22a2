//! Inline escape tokenizer.
//!
//! Re-scans a single Text value and splits out escapes such as `\*[IT]` so
//! renderers can apply formatting. The result only ever holds [`Token::Text`]
//! and [`Token::Inline`] tokens.
//!
//! Like groff itself, this does no validation: an escape missing its closing
//! `]` swallows the rest of the line as its name, and nested brackets are not
//! supported.

use crate::token::Token;

/// Split `text` into text runs and inline escapes.
///
/// Every backslash flushes the pending text run, even when that run is empty,
/// so `\*[IT]x` yields `Text("")`, `Inline("IT")`, `Text("x")`. A backslash
/// that does not start an escape is kept, together with the character after
/// it, as ordinary text.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            run.push(c);
            continue;
        }

        tokens.push(Token::text(std::mem::take(&mut run)));

        match chars.next() {
            Some(open @ ('*' | '[')) => {
                let mut next = chars.next();

                // `\*[name]`: the bracket after the star is not part of the name.
                if open == '*' && next == Some('[') {
                    next = chars.next();
                }

                let mut escape = String::new();

                while let Some(c) = next {
                    if c == ']' {
                        break;
                    }
                    escape.push(c);
                    next = chars.next();
                }
                tokens.push(Token::inline(escape));
            }
            Some(other) => {
                run.push('\\');
                run.push(other);
            }
            None => run.push('\\'),
        }
    }

    if !run.is_empty() {
        tokens.push(Token::text(run));
    }
    tokens
}
