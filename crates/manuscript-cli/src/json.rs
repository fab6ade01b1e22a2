//! JSON view of a parsed manuscript for `book tokens --json`.

use std::borrow::Cow;

use manuscript_core::{Chapter, Manuscript, Token};
use serde::Serialize;

#[derive(Serialize)]
struct JsonManuscript<'a> {
    metadata: JsonMetadata<'a>,
    chapters: Vec<JsonChapter<'a>>,
    tokens: Vec<JsonToken<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    title: &'a str,
    subtitle: &'a str,
    author: &'a str,
    print_style: &'a str,
    copyright: &'a str,
}

#[derive(Serialize)]
struct JsonChapter<'a> {
    count: usize,
    title: Cow<'a, str>,
    number: Option<&'a str>,
    word_count: usize,
    start: usize,
    end: usize,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonToken<'a> {
    Macro { name: &'a str, args: &'a [String] },
    Text { value: &'a str },
    Inline { escape: &'a str },
}

pub fn to_json(ms: &Manuscript) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&convert_manuscript(ms))
}

fn convert_manuscript(ms: &Manuscript) -> JsonManuscript<'_> {
    JsonManuscript {
        metadata: JsonMetadata {
            title: ms.doc_title(),
            subtitle: ms.subtitle(),
            author: ms.author(),
            print_style: ms.print_style(),
            copyright: ms.copyright(),
        },
        chapters: ms.all_chapters().iter().map(convert_chapter).collect(),
        tokens: ms.tokens().iter().map(convert_token).collect(),
    }
}

fn convert_chapter<'a>(ch: &Chapter<'a>) -> JsonChapter<'a> {
    JsonChapter {
        count: ch.count(),
        title: ch.title(),
        number: ch.number(),
        word_count: ch.word_count(),
        start: ch.start(),
        end: ch.end(),
    }
}

fn convert_token(token: &Token) -> JsonToken<'_> {
    match token {
        Token::Macro(m) => JsonToken::Macro {
            name: &m.name,
            args: &m.args,
        },
        Token::Text(t) => JsonToken::Text { value: &t.value },
        Token::Inline(i) => JsonToken::Inline { escape: &i.escape },
    }
}
