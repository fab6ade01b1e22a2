//! Integration tests for the cursor and the line tokenizer

use manuscript_core::cursor::Cursor;
use manuscript_core::lexer::{self, Lexer};
use manuscript_core::Token;
use rstest::rstest;

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_decodes_multibyte() {
    let mut cursor = Cursor::new("aé\n".as_bytes());

    assert_eq!(cursor.get(), Some('a'));
    assert_eq!(cursor.get(), Some('é'));
    assert_eq!(cursor.get(), Some('\n'));
    assert_eq!(cursor.get(), None);

    let pos = cursor.position();
    assert_eq!(pos.offset, 4);
    assert_eq!(pos.line, 2);
    assert_eq!(pos.column, 1);
}

#[test]
fn test_cursor_invalid_bytes_degrade() {
    let mut cursor = Cursor::new(&[b'a', 0xFF, b'b']);

    assert_eq!(cursor.get(), Some('a'));
    assert_eq!(cursor.get(), Some(char::REPLACEMENT_CHARACTER));
    assert_eq!(cursor.get(), Some('b'));
    assert_eq!(cursor.get(), None);
}

#[test]
fn test_cursor_truncated_sequence() {
    // First two bytes of a three byte sequence.
    let mut cursor = Cursor::new(&[0xE2, 0x82]);

    assert_eq!(cursor.get(), Some(char::REPLACEMENT_CHARACTER));
    assert_eq!(cursor.get(), Some(char::REPLACEMENT_CHARACTER));
    assert_eq!(cursor.get(), None);
}

#[test]
fn test_cursor_get_line() {
    let mut cursor = Cursor::new(b"one\r\n\ntwo");

    assert_eq!(cursor.get_line().as_deref(), Some("one"));
    assert_eq!(cursor.get_line().as_deref(), Some(""));
    assert_eq!(cursor.get_line().as_deref(), Some("two"));
    assert_eq!(cursor.get_line(), None);
    assert!(cursor.is_eof());
}

#[test]
fn test_cursor_get_line_trailing_newline() {
    let mut cursor = Cursor::new(b"only\n");

    assert_eq!(cursor.get_line().as_deref(), Some("only"));
    assert_eq!(cursor.get_line(), None);
}

#[test]
fn test_cursor_get_line_invalid_utf8() {
    let mut cursor = Cursor::new(b"a\xFFb\nc");

    assert_eq!(cursor.get_line().as_deref(), Some("a\u{FFFD}b"));
    assert_eq!(cursor.get_line().as_deref(), Some("c"));
}

#[test]
fn test_cursor_seek_clamps() {
    let mut cursor = Cursor::new(b"ab\ncd");

    cursor.seek(100);
    assert!(cursor.is_eof());
    assert_eq!(cursor.position().offset, 5);

    cursor.seek(4);
    let pos = cursor.position();
    assert_eq!(pos.line, 2);
    assert_eq!(pos.column, 2);
    assert_eq!(cursor.get(), Some('d'));

    cursor.seek(0);
    assert_eq!(cursor.get_line().as_deref(), Some("ab"));
}

// ============================================================================
// Macro Line Tests
// ============================================================================

#[rstest]
#[case(".NAME \"a\" \"b c\" d", "NAME", &["a", "b c", "d"])]
#[case(".PP", "PP", &[])]
#[case(".PP ", "PP", &[])]
#[case(".EPIGRAPH OFF", "EPIGRAPH", &["OFF"])]
#[case(".CHAPTER_TITLE \"The \"Storm", "CHAPTER_TITLE", &["The Storm"])]
#[case(".X \"open quote runs on", "X", &["open quote runs on"])]
#[case(".X a  b", "X", &["a", "", "b"])]
#[case(".X a ", "X", &["a"])]
#[case(".X\t\targ", "X", &["arg"])]
#[case(".X a\tb", "X", &["a\tb"])]
#[case(".X \"\" b", "X", &["", "b"])]
fn test_parse_macro(#[case] line: &str, #[case] name: &str, #[case] args: &[&str]) {
    let m = lexer::parse_macro(line);

    assert_eq!(m.name, name);
    assert_eq!(m.args, args);
}

#[test]
fn test_macro_first_arg() {
    let m = lexer::parse_macro(".AUTHOR \"Bram Stoker\" extra");
    assert_eq!(m.first_arg(), "Bram Stoker");
    assert_eq!(m.arg(1), Some("extra"));

    let m = lexer::parse_macro(".COLLATE");
    assert_eq!(m.first_arg(), "");
    assert_eq!(m.arg(0), None);
}

// ============================================================================
// Line Classification Tests
// ============================================================================

#[test]
fn test_tokenize_classifies_lines() {
    let tokens = lexer::tokenize(b"Hello\n\n.PP\n  indented  \n");

    assert_eq!(
        tokens,
        vec![
            Token::text("Hello"),
            Token::macro_call("PP", Vec::<String>::new()),
            Token::text("  indented  "),
        ]
    );
}

#[test]
fn test_tokenize_discards_empty_lines() {
    let tokens = lexer::tokenize(b"\n\n\n");
    assert!(tokens.is_empty());
}

#[test]
fn test_tokenize_crlf() {
    let tokens = lexer::tokenize(b".PP\r\ntext\r\n");

    assert_eq!(tokens[0], Token::macro_call("PP", Vec::<String>::new()));
    assert_eq!(tokens[1], Token::text("text"));
}

#[test]
fn test_dot_only_in_first_column_is_macro() {
    let tokens = lexer::tokenize(b" .PP\nEnd of sentence.\n");

    assert_eq!(tokens[0], Token::text(" .PP"));
    assert_eq!(tokens[1], Token::text("End of sentence."));
}

#[test]
fn test_lexer_streams_tokens() {
    let mut lexer = Lexer::new(b".CHAPTER_TITLE One\n\nbody\n");

    let first = lexer.next().unwrap();
    assert!(first.is_macro("CHAPTER_TITLE"));
    assert_eq!(lexer.position().line, 2);

    assert_eq!(lexer.next(), Some(Token::text("body")));
    assert_eq!(lexer.next(), None);
}
