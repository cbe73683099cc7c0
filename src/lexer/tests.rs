//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.br".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("let const struct fn return break if else while repeat for in true false some no"),
        vec![
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Struct,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Repeat,
            TokenKind::For,
            TokenKind::In,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Some,
            TokenKind::No,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase letter".to_string();
    let tokens = tokenize(source, Some("test.br".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "letter", "EOF"]);
    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5 6.02e23".to_string();
    let tokens = tokenize(source, Some("test.br".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[4].kind, TokenKind::Float);
    assert_eq!(tokens[4].value, "6.02e23");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_ranges_are_not_floats() {
    assert_eq!(
        kinds("1..<10 1...3"),
        vec![
            TokenKind::Integer,
            TokenKind::DotDotLess,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Ellipsis,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words" """#.to_string();
    let tokens = tokenize(source, Some("test.br".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "hex\x41" "quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.br".to_string())).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "backslash\\");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].value, "quote\"test");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % ** == != < > <= >= = <- && || | ^ & << >> ! #"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::StarStar,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::LeftArrow,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Ampersand,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Not,
            TokenKind::Hash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : -> ? ?? ?. ++ --"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Arrow,
            TokenKind::Question,
            TokenKind::QuestionQuestion,
            TokenKind::QuestionDot,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("let x = 1; // trailing comment\n// full line\nx++;"),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::PlusPlus,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_tracks_lines_and_columns() {
    let source = "let x = 1;\n  print(x);".to_string();
    let tokens = tokenize(source, Some("test.br".to_string())).unwrap();

    let print = &tokens[5];
    assert_eq!(print.value, "print");
    assert_eq!(print.span.start.line, 2);
    assert_eq!(print.span.start.column, 3);
    assert_eq!(print.span.end.column, 8);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("let x = @;".to_string(), Some("test.br".to_string())).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 9);
    assert!(error.is_syntax_error());
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("\"open".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().file.as_str(), "shell");
}
