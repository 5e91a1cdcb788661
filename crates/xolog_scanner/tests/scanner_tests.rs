//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes Xolog source text.

use xolog_diagnostics::DiagnosticCollection;
use xolog_scanner::{scan, scan_with, Literal, Scanner, Token, TokenKind};

/// Helper: scan all tokens and return (kind, lexeme) pairs, END included.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    scan(source)
        .tokens
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_source() {
    let result = scan("");
    assert!(!result.had_error);
    assert_eq!(result.tokens, vec![Token::end(1)]);
}

#[test]
fn test_whitespace_only() {
    let result = scan("   \t\r  ");
    assert_eq!(result.tokens, vec![Token::end(1)]);
}

#[test]
fn test_newlines_only_count_lines() {
    let result = scan("\n\n\n");
    assert_eq!(result.tokens, vec![Token::end(4)]);
}

#[test]
fn test_single_character_punctuation() {
    let source = "(){},.-+;*";
    let tokens = scan_all(source);
    assert_eq!(tokens.len(), source.chars().count() + 1);
    assert_eq!(
        tokens.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Minus,
            TokenKind::Plus,
            TokenKind::Semicolon,
            TokenKind::Star,
            TokenKind::End,
        ]
    );
    for ((_, lexeme), ch) in tokens.iter().zip(source.chars()) {
        assert_eq!(lexeme, &ch.to_string());
    }
}

#[test]
fn test_one_or_two_character_operators() {
    let kinds = scan_kinds("! != = == < <= > >=");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Bang,
            TokenKind::BangEqual,
            TokenKind::Equal,
            TokenKind::EqualEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::End,
        ]
    );
}

#[test]
fn test_bang_equal_lexeme() {
    let tokens = scan_all("!=");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::BangEqual, "!=".to_string()),
            (TokenKind::End, String::new()),
        ]
    );

    let tokens = scan_all("!");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Bang, "!".to_string()),
            (TokenKind::End, String::new()),
        ]
    );
}

#[test]
fn test_longest_match_then_leftover() {
    assert_eq!(scan_kinds("=="), vec![TokenKind::EqualEqual, TokenKind::End]);
    assert_eq!(
        scan_kinds("==="),
        vec![TokenKind::EqualEqual, TokenKind::Equal, TokenKind::End]
    );
    assert_eq!(
        scan_kinds("<=="),
        vec![TokenKind::LessEqual, TokenKind::Equal, TokenKind::End]
    );
    assert_eq!(
        scan_kinds("!!="),
        vec![TokenKind::Bang, TokenKind::BangEqual, TokenKind::End]
    );
}

#[test]
fn test_line_comment() {
    let result = scan("\\\\ comment\n{}");
    assert!(!result.had_error);
    let tokens = &result.tokens;
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::LeftBrace);
    assert_eq!(tokens[0].lexeme, "{");
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[1].kind, TokenKind::RightBrace);
    assert_eq!(tokens[2].kind, TokenKind::End);
}

#[test]
fn test_comment_at_end_of_input() {
    let result = scan("( \\\\ trailing");
    assert_eq!(result.tokens.len(), 2);
    assert_eq!(result.tokens[0].kind, TokenKind::LeftParen);
    assert_eq!(result.tokens[1].line, 1);
}

#[test]
fn test_comment_hides_errors_and_quotes() {
    let result = scan("\\\\ @ # 'not a string\n+");
    assert!(!result.had_error);
    assert_eq!(
        scan_kinds("\\\\ @ # 'not a string\n+"),
        vec![TokenKind::Plus, TokenKind::End]
    );
}

#[test]
fn test_slash() {
    let tokens = scan_all("4 \\ 2");
    assert_eq!(tokens[1], (TokenKind::Slash, "\\".to_string()));
}

#[test]
fn test_string_literals() {
    let result = scan("'hello'");
    assert!(!result.had_error);
    assert_eq!(result.tokens.len(), 2);
    let token = &result.tokens[0];
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.lexeme, "'hello'");
    assert_eq!(token.literal, Literal::Text("hello".to_string()));

    let result = scan(r#""world""#);
    assert_eq!(result.tokens[0].lexeme, "\"world\"");
    assert_eq!(result.tokens[0].literal.as_text(), Some("world"));
}

#[test]
fn test_empty_string_literal() {
    let result = scan("''");
    assert_eq!(result.tokens[0].kind, TokenKind::String);
    assert_eq!(result.tokens[0].literal, Literal::Text(String::new()));
}

#[test]
fn test_either_quote_closes_a_string() {
    let result = scan("'it\"s'");
    let tokens = &result.tokens;
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "'it\"");
    assert_eq!(tokens[0].literal.as_text(), Some("it"));
    // The leftover `s'` is an unexpected character then an unterminated string.
    assert!(result.had_error);
    assert_eq!(result.diagnostics().len(), 2);
    assert_eq!(tokens.len(), 2);
}

#[test]
fn test_unterminated_string() {
    let result = scan("'unterminated");
    assert!(result.had_error);
    assert_eq!(result.tokens, vec![Token::end(1)]);

    let diags = result.diagnostics().diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message_text, "Unterminated string.");
    assert_eq!(diags[0].line, Some(1));
    assert_eq!(diags[0].location, "");
}

#[test]
fn test_unterminated_string_reported_at_current_line() {
    let result = scan("(\n'one\ntwo");
    assert!(result.had_error);
    assert_eq!(result.diagnostics().diagnostics()[0].line, Some(3));
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::LeftParen, TokenKind::End]
    );
    assert_eq!(result.tokens.last().map(|t| t.line), Some(3));
}

#[test]
fn test_multiline_string_line_is_completion_line() {
    let result = scan("'a\nb\nc' +");
    let tokens = &result.tokens;
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal.as_text(), Some("a\nb\nc"));
    assert_eq!(tokens[0].line, 3);
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn test_numeric_literals() {
    let result = scan("102");
    assert_eq!(result.tokens.len(), 2);
    assert_eq!(result.tokens[0].kind, TokenKind::Number);
    assert_eq!(result.tokens[0].lexeme, "102");
    assert_eq!(result.tokens[0].literal, Literal::Number(102.0));

    let result = scan("1.02");
    assert_eq!(result.tokens.len(), 2);
    assert_eq!(result.tokens[0].lexeme, "1.02");
    assert_eq!(result.tokens[0].literal, Literal::Number(1.02));
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let tokens = scan("1.").tokens;
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1");
    assert_eq!(tokens[0].literal.as_number(), Some(1.0));
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::End);
}

#[test]
fn test_only_one_fraction() {
    let tokens = scan_all("1.2.3");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Number, "1.2".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Number, "3".to_string()),
            (TokenKind::End, String::new()),
        ]
    );
}

#[test]
fn test_leading_dot_is_dot_then_number() {
    assert_eq!(
        scan_kinds(".5"),
        vec![TokenKind::Dot, TokenKind::Number, TokenKind::End]
    );
}

#[test]
fn test_minus_is_separate_from_number() {
    let tokens = scan("-7").tokens;
    assert_eq!(tokens[0].kind, TokenKind::Minus);
    assert_eq!(tokens[1].literal, Literal::Number(7.0));
}

#[test]
fn test_non_literal_tokens_have_no_literal() {
    for token in scan("(){}!=<=>; \\").tokens {
        assert!(token.literal.is_none(), "{} carried a literal", token);
    }
}

#[test]
fn test_line_tracking() {
    let tokens = scan("(\n{").tokens;
    assert_eq!(tokens[0].kind, TokenKind::LeftParen);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].kind, TokenKind::LeftBrace);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].line, 2);
}

#[test]
fn test_crlf_counts_one_line() {
    let tokens = scan("(\r\n)").tokens;
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn test_unexpected_characters_are_collected() {
    let result = scan("@#(");
    assert!(result.had_error);
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::LeftParen, TokenKind::End]
    );
    let messages: Vec<&str> = result
        .diagnostics()
        .diagnostics()
        .iter()
        .map(|d| d.message_text.as_str())
        .collect();
    assert_eq!(messages, vec!["Unexpected character: @", "Unexpected character: #"]);
}

#[test]
fn test_error_flag_matches_collected_errors() {
    for (source, errors) in [("( )", 0), ("@", 1), ("$ 'open", 2), ("\\\\ @\n#", 1)] {
        let result = scan(source);
        assert_eq!(result.had_error, result.diagnostics().has_errors(), "{source:?}");
        assert_eq!(result.diagnostics().error_count(), errors, "{source:?}");
    }
}

#[test]
fn test_unexpected_character_line() {
    let result = scan("(\n\n  $");
    assert_eq!(result.diagnostics().diagnostics()[0].line, Some(3));
}

#[test]
fn test_identifiers_are_not_recognized() {
    let result = scan("ab");
    assert!(result.had_error);
    assert_eq!(result.diagnostics().len(), 2);
    assert_eq!(result.tokens, vec![Token::end(1)]);
}

#[test]
fn test_unicode_in_string_literal() {
    let result = scan("\"héllo →\"");
    assert!(!result.had_error);
    assert_eq!(result.tokens[0].literal.as_text(), Some("héllo →"));
    assert_eq!(result.tokens[0].lexeme, "\"héllo →\"");
}

#[test]
fn test_unicode_in_comment() {
    let result = scan("\\\\ ünïcödé ✓\n*");
    assert!(!result.had_error);
    assert_eq!(result.tokens[0].kind, TokenKind::Star);
}

#[test]
fn test_unexpected_multibyte_character_is_one_error() {
    let result = scan("λ+");
    assert_eq!(result.diagnostics().len(), 1);
    assert_eq!(
        result.diagnostics().diagnostics()[0].message_text,
        "Unexpected character: λ"
    );
    assert_eq!(result.tokens[0].kind, TokenKind::Plus);
}

#[test]
fn test_non_ascii_digits_are_not_numbers() {
    let result = scan("٣");
    assert!(result.had_error);
    assert_eq!(result.tokens, vec![Token::end(1)]);
}

#[test]
fn test_mixed_expression() {
    let source = "(1 + 2.5) * 3 >= 'x' \\\\ done\n!= \"y\";";
    let result = scan(source);
    assert!(!result.had_error);
    let tokens: Vec<String> = result.tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        tokens,
        vec![
            "LEFT_PAREN ( nil",
            "NUMBER 1 1",
            "PLUS + nil",
            "NUMBER 2.5 2.5",
            "RIGHT_PAREN ) nil",
            "STAR * nil",
            "NUMBER 3 3",
            "GREATER_EQUAL >= nil",
            "STRING 'x' x",
            "BANG_EQUAL != nil",
            "STRING \"y\" y",
            "SEMICOLON ; nil",
            "END  nil",
        ]
    );
    assert_eq!(result.tokens[9].line, 2);
}

#[test]
fn test_end_token_always_last() {
    for source in ["", "(", "'open", "@", "1.", "\\\\ only a comment"] {
        let tokens = scan(source).tokens;
        let last = tokens.last().expect("at least END");
        assert_eq!(last.kind, TokenKind::End);
        assert_eq!(last.lexeme, "");
        assert!(last.literal.is_none());
        assert_eq!(tokens.iter().filter(|t| t.is_end()).count(), 1);
    }
}

#[test]
fn test_scan_is_idempotent() {
    let source = "( 'a\nb' 12.5 @ != \\\\ c\n'unterminated";
    let first = scan(source);
    let second = scan(source);
    assert_eq!(first.tokens, second.tokens);
    assert_eq!(first.had_error, second.had_error);
    assert_eq!(
        first.diagnostics().diagnostics(),
        second.diagnostics().diagnostics()
    );
}

#[test]
fn test_scanner_with_external_reporter() {
    let mut reporter = DiagnosticCollection::new();
    let (tokens, had_error) = Scanner::with_reporter("# (", &mut reporter)
        .scan_tokens()
        .into_parts();
    assert!(had_error);
    assert_eq!(tokens.len(), 2);
    assert_eq!(reporter.len(), 1);
    assert_eq!(reporter.diagnostics()[0].code, 1001);
}

#[test]
fn test_scan_with_returns_error_flag() {
    let mut reporter = DiagnosticCollection::new();
    let (tokens, had_error) = scan_with("+ -", &mut reporter);
    assert!(!had_error);
    assert!(reporter.is_empty());
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_scanners_are_independent_across_threads() {
    let sources = ["(1)", "'a' 'b'", "@", "\n\n!="];
    let handles: Vec<_> = sources
        .iter()
        .map(|s| {
            let source = s.to_string();
            std::thread::spawn(move || scan(&source).into_parts())
        })
        .collect();
    let results: Vec<(Vec<Token>, bool)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (source, threaded) in sources.iter().zip(results) {
        assert_eq!(threaded, scan(source).into_parts());
    }
}
