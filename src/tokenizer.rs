/// Splits a stored command line into argument tokens.
///
/// A space outside of a quoted span ends a token. A `"` or `'` opens a
/// span, and only the same character closes it again; quotes preceded by
/// a backslash are ignored. Quote characters stay in the tokens, nothing
/// is unescaped. Consecutive spaces produce empty tokens and the rest of
/// the line after the last boundary is always returned, so an empty line
/// yields a single empty token.
pub fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut open_quote: Option<u8> = None;

    for (i, &byte) in bytes.iter().enumerate() {
        let escaped = i > 0 && bytes[i - 1] == b'\\';
        match (byte, open_quote) {
            (b' ', None) => {
                // an ascii space is always a char boundary
                tokens.push(&line[start..i]);
                start = i + 1;
            }
            (b'"' | b'\'', None) if !escaped => open_quote = Some(byte),
            (quote, Some(open)) if quote == open && !escaped => open_quote = None,
            _ => {}
        }
    }

    tokens.push(&line[start..]);
    tokens
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn keeps_double_quoted_span_together() {
        assert_eq!(
            tokenize(r#"echo "Hello World""#),
            vec!["echo", r#""Hello World""#]
        );
    }

    #[test]
    fn keeps_single_quoted_span_together() {
        assert_eq!(
            tokenize("git log --format='%h %s' -n 3"),
            vec!["git", "log", "--format='%h %s'", "-n", "3"]
        );
    }

    #[test]
    fn empty_line_is_one_empty_token() {
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn preserves_empty_tokens() {
        assert_eq!(tokenize("ls  -la"), vec!["ls", "", "-la"]);
        assert_eq!(tokenize(" ls "), vec!["", "ls", ""]);
    }

    #[test]
    fn other_quote_inside_span_is_literal() {
        assert_eq!(
            tokenize(r#"echo "it's here" now"#),
            vec!["echo", r#""it's here""#, "now"]
        );
        assert_eq!(
            tokenize(r#"echo 'say "hi" there'"#),
            vec!["echo", r#"'say "hi" there'"#]
        );
    }

    #[test]
    fn escaped_quote_does_not_close_span() {
        assert_eq!(
            tokenize(r#"echo "a \" b" c"#),
            vec!["echo", r#""a \" b""#, "c"]
        );
    }

    #[test]
    fn escaped_quote_does_not_open_span() {
        assert_eq!(
            tokenize(r#"echo \"a b\""#),
            vec!["echo", r#"\"a"#, r#"b\""#]
        );
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(
            tokenize(r#"echo "a b  c"#),
            vec!["echo", r#""a b  c"#]
        );
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(
            tokenize(r#"echo "grüße welt" ünd"#),
            vec!["echo", r#""grüße welt""#, "ünd"]
        );
    }

    #[test]
    fn joined_tokens_reproduce_the_line() {
        let line = r#" cargo  test -- "a b" 'c'  "#;
        assert_eq!(tokenize(line).join(" "), line);
    }
}
