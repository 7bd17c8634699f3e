//! Inline directive syntax parsing: `:name[content]{attrs}`

use super::DirectiveArgs;

/// Inline directive found in a line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedDirective {
    pub(crate) name: String,
    pub(crate) args: DirectiveArgs,
}

/// Find the first inline directive in a line.
///
/// Returns the directive with its byte range in `line`. Leaf (`::`) and
/// container (`:::`) markers are not inline directives and are skipped, as is
/// anything inside an inline code span. The `[content]` part is required.
pub(crate) fn parse_line(line: &str) -> Option<(ParsedDirective, usize, usize)> {
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'`' => pos = skip_code_span(line, pos),
            b':' => {
                let colon_count = bytes[pos..].iter().take_while(|&&b| b == b':').count();
                if colon_count == 1
                    && let Some((directive, end)) = parse_at(line, pos + 1)
                {
                    return Some((directive, pos, end));
                }
                pos += colon_count;
            }
            _ => pos += 1,
        }
    }

    None
}

/// Parse `name[content]{attrs}` starting right after the colon.
fn parse_at(line: &str, start: usize) -> Option<(ParsedDirective, usize)> {
    let after_colon = &line[start..];
    let name_end = after_colon
        .find(|c: char| !is_name_char(c))
        .unwrap_or(after_colon.len());

    let name = &after_colon[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut pos = start + name_end;

    let (content, content_consumed) = parse_delimited(&line[pos..], '[', ']')?;
    pos += content_consumed;

    let (attrs, attrs_consumed) = parse_delimited(&line[pos..], '{', '}').unwrap_or(("", 0));
    pos += attrs_consumed;

    let directive = ParsedDirective {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs),
    };
    Some((directive, pos))
}

/// Valid name characters: alphanumerics, hyphens, and underscores.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parse a balanced `open ... close` group at the start of `s`.
///
/// Returns the inner text and the bytes consumed, or `None` if `s` does not
/// start with `open` or the group is never closed.
fn parse_delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[open.len_utf8()..i], i + close.len_utf8()));
            }
        }
    }

    None
}

/// Skip an inline code span starting at `start` (a backtick).
///
/// Returns the position after the closing backtick run. An unmatched run is
/// literal text, so only the run itself is skipped.
fn skip_code_span(line: &str, start: usize) -> usize {
    let bytes = line.as_bytes();
    let run = bytes[start..].iter().take_while(|&&b| b == b'`').count();
    let mut pos = start + run;

    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let closing = bytes[pos..].iter().take_while(|&&b| b == b'`').count();
            if closing == run {
                return pos + closing;
            }
            pos += closing;
        } else {
            pos += 1;
        }
    }

    start + run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<(String, String, usize, usize)> {
        parse_line(line).map(|(d, start, end)| (d.name, d.args.content, start, end))
    }

    #[test]
    fn test_inline_directive() {
        let (name, content, start, end) = parse("Press :kbd[Ctrl+C] to copy.").unwrap();
        assert_eq!(name, "kbd");
        assert_eq!(content, "Ctrl+C");
        assert_eq!((start, end), (6, 18));
    }

    #[test]
    fn test_byte_range_with_multibyte_text() {
        let line = "これは:ruby[漢字(かんじ)]です";
        let (name, content, start, end) = parse(line).unwrap();
        assert_eq!(name, "ruby");
        assert_eq!(content, "漢字(かんじ)");
        assert_eq!(&line[start..end], ":ruby[漢字(かんじ)]");
    }

    #[test]
    fn test_inline_with_attrs() {
        let line = r#":ruby[漢字(かんじ)]{.furigana lang="ja"} rest"#;
        let (directive, start, end) = parse_line(line).unwrap();
        assert_eq!(directive.name, "ruby");
        assert_eq!(directive.args.classes, vec!["furigana"]);
        assert_eq!(directive.args.get("lang"), Some("ja"));
        assert_eq!(&line[start..end], r#":ruby[漢字(かんじ)]{.furigana lang="ja"}"#);
    }

    #[test]
    fn test_empty_content() {
        let (name, content, _, _) = parse(":ruby[]").unwrap();
        assert_eq!(name, "ruby");
        assert_eq!(content, "");
    }

    #[test]
    fn test_nested_brackets() {
        let (_, content, _, _) = parse(":ruby[[a](b)]").unwrap();
        assert_eq!(content, "[a](b)");
    }

    #[test]
    fn test_requires_brackets() {
        assert!(parse(":ruby").is_none());
        assert!(parse("time 10:30").is_none());
        assert!(parse(":ruby[unclosed").is_none());
    }

    #[test]
    fn test_skips_earlier_colons() {
        let (name, content, start, _) = parse("Note: see :kbd[Esc]").unwrap();
        assert_eq!(name, "kbd");
        assert_eq!(content, "Esc");
        assert_eq!(start, 10);
    }

    #[test]
    fn test_leaf_and_container_markers_are_not_inline() {
        assert!(parse("::youtube[id]").is_none());
        assert!(parse(":::note[Title]").is_none());
    }

    #[test]
    fn test_invalid_name() {
        assert!(parse(":[content]").is_none());
        assert!(parse(":foo@bar[content]").is_none());
    }

    #[test]
    fn test_code_span_is_skipped() {
        assert!(parse("`:ruby[a(b)]`").is_none());
        assert!(parse("``code ` :ruby[a(b)]``").is_none());

        let (_, content, _, _) = parse("`code` :ruby[a(b)]").unwrap();
        assert_eq!(content, "a(b)");
    }

    #[test]
    fn test_unmatched_backtick_is_literal() {
        let (_, content, _, _) = parse("a ` b :ruby[x(y)]").unwrap();
        assert_eq!(content, "x(y)");
    }

    #[test]
    fn test_multiple_directives_finds_first() {
        let (name, content, start, _) = parse(":a[1] :b[2]").unwrap();
        assert_eq!(name, "a");
        assert_eq!(content, "1");
        assert_eq!(start, 0);
    }

    #[test]
    fn test_parse_delimited() {
        assert_eq!(parse_delimited("[hello] rest", '[', ']'), Some(("hello", 7)));
        assert_eq!(parse_delimited("{#id}", '{', '}'), Some(("#id", 5)));
        assert_eq!(parse_delimited("no brackets", '[', ']'), None);
        assert_eq!(parse_delimited("[unclosed", '[', ']'), None);
    }

    #[test]
    fn test_not_directive() {
        assert!(parse("regular text").is_none());
        assert!(parse("").is_none());
    }
}
