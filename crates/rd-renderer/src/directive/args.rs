//! Directive argument parsing.
//!
//! Parses the `[content]{#id .class key="value"}` part of a directive.

use std::collections::HashMap;

/// Parsed arguments from directive syntax.
///
/// Represents the content and attributes extracted from a directive:
/// `:name[content]{#id .class key="value"}`
///
/// # Example
///
/// ```
/// use rd_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("漢字(かんじ)", r#"#kanji .furigana lang="ja""#);
/// assert_eq!(args.content, "漢字(かんじ)");
/// assert_eq!(args.id.as_deref(), Some("kanji"));
/// assert_eq!(args.classes, vec!["furigana"]);
/// assert_eq!(args.get("lang"), Some("ja"));
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from brackets: `[content]` (empty string if not provided).
    pub content: String,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value attributes: `{key="value"}`.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse content and attributes string into structured arguments.
    ///
    /// `attrs_str` is the text between the braces, without the braces.
    /// Unrecognized characters in it are skipped.
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('#') {
                let (id, rest) = split_shorthand(rest);
                args.id = Some(id.to_owned());
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let (class, rest) = split_shorthand(rest);
                args.classes.push(class.to_owned());
                remaining = rest;
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                let skip = remaining.chars().next().map_or(0, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Split an `#id` or `.class` value from the rest of the attributes.
///
/// The value ends at whitespace or at the next `#`/`.` shorthand.
fn split_shorthand(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let (key, after_eq) = s.split_once('=')?;
    let key = key.trim();

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    for quote in ['"', '\''] {
        if let Some(quoted) = after_eq.strip_prefix(quote) {
            let (value, rest) = quoted.split_once(quote)?;
            return Some((key, value, rest));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    let (value, rest) = after_eq.split_at(end);
    Some((key, value, rest))
}
