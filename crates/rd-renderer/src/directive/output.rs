//! Directive output types.

/// Output from an inline directive handler.
///
/// # Example
///
/// ```
/// use rd_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<ruby>漢字<rt>かんじ</rt></ruby>");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
///
/// // Leave the directive text as written
/// let output = DirectiveOutput::Skip;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that replaces the directive and passes through pulldown-cmark unchanged.
    Html(String),
    /// Don't handle this directive (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html() {
        let output = DirectiveOutput::html("<rt>よみ</rt>");
        assert_eq!(output, DirectiveOutput::Html("<rt>よみ</rt>".to_owned()));
    }

    #[test]
    fn test_skip_is_not_html() {
        assert_ne!(DirectiveOutput::Skip, DirectiveOutput::html(""));
    }
}
