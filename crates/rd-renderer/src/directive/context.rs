//! Directive processing context.

use std::path::Path;

/// Source location handed to directive handlers.
///
/// Created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// directive so handlers can point warnings at the offending line.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use rd_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("docs/guide.md")),
///     line: 42,
/// };
///
/// assert_eq!(ctx.location(), "docs/guide.md:42");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DirectiveContext<'a> {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
}

impl DirectiveContext<'_> {
    /// Human-readable location: `path:line` or `line N`.
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("line {}", self.line),
        }
    }
}
