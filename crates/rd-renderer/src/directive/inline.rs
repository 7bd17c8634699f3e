//! Inline directive trait.
//!
//! Inline directives use single-colon syntax: `:name[content]{attrs}`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for inline directives: `:name[content]{attrs}`
///
/// Inline directives appear within text flow and produce inline HTML elements.
/// They are processed during the preprocessing phase before pulldown-cmark parsing.
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance.
///
/// # Example
///
/// ```
/// use rd_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// struct AbbrDirective;
///
/// impl InlineDirective for AbbrDirective {
///     fn name(&self) -> &str { "abbr" }
///
///     fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         match args.get("title") {
///             Some(title) => DirectiveOutput::html(format!(
///                 r#"<abbr title="{title}">{}</abbr>"#,
///                 args.content
///             )),
///             None => DirectiveOutput::Skip,
///         }
///     }
/// }
/// ```
pub trait InlineDirective: Send {
    /// Directive name (e.g., "ruby", "kbd").
    ///
    /// This is matched against the directive syntax: `:name[...]`
    fn name(&self) -> &str;

    /// Process the inline directive.
    ///
    /// Returns [`DirectiveOutput::Html`] to emit HTML, [`DirectiveOutput::Skip`]
    /// to pass through unchanged.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;

    /// Get warnings generated during processing.
    ///
    /// Override this method if your directive can produce warnings.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
