//! Inline directive pipeline for `CommonMark` directive syntax.
//!
//! Directives are expanded in a preprocessing pass, before pulldown-cmark sees
//! the document. Each `:name[content]{attrs}` occurrence is dispatched to the
//! [`InlineDirective`] registered under `name`; its HTML output is spliced into
//! the line and passes through pulldown-cmark as inline HTML.
//!
//! Directives inside fenced code blocks and inline code spans are left alone, as
//! are directives no handler is registered for.
//!
//! # Example
//!
//! ```
//! use rd_renderer::directive::{
//!     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, InlineDirective,
//! };
//!
//! struct KbdDirective;
//!
//! impl InlineDirective for KbdDirective {
//!     fn name(&self) -> &str { "kbd" }
//!
//!     fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
//!         DirectiveOutput::html(format!("<kbd>{}</kbd>", args.content))
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new().with_inline(KbdDirective);
//!
//! let output = processor.process("Press :kbd[Ctrl+C] to copy.");
//! assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
//! ```

mod args;
mod context;
mod fence;
mod inline;
mod output;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use inline::InlineDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig};
