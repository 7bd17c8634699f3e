//! Ruby annotation directive for markdown.
//!
//! Rewrites the inline directive `:ruby[base(reading)]` into semantic ruby
//! markup with parenthetical fallback for renderers without ruby support:
//!
//! ```html
//! <ruby>base<rp>(</rp><rt>reading</rt><rp>)</rp></ruby>
//! ```
//!
//! # Architecture
//!
//! - [`RubyTransformer`]: turns one [`DirectiveNode`] into a replacement [`Node`]
//! - [`splice_directives`]: replaces directive nodes inside a node tree
//! - [`directive`]: line-based `:name[content]{attrs}` preprocessing with
//!   pluggable [`InlineDirective`](directive::InlineDirective) handlers
//! - [`MarkdownRenderer`]: directive preprocessing followed by pulldown-cmark
//!
//! # Example
//!
//! ```
//! use rd_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render("とある科学の:ruby[超電磁砲(レールガン)]");
//! assert_eq!(
//!     result.html,
//!     "<p>とある科学の<ruby>超電磁砲<rp>(</rp><rt>レールガン</rt><rp>)</rp></ruby></p>\n"
//! );
//! ```

pub mod directive;
mod node;
mod renderer;
mod ruby;

pub use node::{DirectiveNode, Element, Node, escape_html};
pub use renderer::{MarkdownRenderer, RenderResult, render_markdown};
pub use ruby::{
    DEFAULT_FALLBACK_TAG, ParenStyle, RUBY_DIRECTIVE, RubyAnnotation, RubyDirective,
    RubyTransformer, split_ruby, splice_directives,
};
