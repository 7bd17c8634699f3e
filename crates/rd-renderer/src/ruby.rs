//! Ruby annotation directive.
//!
//! Rewrites `:ruby[base(reading)]` into semantic ruby markup:
//!
//! ```html
//! <ruby>base<rp>(</rp><rt>reading</rt><rp>)</rp></ruby>
//! ```
//!
//! Both half-width `()` and full-width `（）` parentheses are recognized and the
//! `<rp>` fallback keeps whichever form the author wrote. Content without a
//! reading degrades to a plain container holding the original text.
//!
//! Only the first `base(reading)` group is used. Anything after its closing
//! parenthesis is dropped, so `:ruby[a(b)c(d)]` renders the same as
//! `:ruby[a(b)]`.

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
use crate::node::{DirectiveNode, Element, Node};

/// Default directive name.
pub const RUBY_DIRECTIVE: &str = "ruby";

/// Default container tag for content without a reading.
pub const DEFAULT_FALLBACK_TAG: &str = "div";

/// Parenthesis width used around a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParenStyle {
    /// ASCII `(` and `)`.
    HalfWidth,
    /// CJK `（` and `）`.
    FullWidth,
}

impl ParenStyle {
    /// Match order: half-width first.
    const ALTERNATIVES: [Self; 2] = [Self::HalfWidth, Self::FullWidth];

    /// Opening parenthesis.
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            Self::HalfWidth => '(',
            Self::FullWidth => '（',
        }
    }

    /// Closing parenthesis.
    #[must_use]
    pub const fn close(self) -> char {
        match self {
            Self::HalfWidth => ')',
            Self::FullWidth => '）',
        }
    }
}

fn is_paren(c: char) -> bool {
    matches!(c, '(' | ')' | '（' | '）')
}

/// Base text and reading split out of directive content.
///
/// Neither `base` nor `reading` is empty and neither contains a parenthesis of
/// either width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RubyAnnotation<'a> {
    /// Annotated text.
    pub base: &'a str,
    /// Text inside the parentheses.
    pub reading: &'a str,
    /// Parenthesis width that matched.
    pub style: ParenStyle,
    /// Content after the closing parenthesis. Not rendered.
    pub rest: &'a str,
}

impl RubyAnnotation<'_> {
    /// Build the `<ruby>` node: base, `<rp>`, `<rt>`, `<rp>`.
    #[must_use]
    pub fn to_node(&self) -> Node {
        Node::element(
            "ruby",
            vec![
                Node::text(self.base),
                Node::element("rp", vec![Node::text(self.style.open())]),
                Node::element("rt", vec![Node::text(self.reading)]),
                Node::element("rp", vec![Node::text(self.style.close())]),
            ],
        )
    }
}

/// Split directive content into base text and reading.
///
/// Tries half-width parentheses, then full-width; the first alternative that
/// matches wins. Returns `None` when the content does not start with
/// `base(reading)`.
///
/// # Example
///
/// ```
/// use rd_renderer::{ParenStyle, split_ruby};
///
/// let annotation = split_ruby("超電磁砲（レールガン）").unwrap();
/// assert_eq!(annotation.base, "超電磁砲");
/// assert_eq!(annotation.reading, "レールガン");
/// assert_eq!(annotation.style, ParenStyle::FullWidth);
///
/// assert!(split_ruby("no reading here").is_none());
/// ```
#[must_use]
pub fn split_ruby(content: &str) -> Option<RubyAnnotation<'_>> {
    ParenStyle::ALTERNATIVES
        .into_iter()
        .find_map(|style| split_with(content, style))
}

fn split_with(content: &str, style: ParenStyle) -> Option<RubyAnnotation<'_>> {
    let open = content.find(is_paren)?;
    let base = &content[..open];
    let after_open = content[open..].strip_prefix(style.open())?;

    let close = after_open.find(is_paren)?;
    let reading = &after_open[..close];
    let rest = after_open[close..].strip_prefix(style.close())?;

    if base.is_empty() || reading.is_empty() {
        return None;
    }

    Some(RubyAnnotation {
        base,
        reading,
        style,
        rest,
    })
}

/// Transforms ruby directive nodes into ruby markup.
///
/// The transformer holds no per-document state and can be shared freely.
///
/// # Example
///
/// ```
/// use rd_renderer::{DirectiveNode, RubyTransformer};
///
/// let transformer = RubyTransformer::new();
/// let node = DirectiveNode::with_text("ruby", "漢字(かんじ)");
/// let html = transformer.transform(&node).unwrap().to_html();
/// assert_eq!(html, "<ruby>漢字<rp>(</rp><rt>かんじ</rt><rp>)</rp></ruby>");
/// ```
#[derive(Clone, Debug)]
pub struct RubyTransformer {
    name: String,
    fallback_tag: String,
}

impl Default for RubyTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl RubyTransformer {
    /// Create a transformer for `:ruby` with a `div` fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: RUBY_DIRECTIVE.to_owned(),
            fallback_tag: DEFAULT_FALLBACK_TAG.to_owned(),
        }
    }

    /// Recognize a different directive name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Use a different container tag for content without a reading.
    #[must_use]
    pub fn with_fallback_tag(mut self, tag: impl Into<String>) -> Self {
        self.fallback_tag = tag.into();
        self
    }

    /// Recognized directive name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fallback container tag.
    #[must_use]
    pub fn fallback_tag(&self) -> &str {
        &self.fallback_tag
    }

    /// Transform a directive node.
    ///
    /// Returns `None` if the node's name is not the recognized one; the caller
    /// should leave such nodes untouched. Otherwise returns the replacement node.
    #[must_use]
    pub fn transform(&self, node: &DirectiveNode) -> Option<Node> {
        if node.name != self.name {
            return None;
        }
        Some(self.transform_content(&node.text_content()))
    }

    /// Transform flattened directive content.
    ///
    /// Produces a `<ruby>` node when the content starts with `base(reading)`,
    /// and the fallback container wrapping `content` unchanged otherwise.
    #[must_use]
    pub fn transform_content(&self, content: &str) -> Node {
        match split_ruby(content) {
            Some(annotation) => annotation.to_node(),
            None => Node::element(self.fallback_tag.as_str(), vec![Node::text(content)]),
        }
    }
}

/// Replace matching directive nodes in `nodes` with the transformer output.
///
/// Descends into elements. Directives with other names are left in place and
/// their children are not visited. Returns the number of replaced nodes.
///
/// # Example
///
/// ```
/// use rd_renderer::{DirectiveNode, Node, RubyTransformer, splice_directives};
///
/// let mut nodes = vec![
///     Node::text("read "),
///     Node::Directive(DirectiveNode::with_text("ruby", "明日(あした)")),
/// ];
/// assert_eq!(splice_directives(&mut nodes, &RubyTransformer::new()), 1);
/// assert!(matches!(&nodes[1], Node::Element(e) if e.tag == "ruby"));
/// ```
pub fn splice_directives(nodes: &mut [Node], transformer: &RubyTransformer) -> usize {
    let mut replaced = 0;

    for node in nodes.iter_mut() {
        match node {
            Node::Directive(directive) => {
                if let Some(replacement) = transformer.transform(directive) {
                    *node = replacement;
                    replaced += 1;
                }
            }
            Node::Element(Element { children, .. }) => {
                replaced += splice_directives(children, transformer);
            }
            Node::Text(_) => {}
        }
    }

    replaced
}

/// Inline directive handler that renders `:ruby[base(reading)]` to HTML.
///
/// Content without a reading is rendered with the fallback container and
/// reported through [`warnings`](InlineDirective::warnings).
#[derive(Debug, Default)]
pub struct RubyDirective {
    transformer: RubyTransformer,
    warnings: Vec<String>,
}

impl RubyDirective {
    /// Create a handler for `:ruby` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler around a configured transformer.
    #[must_use]
    pub fn with_transformer(transformer: RubyTransformer) -> Self {
        Self {
            transformer,
            warnings: Vec::new(),
        }
    }
}

impl InlineDirective for RubyDirective {
    fn name(&self) -> &str {
        self.transformer.name()
    }

    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        let directive = DirectiveNode::with_text(self.transformer.name(), args.content);
        let content = directive.text_content();

        match split_ruby(&content) {
            Some(annotation) if !annotation.rest.is_empty() => {
                tracing::debug!(
                    line = ctx.line,
                    dropped = annotation.rest,
                    "Ignoring text after the first ruby reading"
                );
            }
            Some(_) => {}
            None => {
                tracing::debug!(line = ctx.line, content = %content, "Ruby directive has no reading");
                self.warnings.push(format!(
                    "{}: :{}[{content}] has no reading in parentheses",
                    ctx.location(),
                    directive.name
                ));
            }
        }

        match self.transformer.transform(&directive) {
            Some(node) => DirectiveOutput::html(node.to_html()),
            None => DirectiveOutput::Skip,
        }
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
