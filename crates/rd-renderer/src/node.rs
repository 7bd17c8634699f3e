//! Inline node tree handed between the directive host and the ruby transformer.
//!
//! The tree holds text, generic elements, and directive nodes that have not
//! been expanded yet. It serializes to HTML with text escaping.

use std::fmt::Write;

/// An inline node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Literal text (escaped on serialization).
    Text(String),
    /// Generic element such as `ruby`, `rt`, `rp` or a fallback container.
    Element(Element),
    /// Directive that has not been transformed.
    Directive(DirectiveNode),
}

/// A generic element with a tag name and ordered children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name, e.g. `ruby`.
    pub tag: String,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

/// An inline directive instance: `:name[children]`.
///
/// # Example
///
/// ```
/// use rd_renderer::{DirectiveNode, Node};
///
/// let node = DirectiveNode::with_text("ruby", "漢字(かんじ)");
/// assert_eq!(node.name, "ruby");
/// assert_eq!(node.text_content(), "漢字(かんじ)");
/// assert_eq!(Node::Directive(node).to_html(), ":ruby[漢字(かんじ)]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveNode {
    /// Directive name as written after the colon.
    pub name: String,
    /// Inline content from the brackets.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create an element node.
    #[must_use]
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            children,
        })
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(Element { children, .. })
            | Self::Directive(DirectiveNode { children, .. }) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize to an HTML string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append the HTML serialization of this node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Element(element) => {
                let _ = write!(out, "<{}>", element.tag);
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
            Self::Directive(directive) => {
                let _ = write!(out, ":{}[", directive.name);
                for child in &directive.children {
                    child.write_html(out);
                }
                out.push(']');
            }
        }
    }
}

impl DirectiveNode {
    /// Create a directive node.
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Create a directive node with a single text child.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, vec![Node::text(text)])
    }

    /// Concatenated text of all children.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// Escape HTML special characters in text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
