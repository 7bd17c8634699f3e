//! Markdown to HTML rendering with ruby directive support.

use std::path::PathBuf;

use pulldown_cmark::{Options, Parser};

use crate::directive::{DirectiveProcessor, DirectiveProcessorConfig};
use crate::ruby::{RubyDirective, RubyTransformer};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Warnings generated while expanding directives.
    pub warnings: Vec<String>,
}

/// Markdown renderer that expands `:ruby[...]` around pulldown-cmark.
///
/// Directives are swapped for placeholders before parsing and their HTML is
/// spliced into the output afterwards, so ruby and fallback markup never
/// interact with markdown block structure.
///
/// # Example
///
/// ```
/// use rd_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new().render(":ruby[超電磁砲（レールガン）]");
/// assert_eq!(
///     result.html,
///     "<p><ruby>超電磁砲<rp>（</rp><rt>レールガン</rt><rp>）</rp></ruby></p>\n"
/// );
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    transformer: RubyTransformer,
    source_path: Option<PathBuf>,
    gfm: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer for `:ruby` with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformer: RubyTransformer::new(),
            source_path: None,
            gfm: true,
        }
    }

    /// Use a configured ruby transformer.
    #[must_use]
    pub fn with_transformer(mut self, transformer: RubyTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    /// Set the source file path reported in warnings.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown to HTML.
    ///
    /// Each call uses a fresh directive processor, so warnings only cover
    /// this document.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut config = DirectiveProcessorConfig::new().with_deferred_html(true);
        config.source_path.clone_from(&self.source_path);
        let mut processor = DirectiveProcessor::with_config(config)
            .with_inline(RubyDirective::with_transformer(self.transformer.clone()));

        let expanded = processor.process(markdown);

        let parser = Parser::new_ext(&expanded, self.parser_options());
        let mut html = String::with_capacity(expanded.len() + expanded.len() / 2);
        pulldown_cmark::html::push_html(&mut html, parser);
        processor.post_process(&mut html);

        let warnings = processor.warnings();
        tracing::debug!(
            directive = self.transformer.name(),
            warnings = warnings.len(),
            "Rendered markdown"
        );

        RenderResult { html, warnings }
    }
}

/// Render markdown with the default `:ruby` renderer and return the HTML.
///
/// # Example
///
/// ```
/// let html = rd_renderer::render_markdown("明日(あした)は:ruby[明日(あした)]");
/// assert!(html.contains("<rt>あした</rt>"));
/// ```
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown).html
}
