//! Directive processor for `CommonMark` inline directives.
//!
//! Expands directives line by line before pulldown-cmark parsing.
//!
//! With deferred HTML enabled, handler output is swapped for a placeholder so
//! the markdown parser never sees it, and [`DirectiveProcessor::post_process`]
//! puts it back into the rendered HTML.

use std::fmt::Write;
use std::path::PathBuf;

use super::fence::FenceTracker;
use super::parser::{ParsedDirective, parse_line};
use super::{DirectiveContext, DirectiveOutput, InlineDirective};

/// Configuration for the directive processor.
#[derive(Debug, Default)]
pub struct DirectiveProcessorConfig {
    /// Path to the source file being rendered (if known).
    ///
    /// Used in warning locations.
    pub source_path: Option<PathBuf>,

    /// Emit placeholders instead of handler HTML.
    ///
    /// Raw HTML in markdown source is reinterpreted by the parser: a block
    /// tag at the start of a line opens an HTML block and markdown inside
    /// handler output gets rendered. Placeholders are plain text to the
    /// parser.
    pub defer_html: bool,
}

impl DirectiveProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Enable or disable placeholder output.
    #[must_use]
    pub fn with_deferred_html(mut self, enabled: bool) -> Self {
        self.defer_html = enabled;
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            line,
        }
    }
}

const PLACEHOLDER_PREFIX: &str = "{{DIRECTIVE_";
const PLACEHOLDER_SUFFIX: &str = "}}";

/// Processor for inline `CommonMark` directives.
///
/// # Example
///
/// ```
/// use rd_renderer::RubyDirective;
/// use rd_renderer::directive::DirectiveProcessor;
///
/// let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());
///
/// let output = processor.process("今日は:ruby[晴(は)]れ");
/// assert_eq!(output, "今日は<ruby>晴<rp>(</rp><rt>は</rt><rp>)</rp></ruby>れ");
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    inline_handlers: Vec<Box<dyn InlineDirective>>,
    fence: FenceTracker,
    fragments: Vec<String>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a new directive processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    /// Create a new directive processor with custom configuration.
    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            inline_handlers: Vec::new(),
            fence: FenceTracker::new(),
            fragments: Vec::new(),
        }
    }

    /// Register an inline directive handler.
    ///
    /// When several handlers share a name, the first registered wins.
    #[must_use]
    pub fn with_inline<D: InlineDirective + 'static>(mut self, handler: D) -> Self {
        self.inline_handlers.push(Box::new(handler));
        self
    }

    /// Preprocess markdown, replacing inline directives with handler output.
    ///
    /// LF and CRLF line endings are preserved. Fenced code blocks pass through
    /// unchanged.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for (idx, chunk) in input.split_inclusive('\n').enumerate() {
            let line = chunk
                .strip_suffix('\n')
                .map_or(chunk, |line| line.strip_suffix('\r').unwrap_or(line));
            let processed = self.process_line(line, idx + 1);
            output.push_str(&processed);
            output.push_str(&chunk[line.len()..]);
        }

        output
    }

    /// Replace placeholders in rendered HTML with the deferred handler output.
    ///
    /// Placeholders with no recorded fragment are left as they are.
    pub fn post_process(&self, html: &mut String) {
        if self.fragments.is_empty() {
            return;
        }

        let mut output = String::with_capacity(html.len());
        let mut rest = html.as_str();

        while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
            output.push_str(&rest[..start]);
            let after = &rest[start + PLACEHOLDER_PREFIX.len()..];

            let fragment = after.find(PLACEHOLDER_SUFFIX).and_then(|end| {
                let index: usize = after[..end].parse().ok()?;
                Some((self.fragments.get(index)?, end))
            });

            match fragment {
                Some((fragment, end)) => {
                    output.push_str(fragment);
                    rest = &after[end + PLACEHOLDER_SUFFIX.len()..];
                }
                None => {
                    output.push_str(PLACEHOLDER_PREFIX);
                    rest = after;
                }
            }
        }

        output.push_str(rest);
        *html = output;
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        let is_fence_marker = self.fence.update(line);

        // Skip directive processing inside code fences
        if is_fence_marker || self.fence.in_fence() {
            return line.to_owned();
        }

        self.process_inline_directives(line, line_num)
    }

    fn process_inline_directives(&mut self, line: &str, line_num: usize) -> String {
        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while let Some((directive, start, end)) = parse_line(remaining) {
            result.push_str(&remaining[..start]);

            match self.dispatch(directive, line_num) {
                DirectiveOutput::Html(html) => self.emit(html, &mut result),
                DirectiveOutput::Skip => result.push_str(&remaining[start..end]),
            }

            remaining = &remaining[end..];
        }

        result.push_str(remaining);
        result
    }

    fn emit(&mut self, html: String, output: &mut String) {
        if self.config.defer_html {
            let _ = write!(
                output,
                "{PLACEHOLDER_PREFIX}{}{PLACEHOLDER_SUFFIX}",
                self.fragments.len()
            );
            self.fragments.push(html);
        } else {
            output.push_str(&html);
        }
    }

    fn dispatch(&mut self, directive: ParsedDirective, line_num: usize) -> DirectiveOutput {
        let ParsedDirective { name, args } = directive;
        let ctx = self.config.create_context(line_num);

        match self.inline_handlers.iter_mut().find(|h| h.name() == name) {
            Some(handler) => handler.process(args, &ctx),
            None => {
                tracing::trace!(line = line_num, name = %name, "No handler for inline directive");
                DirectiveOutput::Skip
            }
        }
    }

    /// Get all warnings generated by the registered handlers.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.inline_handlers
            .iter()
            .flat_map(|h| h.warnings().iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RubyDirective;
    use crate::directive::DirectiveArgs;

    struct TestKbd;

    impl InlineDirective for TestKbd {
        fn name(&self) -> &'static str {
            "kbd"
        }

        fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
            DirectiveOutput::html(format!("<kbd>{}</kbd>", args.content))
        }
    }

    struct Declining;

    impl InlineDirective for Declining {
        fn name(&self) -> &'static str {
            "ruby"
        }

        fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
            DirectiveOutput::Skip
        }
    }

    #[test]
    fn test_inline_directive() {
        let mut processor = DirectiveProcessor::new().with_inline(TestKbd);

        let output = processor.process("Press :kbd[Ctrl+C] to copy.");
        assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
    }

    #[test]
    fn test_multiple_directives_in_line() {
        let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());

        let output = processor.process(":ruby[猫(ねこ)]と:ruby[犬（いぬ）]");
        assert_eq!(
            output,
            "<ruby>猫<rp>(</rp><rt>ねこ</rt><rp>)</rp></ruby>と\
             <ruby>犬<rp>（</rp><rt>いぬ</rt><rp>）</rp></ruby>"
        );
    }

    #[test]
    fn test_handlers_dispatch_by_name() {
        let mut processor = DirectiveProcessor::new()
            .with_inline(TestKbd)
            .with_inline(RubyDirective::new());

        let output = processor.process(":kbd[K] :ruby[字(じ)]");
        assert_eq!(
            output,
            "<kbd>K</kbd> <ruby>字<rp>(</rp><rt>じ</rt><rp>)</rp></ruby>"
        );
    }

    #[test]
    fn test_unknown_directive_passthrough() {
        let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());

        let output = processor.process(":unknown[content]{.x}");
        assert_eq!(output, ":unknown[content]{.x}");
    }

    #[test]
    fn test_skip_passes_through_original_text() {
        let mut processor = DirectiveProcessor::new().with_inline(Declining);

        let output = processor.process("a :ruby[字(じ)]{#id} b");
        assert_eq!(output, "a :ruby[字(じ)]{#id} b");
    }

    #[test]
    fn test_attributes_are_consumed() {
        let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());

        let output = processor.process(r#":ruby[字(じ)]{lang="ja"}!"#);
        assert_eq!(output, "<ruby>字<rp>(</rp><rt>じ</rt><rp>)</rp></ruby>!");
    }

    #[test]
    fn test_code_fence_skipping() {
        let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());

        let input = "```\n:ruby[字(じ)]\n```\n:ruby[字(じ)]";
        let output = processor.process(input);

        assert_eq!(
            output,
            "```\n:ruby[字(じ)]\n```\n<ruby>字<rp>(</rp><rt>じ</rt><rp>)</rp></ruby>"
        );
    }

    #[test]
    fn test_preserves_trailing_newline() {
        let mut processor = DirectiveProcessor::new();

        assert_eq!(processor.process("a\nb\n"), "a\nb\n");
        assert_eq!(processor.process("a\nb"), "a\nb");
        assert_eq!(processor.process(""), "");
    }

    #[test]
    fn test_preserves_crlf_line_endings() {
        let mut processor = DirectiveProcessor::new().with_inline(RubyDirective::new());

        assert_eq!(processor.process("a\r\nb\r\n"), "a\r\nb\r\n");
        assert_eq!(
            processor.process("```\r\n:ruby[字(じ)]\r\n```\r\n:ruby[字(じ)]\r\n"),
            "```\r\n:ruby[字(じ)]\r\n```\r\n<ruby>字<rp>(</rp><rt>じ</rt><rp>)</rp></ruby>\r\n"
        );
    }

    #[test]
    fn test_deferred_html_uses_placeholders() {
        let config = DirectiveProcessorConfig::new().with_deferred_html(true);
        let mut processor = DirectiveProcessor::with_config(config).with_inline(TestKbd);

        let output = processor.process(":kbd[A] and :kbd[B]\n:unknown[x]");
        assert_eq!(output, "{{DIRECTIVE_0}} and {{DIRECTIVE_1}}\n:unknown[x]");

        let mut html = format!("<p>{output}</p>");
        processor.post_process(&mut html);
        assert_eq!(html, "<p><kbd>A</kbd> and <kbd>B</kbd>\n:unknown[x]</p>");
    }

    #[test]
    fn test_post_process_leaves_unknown_placeholders() {
        let config = DirectiveProcessorConfig::new().with_deferred_html(true);
        let mut processor = DirectiveProcessor::with_config(config).with_inline(TestKbd);
        let _output = processor.process(":kbd[A]");

        let mut html = "{{DIRECTIVE_0}} {{DIRECTIVE_7}} {{DIRECTIVE_x}} {{DIRECTIVE_".to_owned();
        processor.post_process(&mut html);
        assert_eq!(
            html,
            "<kbd>A</kbd> {{DIRECTIVE_7}} {{DIRECTIVE_x}} {{DIRECTIVE_"
        );
    }

    #[test]
    fn test_warnings_carry_location() {
        let config = DirectiveProcessorConfig::new().with_source_path("docs/anime.md");
        let mut processor =
            DirectiveProcessor::with_config(config).with_inline(RubyDirective::new());

        let _output = processor.process("ok :ruby[字(じ)]\n\n:ruby[no reading]");
        let warnings = processor.warnings();

        assert_eq!(
            warnings,
            vec!["docs/anime.md:3: :ruby[no reading] has no reading in parentheses".to_owned()]
        );
    }

    #[test]
    fn test_config_builder() {
        let config = DirectiveProcessorConfig::new().with_source_path("/docs/guide.md");
        assert_eq!(config.source_path, Some(PathBuf::from("/docs/guide.md")));
        assert!(!config.defer_html);
        assert!(config.with_deferred_html(true).defer_html);
    }
}
