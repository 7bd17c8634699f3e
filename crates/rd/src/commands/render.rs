//! `rd render` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rd_config::{CliSettings, Config};
use rd_renderer::{MarkdownRenderer, RubyTransformer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directive name to recognize (overrides config).
    #[arg(long)]
    directive: Option<String>,

    /// Container tag for content without a reading (overrides config).
    #[arg(long)]
    fallback_tag: Option<String>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or input/output cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            directive: self.directive,
            fallback_tag: self.fallback_tag,
            gfm: self.no_gfm.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let input = self.input.filter(|path| path != Path::new("-"));
        let markdown = read_input(input.as_deref())?;

        let transformer = RubyTransformer::new()
            .with_name(config.ruby.directive.as_str())
            .with_fallback_tag(config.ruby.fallback_tag.as_str());
        let mut renderer = MarkdownRenderer::new()
            .with_transformer(transformer)
            .with_gfm(config.markdown.gfm);
        if let Some(path) = &input {
            renderer = renderer.with_source_path(path);
        }

        let result = renderer.render(&markdown);
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        write_output(self.output.as_deref(), &result.html)?;
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }

        Ok(())
    }
}

/// Read markdown from a file, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

/// Write HTML to a file, or to stdout when no path is given.
fn write_output(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(input: PathBuf, output: PathBuf, config: PathBuf) -> RenderArgs {
        RenderArgs {
            input: Some(input),
            output: Some(output),
            config: Some(config),
            directive: None,
            fallback_tag: None,
            no_gfm: false,
            verbose: false,
        }
    }

    #[test]
    fn test_render_file_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("page.md");
        let output = temp_dir.path().join("page.html");
        let config = temp_dir.path().join("rd.toml");
        std::fs::write(&input, ":ruby[超電磁砲（レールガン）]\n").unwrap();
        std::fs::write(&config, "").unwrap();

        args(input, output.clone(), config).execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<p><ruby>超電磁砲<rp>（</rp><rt>レールガン</rt><rp>）</rp></ruby></p>\n"
        );
    }

    #[test]
    fn test_render_uses_config_and_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("page.md");
        let output = temp_dir.path().join("page.html");
        let config = temp_dir.path().join("rd.toml");
        std::fs::write(&input, ":furigana[plain] :ruby[字(じ)]\n").unwrap();
        std::fs::write(&config, "[ruby]\ndirective = \"furigana\"\n").unwrap();

        let mut render = args(input, output.clone(), config);
        render.fallback_tag = Some("span".to_owned());
        render.execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<p><span>plain</span> :ruby[字(じ)]</p>\n"
        );
    }

    #[test]
    fn test_missing_input_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = temp_dir.path().join("rd.toml");
        std::fs::write(&config, "").unwrap();

        let err = args(
            temp_dir.path().join("missing.md"),
            temp_dir.path().join("out.html"),
            config,
        )
        .execute()
        .unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("page.md");
        let config = temp_dir.path().join("rd.toml");
        std::fs::write(&input, "").unwrap();
        std::fs::write(&config, "").unwrap();

        let mut render = args(input, temp_dir.path().join("out.html"), config);
        render.directive = Some("bad name".to_owned());

        let err = render.execute().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
