//! The renderer boundary: the external collaborator that turns assembled
//! markup into the artifact file.
//!
//! The compiler never implements layout or pagination itself — it hands a
//! single markup string to a [`ReportRenderer`] and receives success or an
//! error description back. Two implementations ship with the crate:
//!
//! * [`CommandRenderer`] — runs an external HTML-to-PDF command
//!   (wkhtmltopdf by default; any engine via a command template).
//! * [`HtmlRenderer`] — writes the markup itself as the artifact; useful
//!   when a separate print step does the pagination, and in tests.
//!
//! Custom engines implement the trait and are injected through
//! [`crate::config::CompileConfig::renderer`].

use crate::error::RenderError;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Renders assembled report markup into an artifact file.
///
/// Implementations own layout, pagination mechanics, and the artifact's
/// binary encoding. A failed render must not leave a plausible-looking
/// artifact behind; callers treat any `Err` as "artifact absent or
/// untrustworthy".
pub trait ReportRenderer: Send + Sync {
    /// Render `markup` into the file at `artifact`.
    fn render(&self, markup: &str, artifact: &Path) -> Result<(), RenderError>;
}

// ── HtmlRenderer ─────────────────────────────────────────────────────────

/// Writes the assembled markup directly to the artifact path.
///
/// The pagination hints (page-break divs, `@page` footer rule) stay in the
/// document as CSS, so printing the HTML later still paginates correctly.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn render(&self, markup: &str, artifact: &Path) -> Result<(), RenderError> {
        std::fs::write(artifact, markup).map_err(|e| RenderError::ArtifactWrite {
            path: artifact.to_path_buf(),
            source: e,
        })
    }
}

// ── CommandRenderer ──────────────────────────────────────────────────────

/// Runs an external rendering command over a staged markup file.
///
/// The command template is a whitespace-split program + argument list in
/// which `{input}` is replaced by the staged HTML file and `{output}` by
/// the artifact path. The markup is staged in a temp file because every
/// common engine (wkhtmltopdf, weasyprint, prince) takes file paths, and a
/// temp file survives long enough for the child process while cleaning
/// itself up afterwards.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// The default engine: `wkhtmltopdf --quiet {input} {output}`.
    pub fn wkhtmltopdf() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
            args: vec!["--quiet".into(), "{input}".into(), "{output}".into()],
        }
    }

    /// Build a renderer from a command template string, e.g.
    /// `"weasyprint {input} {output}"`.
    ///
    /// If the template names no `{input}`/`{output}` placeholders they are
    /// appended in that order, so a bare program name like `"weasyprint"`
    /// works too. Returns None for an empty template.
    pub fn from_template(template: &str) -> Option<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        let mut args: Vec<String> = parts.collect();
        if !args.iter().any(|a| a.contains("{input}")) {
            args.push("{input}".into());
        }
        if !args.iter().any(|a| a.contains("{output}")) {
            args.push("{output}".into());
        }
        Some(Self { program, args })
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        self.args
            .iter()
            .map(|a| {
                a.replace("{input}", &input.to_string_lossy())
                    .replace("{output}", &output.to_string_lossy())
            })
            .collect()
    }
}

impl ReportRenderer for CommandRenderer {
    fn render(&self, markup: &str, artifact: &Path) -> Result<(), RenderError> {
        let mut staged = tempfile::Builder::new()
            .prefix("md2report-")
            .suffix(".html")
            .tempfile()
            .map_err(RenderError::MarkupStaging)?;
        staged
            .write_all(markup.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(RenderError::MarkupStaging)?;

        let args = self.expand_args(staged.path(), artifact);
        debug!("Running renderer: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| RenderError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(RenderError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_renderer_writes_markup_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("report.html");

        HtmlRenderer
            .render("<html>report</html>", &artifact)
            .expect("write must succeed");

        let written = std::fs::read_to_string(&artifact).unwrap();
        assert_eq!(written, "<html>report</html>");
    }

    #[test]
    fn template_parsing_fills_missing_placeholders() {
        let r = CommandRenderer::from_template("weasyprint").unwrap();
        let args = r.expand_args(Path::new("in.html"), Path::new("out.pdf"));
        assert_eq!(args, vec!["in.html", "out.pdf"]);
    }

    #[test]
    fn template_parsing_respects_explicit_placeholders() {
        let r = CommandRenderer::from_template("prince -o {output} {input}").unwrap();
        let args = r.expand_args(Path::new("in.html"), Path::new("out.pdf"));
        assert_eq!(args, vec!["-o", "out.pdf", "in.html"]);
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(CommandRenderer::from_template("   ").is_none());
    }

    #[test]
    fn missing_program_maps_to_spawn_error() {
        let r = CommandRenderer::from_template("definitely-not-a-real-renderer-binary").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = r
            .render("<html></html>", &dir.path().join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }), "got: {err:?}");
    }
}
