//! Error types for the md2report library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2ReportError`] — **Fatal**: the compilation cannot produce a usable
//!   artifact (I/O failure, renderer failure, nothing to compile). Returned
//!   as `Err(Md2ReportError)` from [`crate::compile`].
//!
//! * [`RenderError`] — the error type [`crate::renderer::ReportRenderer`]
//!   implementations return at the renderer boundary. Wrapped into
//!   [`Md2ReportError::RenderFailed`] by the compiler so callers see one
//!   uniform failure surface.
//!
//! A missing intermediate file is *not* an error anywhere in this taxonomy:
//! optional sections are skipped and counted in
//! [`crate::output::CompileStats::sections_missing`]. The text-transform
//! stages themselves are total — malformed input passes through unchanged
//! rather than raising.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2report library.
#[derive(Debug, Error)]
pub enum Md2ReportError {
    // ── I/O errors ────────────────────────────────────────────────────────
    /// A section or code file existed but could not be read.
    #[error("Failed to read intermediate file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A consumed intermediate file could not be deleted after a successful
    /// render. The artifact itself was written.
    #[error("Failed to delete intermediate file '{path}': {source}\nRemove it manually before re-running the compile.")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer boundary ─────────────────────────────────────────────────
    /// The external renderer reported an error. No retry is attempted and
    /// the intermediate files are left in place for inspection or re-run.
    #[error("Renderer failed: {detail}\nIntermediate files were preserved.")]
    RenderFailed { detail: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Every manifest entry was missing; there is nothing to compile.
    #[error("No intermediate files found — nothing to compile.\nExpected at least one manifest entry to exist on disk.")]
    NoSections,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors produced at the renderer boundary.
///
/// Returned by [`crate::renderer::ReportRenderer::render`] implementations
/// and converted into [`Md2ReportError::RenderFailed`] by the compiler.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer command could not be launched at all.
    #[error("failed to launch renderer command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer command ran but exited unsuccessfully.
    #[error("renderer command '{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The markup could not be staged for the renderer process.
    #[error("failed to stage markup for rendering: {0}")]
    MarkupStaging(#[source] std::io::Error),

    /// The artifact file could not be written.
    #[error("failed to write artifact '{path}': {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for Md2ReportError {
    fn from(err: RenderError) -> Self {
        Md2ReportError::RenderFailed {
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_failed_display_mentions_preservation() {
        let e = Md2ReportError::RenderFailed {
            detail: "wkhtmltopdf: cannot connect to X server".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("cannot connect to X server"), "got: {msg}");
        assert!(msg.contains("preserved"), "got: {msg}");
    }

    #[test]
    fn command_failure_wraps_into_render_failed() {
        let boundary = RenderError::CommandFailed {
            program: "wkhtmltopdf".into(),
            status: "exit status: 1".into(),
            stderr: "Error: Unable to write to destination".into(),
        };
        let fatal: Md2ReportError = boundary.into();
        let msg = fatal.to_string();
        assert!(msg.contains("wkhtmltopdf"), "got: {msg}");
        assert!(msg.contains("Unable to write to destination"), "got: {msg}");
    }

    #[test]
    fn cleanup_failed_display_names_path() {
        let e = Md2ReportError::CleanupFailed {
            path: PathBuf::from("lite_output/1_spec.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("lite_output/1_spec.md"));
    }

    #[test]
    fn spawn_error_display_names_program() {
        let e = RenderError::Spawn {
            program: "weasyprint".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(e.to_string().contains("weasyprint"));
    }
}
