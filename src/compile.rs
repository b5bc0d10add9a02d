//! Report compilation: the orchestration that turns intermediate files into
//! one artifact.
//!
//! The whole pipeline is synchronous and strictly ordered — each document
//! runs strip → reflow → standardize → promote, is rendered to HTML, and
//! the assembled markup goes to the renderer exactly once. The only side
//! effects live here: file reads, the renderer's artifact write, and the
//! success-path deletion of the consumed intermediate files. A renderer
//! failure leaves every input untouched for inspection or re-run.

use crate::config::{ArtifactFormat, CompileConfig, ReportManifest};
use crate::error::Md2ReportError;
use crate::output::{CompileOutput, CompileStats, SectionResult};
use crate::pipeline::{self, strip};
use crate::render;
use crate::renderer::{CommandRenderer, HtmlRenderer, ReportRenderer};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Compile the manifest's intermediate files into one report artifact.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `manifest` — ordered section files plus an optional code appendix
/// * `artifact` — caller-specified output path, handed to the renderer
/// * `config`   — compile configuration
///
/// # Returns
/// `Ok(CompileOutput)` naming the artifact, even if some manifest entries
/// were missing (check `output.stats.sections_missing`). On success the
/// consumed input files are deleted unless `config.keep_inputs` is set —
/// a documented effect, not a silent one.
///
/// # Errors
/// * [`Md2ReportError::NoSections`] — no manifest entry existed on disk
/// * [`Md2ReportError::ReadFailed`] — an existing file could not be read
/// * [`Md2ReportError::RenderFailed`] — the renderer reported an error;
///   intermediate files are preserved
/// * [`Md2ReportError::CleanupFailed`] — the artifact was written but a
///   consumed input could not be deleted
pub fn compile(
    manifest: &ReportManifest,
    artifact: impl AsRef<Path>,
    config: &CompileConfig,
) -> Result<CompileOutput, Md2ReportError> {
    let total_start = Instant::now();
    let artifact = artifact.as_ref();
    info!("Compiling report '{}' → {}", config.title, artifact.display());

    // ── Step 1: Resolve the renderer ─────────────────────────────────────
    let renderer = resolve_renderer(config)?;

    // ── Step 2: Normalize and render each section ────────────────────────
    let mut parts: Vec<String> = Vec::new();
    let mut sections: Vec<SectionResult> = Vec::new();
    let mut consumed: Vec<&Path> = Vec::new();
    let mut missing = 0usize;

    for spec in &manifest.sections {
        if !spec.path.exists() {
            debug!("Section file missing, skipping: {}", spec.path.display());
            missing += 1;
            continue;
        }
        let raw = fs::read_to_string(&spec.path).map_err(|e| Md2ReportError::ReadFailed {
            path: spec.path.clone(),
            source: e,
        })?;
        let normalized = pipeline::normalize(&raw, config);
        debug!(
            "Normalized '{}': {} → {} bytes",
            spec.path.display(),
            raw.len(),
            normalized.len()
        );
        parts.push(render::section_html(&spec.title, &normalized));
        sections.push(SectionResult {
            title: spec.title.clone(),
            path: spec.path.clone(),
            markdown_bytes: normalized.len(),
        });
        consumed.push(&spec.path);
    }

    // ── Step 3: Embed the code appendix ──────────────────────────────────
    // Code is embedded verbatim (minus one document-level fence pair) and
    // never goes through the repair stages: reflow would re-paragraph it.
    let mut code_included = false;
    if let Some(code) = &manifest.code {
        if code.path.exists() {
            let raw = fs::read_to_string(&code.path).map_err(|e| Md2ReportError::ReadFailed {
                path: code.path.clone(),
                source: e,
            })?;
            parts.push(render::code_section_html(&code.title, &unwrap_code_fence(&raw)));
            consumed.push(&code.path);
            code_included = true;
        } else {
            debug!("Code file missing, skipping: {}", code.path.display());
            missing += 1;
        }
    }

    if parts.is_empty() {
        return Err(Md2ReportError::NoSections);
    }

    // ── Step 4: Assemble the document and render ─────────────────────────
    let markup = render::wrap_report(&config.title, &parts.concat());
    debug!("Assembled markup: {} bytes", markup.len());

    let render_start = Instant::now();
    renderer.render(&markup, artifact).map_err(|e| {
        warn!("Renderer failed, intermediate files preserved: {e}");
        Md2ReportError::from(e)
    })?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 5: Delete the consumed inputs ───────────────────────────────
    let mut inputs_deleted = 0usize;
    if config.keep_inputs {
        debug!("keep_inputs set; leaving {} input files in place", consumed.len());
    } else {
        for path in &consumed {
            fs::remove_file(path).map_err(|e| Md2ReportError::CleanupFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            debug!("Deleted intermediate file {}", path.display());
            inputs_deleted += 1;
        }
    }

    let stats = CompileStats {
        sections_compiled: sections.len(),
        sections_missing: missing,
        code_included,
        inputs_deleted,
        markup_bytes: markup.len(),
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Report written: {} ({} sections, {}ms)",
        artifact.display(),
        stats.sections_compiled,
        stats.total_duration_ms
    );

    Ok(CompileOutput {
        artifact: artifact.to_path_buf(),
        sections,
        stats,
    })
}

/// Resolve the renderer, from most-specific to least-specific.
///
/// The fallback chain lets library users and CLI users each set exactly as
/// much as they need:
///
/// 1. **Pre-built renderer** (`config.renderer`) — the caller constructed
///    the engine entirely; used as-is. This is also the test seam.
/// 2. **HTML format** — no external engine involved at all.
/// 3. **Command template** (`config.renderer_command`, then the
///    `MD2REPORT_RENDERER` environment variable) — any HTML-to-PDF command
///    with `{input}`/`{output}` placeholders.
/// 4. **Default engine** — `wkhtmltopdf --quiet {input} {output}`.
fn resolve_renderer(config: &CompileConfig) -> Result<Arc<dyn ReportRenderer>, Md2ReportError> {
    if let Some(ref renderer) = config.renderer {
        return Ok(Arc::clone(renderer));
    }

    if config.format == ArtifactFormat::Html {
        return Ok(Arc::new(HtmlRenderer));
    }

    if let Some(ref template) = config.renderer_command {
        return command_from_template(template);
    }

    if let Ok(template) = std::env::var("MD2REPORT_RENDERER") {
        if !template.trim().is_empty() {
            return command_from_template(&template);
        }
    }

    Ok(Arc::new(CommandRenderer::wkhtmltopdf()))
}

fn command_from_template(template: &str) -> Result<Arc<dyn ReportRenderer>, Md2ReportError> {
    CommandRenderer::from_template(template)
        .map(|r| Arc::new(r) as Arc<dyn ReportRenderer>)
        .ok_or_else(|| {
            Md2ReportError::InvalidConfig(format!(
                "Renderer command template '{template}' names no program"
            ))
        })
}

/// Strip a single document-level fence pair from a code file.
///
/// Only the exact open + close pair counts: the first line must open a
/// fence and the last line close one. Anything else — including a fence
/// that appears mid-content — is left exactly as written.
fn unwrap_code_fence(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.trim_end().lines().collect();
    if lines.len() >= 2
        && strip::is_fence_open(lines[0])
        && strip::is_fence_close(lines[lines.len() - 1])
    {
        lines.remove(0);
        lines.pop();
    }
    lines.join("\n")
}
