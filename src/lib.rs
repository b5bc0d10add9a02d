//! # md2report
//!
//! Repair unreliably formatted generated Markdown and compile it into one
//! styled, paginated report.
//!
//! ## Why this crate?
//!
//! Text generators that are *asked* to produce tidy Markdown still wrap
//! sentences at arbitrary widths, leave `Page N` residue behind, fence
//! whole documents in triple backticks, and list tools as loose name /
//! description line pairs instead of the requested bullet form. Prompting
//! harder does not fix this; a deterministic repair pass does. This crate
//! normalizes each document with a small set of line-state-machine stages,
//! then compiles the repaired sections into a single styled artifact.
//!
//! ## Pipeline Overview
//!
//! ```text
//! section files
//!  │
//!  ├─ 1. Strip        page residue, stray fences, blank-line runs
//!  ├─ 2. Reflow       rejoin hard-wrapped sentences into paragraphs
//!  ├─ 3. Standardize  canonical `- **Name**: Description` tool entries
//!  ├─ 4. Promote      bare known section titles → `##` headings
//!  ├─ 5. Assemble     styled HTML, page breaks, page-numbering footer
//!  └─ 6. Render       external engine writes the artifact; inputs deleted
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2report::{compile, CompileConfig, ReportManifest};
//!
//! fn main() -> Result<(), md2report::Md2ReportError> {
//!     let manifest = ReportManifest::launchpad("lite_output");
//!     let config = CompileConfig::default();
//!     let output = compile(&manifest, "project_report.pdf", &config)?;
//!     println!("wrote {}", output.artifact.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2report` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! md2report = { version = "0.3", default-features = false }
//! ```
//!
//! ## Guarantees
//!
//! * Every transform stage is total: malformed input passes through
//!   unchanged, it never errors. Only file I/O and the renderer boundary
//!   can fail.
//! * The repair sequence is idempotent — normalizing already-normalized
//!   text changes nothing.
//! * Intermediate files are deleted only after the renderer reports
//!   success; any failure leaves them in place for inspection.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compile;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub(crate) mod render;
pub mod renderer;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compile::compile;
pub use config::{
    ArtifactFormat, CodeSpec, CompileConfig, CompileConfigBuilder, Heuristics, ReportManifest,
    SectionSpec,
};
pub use error::{Md2ReportError, RenderError};
pub use output::{CompileOutput, CompileStats, SectionResult};
pub use pipeline::normalize;
pub use renderer::{CommandRenderer, HtmlRenderer, ReportRenderer};
