//! Configuration types for report compilation.
//!
//! All compile behaviour is controlled through [`CompileConfig`], built via
//! its [`CompileConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs between the CLI and library callers and to diff
//! two runs to understand why their artifacts differ.
//!
//! # Design choice: builder over constructor
//! The repair heuristics alone carry half a dozen knobs; a flat constructor
//! would break on every new field. The builder lets callers set only what
//! they care about and rely on documented defaults for the rest.

use crate::error::Md2ReportError;
use crate::renderer::ReportRenderer;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration for one report compilation.
///
/// Built via [`CompileConfig::builder()`] or [`CompileConfig::default()`].
///
/// # Example
/// ```rust
/// use md2report::CompileConfig;
///
/// let config = CompileConfig::builder()
///     .title("Q3 Launch Report")
///     .keep_inputs(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CompileConfig {
    /// Report title rendered on the cover block and in the document head.
    /// Default: "SaaS Launchpad Report".
    pub title: String,

    /// Case-insensitive title of the section whose list entries are
    /// rewritten into the canonical `- **Name**: Description` form.
    /// Default: "Libraries and Tools".
    ///
    /// Only one such section is standardized per document; entries outside
    /// its scope pass through untouched.
    pub tool_section: String,

    /// Standalone lines promoted to `## ` headings when their trimmed
    /// content equals one of these titles exactly (case-insensitive).
    ///
    /// Seeded with the section names the upstream generator is asked to
    /// produce; a line like "Risks and considerations" is not an exact
    /// match and stays plain text.
    pub promote_titles: Vec<String>,

    /// Thresholds for telling an entry name from a description line.
    pub heuristics: Heuristics,

    /// Artifact format. [`ArtifactFormat::Pdf`] hands the assembled markup
    /// to an external renderer command; [`ArtifactFormat::Html`] writes the
    /// markup directly. Default: Pdf.
    pub format: ArtifactFormat,

    /// Pre-constructed renderer. Takes precedence over `renderer_command`
    /// and `format`-based resolution. Useful in tests or when embedding a
    /// custom rendering engine.
    pub renderer: Option<Arc<dyn ReportRenderer>>,

    /// External renderer command template with `{input}` and `{output}`
    /// placeholders, e.g. `"weasyprint {input} {output}"`. If None, the
    /// `MD2REPORT_RENDERER` environment variable is consulted, then the
    /// built-in wkhtmltopdf default.
    pub renderer_command: Option<String>,

    /// Keep the consumed intermediate files after a successful render
    /// instead of deleting them. Default: false.
    ///
    /// Deletion on success is the documented contract: the section files
    /// are scratch output of an upstream generator and become redundant
    /// once the artifact exists. Set this for debugging or re-runs.
    pub keep_inputs: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            title: "SaaS Launchpad Report".to_string(),
            tool_section: "Libraries and Tools".to_string(),
            promote_titles: default_promote_titles(),
            heuristics: Heuristics::default(),
            format: ArtifactFormat::Pdf,
            renderer: None,
            renderer_command: None,
            keep_inputs: false,
        }
    }
}

impl fmt::Debug for CompileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileConfig")
            .field("title", &self.title)
            .field("tool_section", &self.tool_section)
            .field("promote_titles", &self.promote_titles)
            .field("heuristics", &self.heuristics)
            .field("format", &self.format)
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn ReportRenderer>"))
            .field("renderer_command", &self.renderer_command)
            .field("keep_inputs", &self.keep_inputs)
            .finish()
    }
}

impl CompileConfig {
    /// Create a new builder for `CompileConfig`.
    pub fn builder() -> CompileConfigBuilder {
        CompileConfigBuilder {
            config: Self::default(),
        }
    }
}

fn default_promote_titles() -> Vec<String> {
    [
        "Summary",
        "Risks",
        "Strengths",
        "Opportunities",
        "Core Features",
        "Technical Challenges",
        "Competitors",
        "Libraries and Tools",
        "Recommended APIs",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Builder for [`CompileConfig`].
#[derive(Debug)]
pub struct CompileConfigBuilder {
    config: CompileConfig,
}

impl CompileConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn tool_section(mut self, title: impl Into<String>) -> Self {
        self.config.tool_section = title.into();
        self
    }

    pub fn promote_titles(mut self, titles: Vec<String>) -> Self {
        self.config.promote_titles = titles;
        self
    }

    pub fn heuristics(mut self, heuristics: Heuristics) -> Self {
        self.config.heuristics = heuristics;
        self
    }

    pub fn format(mut self, format: ArtifactFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn renderer_command(mut self, template: impl Into<String>) -> Self {
        self.config.renderer_command = Some(template.into());
        self
    }

    pub fn keep_inputs(mut self, v: bool) -> Self {
        self.config.keep_inputs = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CompileConfig, Md2ReportError> {
        let c = &self.config;
        if c.title.trim().is_empty() {
            return Err(Md2ReportError::InvalidConfig(
                "Report title must not be empty".into(),
            ));
        }
        if c.tool_section.trim().is_empty() {
            return Err(Md2ReportError::InvalidConfig(
                "Tool section title must not be empty".into(),
            ));
        }
        if c.heuristics.name_max_chars == 0 {
            return Err(Md2ReportError::InvalidConfig(
                "name_max_chars must be ≥ 1".into(),
            ));
        }
        if let Some(ref tpl) = c.renderer_command {
            if tpl.split_whitespace().next().is_none() {
                return Err(Md2ReportError::InvalidConfig(
                    "Renderer command template must name a program".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Heuristics ───────────────────────────────────────────────────────────

/// Tunable thresholds for the list-entry repair inside the tool section.
///
/// These values are empirically tuned against real generator output and can
/// misclassify edge cases — a genuine description of 30 characters or fewer
/// that does not open with one of the `openers` words will be read as an
/// entry name. They are deliberately configuration, not constants, so such
/// cases can be tuned per deployment rather than patched in code.
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Maximum character count for a line to qualify as an entry name.
    /// Default: 60.
    pub name_max_chars: usize,

    /// A line longer than this qualifies as a description regardless of how
    /// it starts. Default: 30.
    pub desc_min_chars: usize,

    /// Words that open a descriptive sentence rather than name an entry.
    /// Compared case-insensitively against the first word of the line.
    pub openers: Vec<String>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            name_max_chars: 60,
            desc_min_chars: 30,
            openers: ["A", "An", "The", "This", "It", "Used", "Provides"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

// ── Manifest ─────────────────────────────────────────────────────────────

/// Ordered list of intermediate files to compile into one report.
///
/// Each section entry pairs a file path with the heading used for its part
/// of the report. Entries whose file does not exist are skipped, not
/// errors — upstream generation legitimately omits optional sections.
#[derive(Debug, Clone)]
pub struct ReportManifest {
    /// Markdown section files, in reading order.
    pub sections: Vec<SectionSpec>,
    /// Optional trailing code file embedded verbatim as a preformatted
    /// appendix (never reflowed or standardized).
    pub code: Option<CodeSpec>,
}

/// One markdown section of the report.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub path: PathBuf,
    pub title: String,
}

/// A raw code file appended to the report as a preformatted block.
#[derive(Debug, Clone)]
pub struct CodeSpec {
    pub path: PathBuf,
    pub title: String,
}

impl ReportManifest {
    /// Manifest for the stock launchpad layout: the spec and tech-stack
    /// sections written by the upstream generator plus the MVP skeleton as
    /// a code appendix, all under `dir`.
    pub fn launchpad(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            sections: vec![
                SectionSpec {
                    path: dir.join("1_spec.md"),
                    title: "Specification & Analysis".to_string(),
                },
                SectionSpec {
                    path: dir.join("2_tech_stack.md"),
                    title: "Technology Stack".to_string(),
                },
            ],
            code: Some(CodeSpec {
                path: dir.join("3_mvp_skeleton.py"),
                title: "MVP Skeleton".to_string(),
            }),
        }
    }

    /// Every path named by the manifest, sections first, code last.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.sections
            .iter()
            .map(|s| s.path.as_path())
            .chain(self.code.iter().map(|c| c.path.as_path()))
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// What kind of artifact the compiler produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Hand the assembled markup to an external HTML-to-PDF renderer.
    #[default]
    Pdf,
    /// Write the assembled markup itself as the artifact. Needs no external
    /// renderer; pagination hints stay as CSS for a later print step.
    Html,
}
