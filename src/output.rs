//! Result types returned by [`crate::compile`].
//!
//! Everything here is plain data: paths, titles, and counters describing
//! what one compilation did. All types serialise to JSON for the CLI's
//! `--json` mode and for scripting around the library.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The result of one successful report compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOutput {
    /// Path of the written artifact.
    pub artifact: PathBuf,
    /// Per-section results, in report order.
    pub sections: Vec<SectionResult>,
    /// Aggregate counters for the run.
    pub stats: CompileStats,
}

/// One compiled section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    /// Heading the section was rendered under.
    pub title: String,
    /// Source file the section was read from.
    pub path: PathBuf,
    /// Size of the normalized markdown, before HTML rendering.
    pub markdown_bytes: usize,
}

/// Aggregate statistics for a compilation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileStats {
    /// Sections read, normalized, and rendered.
    pub sections_compiled: usize,
    /// Manifest entries whose file did not exist (skipped, not errors).
    pub sections_missing: usize,
    /// Whether the code appendix was present and embedded.
    pub code_included: bool,
    /// Intermediate files deleted after the render succeeded. Zero when
    /// `keep_inputs` is set.
    pub inputs_deleted: usize,
    /// Size of the assembled markup handed to the renderer.
    pub markup_bytes: usize,
    /// Wall-clock time spent inside the renderer.
    pub render_duration_ms: u64,
    /// Wall-clock time for the whole compilation.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips_through_json() {
        let output = CompileOutput {
            artifact: PathBuf::from("report.pdf"),
            sections: vec![SectionResult {
                title: "Technology Stack".into(),
                path: PathBuf::from("lite_output/2_tech_stack.md"),
                markdown_bytes: 512,
            }],
            stats: CompileStats {
                sections_compiled: 1,
                sections_missing: 1,
                code_included: true,
                inputs_deleted: 2,
                markup_bytes: 4096,
                render_duration_ms: 120,
                total_duration_ms: 130,
            },
        };

        let json = serde_json::to_string_pretty(&output).expect("serialise");
        let back: CompileOutput = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back.artifact, output.artifact);
        assert_eq!(back.sections.len(), 1);
        assert_eq!(back.stats.inputs_deleted, 2);
    }
}
