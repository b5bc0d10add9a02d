//! Repair stages for generator-produced Markdown.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and keeps their
//! interactions explicit: every stage assumes the invariants the previous
//! one established, so [`normalize`] runs them in a fixed order.
//!
//! ## Data Flow
//!
//! ```text
//! raw text ──▶ strip ──▶ reflow ──▶ standardize ──▶ promote
//!  (generator)  (residue)  (paragraphs)  (tool entries)  (headings)
//! ```
//!
//! 1. [`strip`]       — delete page-number residue, unwrap accidental
//!    document fences, collapse excessive blank runs
//! 2. [`reflow`]      — rejoin hard-wrapped sentences into paragraph lines
//! 3. [`standardize`] — canonicalize list entries inside the tool section
//! 4. [`promote`]     — turn bare known section titles into headings
//!
//! [`classify`] is the shared line classifier the stages consult; it is not
//! itself a stage.
//!
//! Every stage is a total function `&str → String`: malformed input passes
//! through unchanged, never errors. The sequence is idempotent — running it
//! on its own output changes nothing.

pub mod classify;
pub mod promote;
pub mod reflow;
pub mod standardize;
pub mod strip;

use crate::config::CompileConfig;

/// Run the full repair sequence over one document.
pub fn normalize(input: &str, config: &CompileConfig) -> String {
    let s = strip::strip_artifacts(input);
    let s = reflow::reflow(&s);
    let s = standardize::standardize(&s, &config.tool_section, &config.heuristics);
    let s = promote::promote_headings(&s, &config.promote_titles);
    ensure_final_newline(&s)
}

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{trimmed}\n")
    }
}
