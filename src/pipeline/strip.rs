//! Artifact stripping: remove generator residue before any structural
//! interpretation happens.
//!
//! Three repairs, in order:
//!
//! 1. Delete `Page N` residue lines entirely (deleting rather than blanking
//!    keeps them from manufacturing paragraph breaks downstream).
//! 2. Unwrap document-level code fences — generators occasionally wrap an
//!    entire section in ` ```markdown … ``` ` despite instructions, and a
//!    malformed ` ``markdown ` two-backtick variant shows up too.
//! 3. Collapse runs of three or more blank lines to exactly one.
//!
//! This stage must run before the classification-driven stages: a fence
//! marker line would otherwise classify as plain text and be absorbed into
//! a paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*Page\s+\d+\s*$").unwrap());

static RE_FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:```[A-Za-z0-9_+-]*|``[A-Za-z]+)\s*$").unwrap());

static RE_FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```?\s*$").unwrap());

static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

/// Apply all stripping rules.
pub fn strip_artifacts(input: &str) -> String {
    let s = remove_page_markers(input);
    let s = unwrap_document_fences(&s);
    collapse_blank_runs(&s)
}

/// True if the line opens a code fence (with optional language tag), or is
/// the malformed two-backtick + language-word variant.
pub(crate) fn is_fence_open(line: &str) -> bool {
    RE_FENCE_OPEN.is_match(line.trim_end())
}

/// True if the line closes a code fence.
pub(crate) fn is_fence_close(line: &str) -> bool {
    RE_FENCE_CLOSE.is_match(line.trim_end())
}

fn remove_page_markers(input: &str) -> String {
    input
        .lines()
        .filter(|line| !RE_PAGE_MARKER.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip a leading and/or trailing fence marker around the whole document.
///
/// The two boundary markers are handled independently: a generator that
/// opened a fence and never closed it still gets unwrapped. Interior fences
/// are left alone.
fn unwrap_document_fences(input: &str) -> String {
    let mut lines: Vec<&str> = input.lines().collect();

    if let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) {
        if is_fence_open(lines[first]) {
            lines.remove(first);
        }
    }
    if let Some(last) = lines.iter().rposition(|l| !l.trim().is_empty()) {
        if is_fence_close(lines[last]) {
            lines.remove(last);
        }
    }

    lines.join("\n")
}

fn collapse_blank_runs(input: &str) -> String {
    RE_BLANK_RUN.replace_all(input, "\n\n").to_string()
}
