//! List-entry standardization, scoped to one named section.
//!
//! The generator is instructed to list tools as `- **Name**: Description`
//! bullets but does not reliably comply: entries arrive as bare bullets,
//! malformed bullets missing the space, or unbulleted name/description
//! line pairs. Inside the configured section this stage rewrites those
//! shapes into the canonical bullet; everything outside the section passes
//! through untouched.
//!
//! This is a best-effort repair, not a parser. A line that does not look
//! like an entry name is emitted unchanged rather than force-bulletized —
//! guessing wrong would corrupt prose the author meant literally.

use crate::config::Heuristics;
use crate::pipeline::classify::{classify, Class};

/// Scope state threaded through the line iterator. Sections never nest:
/// the scope opens at the section title and closes at the next heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Outside,
    Inside,
}

/// Canonicalize list entries inside the section titled `section_title`.
pub fn standardize(input: &str, section_title: &str, rules: &Heuristics) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut scope = Scope::Outside;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if scope == Scope::Outside {
            if is_section_title(line, section_title) {
                out.push(format!("## {section_title}"));
                scope = Scope::Inside;
            } else {
                out.push(line.to_string());
            }
            i += 1;
            continue;
        }

        match classify(line) {
            Class::Heading(_) if is_section_title(line, section_title) => {
                // The same title again: keep the canonical form, stay inside.
                out.push(format!("## {section_title}"));
                i += 1;
            }
            Class::Heading(_) => {
                // Any other heading ends the scope; the line itself is not
                // section content and passes through unchanged.
                scope = Scope::Outside;
                out.push(line.to_string());
                i += 1;
            }
            Class::Blank => {
                out.push(String::new());
                i += 1;
            }
            Class::ListItem => {
                // Author already followed the template (or at least wrote a
                // well-formed item); do not touch it.
                out.push(line.to_string());
                i += 1;
            }
            Class::Text => {
                let name = strip_bullet_glyph(line);
                if looks_like_name(name, rules) {
                    match description_on(lines.get(i + 1).copied(), rules) {
                        Some(desc) => {
                            out.push(format!("- **{name}**: {desc}"));
                            i += 2;
                        }
                        None => {
                            out.push(format!("- **{name}**"));
                            i += 1;
                        }
                    }
                } else {
                    out.push(name.to_string());
                    i += 1;
                }
            }
        }
    }

    out.join("\n")
}

/// Match a standalone section-title line, bare or already heading-marked.
fn is_section_title(line: &str, title: &str) -> bool {
    let t = line.trim().trim_start_matches('#').trim_start();
    t.eq_ignore_ascii_case(title)
}

/// Drop one leading bullet glyph (and following whitespace) if present.
/// Numbered-list markers are not glyphs and are left alone.
fn strip_bullet_glyph(line: &str) -> &str {
    let t = line.trim();
    match t.chars().next() {
        Some(c @ ('-' | '*' | '+' | '•' | '◦' | '‣')) => t[c.len_utf8()..].trim(),
        _ => t,
    }
}

/// A short standalone line that names something rather than describes it.
fn looks_like_name(text: &str, rules: &Heuristics) -> bool {
    if text.is_empty() || text.chars().count() > rules.name_max_chars {
        return false;
    }
    if text.ends_with(['.', '!', '?']) {
        return false;
    }
    !starts_with_opener(text, rules)
}

/// If the line after a name candidate reads like its description, return
/// the description text (bullet-stripped). Headings, list structure, and
/// blanks never qualify.
fn description_on<'a>(next: Option<&'a str>, rules: &Heuristics) -> Option<&'a str> {
    let line = next?;
    match classify(line) {
        Class::Text | Class::ListItem => {}
        _ => return None,
    }
    let text = strip_bullet_glyph(line);
    if text.is_empty() {
        return None;
    }
    if text.chars().count() > rules.desc_min_chars || starts_with_opener(text, rules) {
        Some(text)
    } else {
        None
    }
}

fn starts_with_opener(text: &str, rules: &Heuristics) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    rules.openers.iter().any(|w| first.eq_ignore_ascii_case(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Heuristics {
        Heuristics::default()
    }

    const SECTION: &str = "Libraries and Tools";

    #[test]
    fn canonical_bullet_passes_through_byte_identical() {
        let input = "## Libraries and Tools\n- **Flask**: A web framework.";
        assert_eq!(standardize(input, SECTION, &rules()), input);
    }

    #[test]
    fn two_line_pair_becomes_one_bullet() {
        let input = "## Libraries and Tools\nFlask\nA lightweight web framework for Python.";
        assert_eq!(
            standardize(input, SECTION, &rules()),
            "## Libraries and Tools\n- **Flask**: A lightweight web framework for Python."
        );
    }

    #[test]
    fn bare_title_is_promoted_to_canonical_heading() {
        let input = "libraries and tools\nFlask\nA lightweight web framework for Python.";
        let result = standardize(input, SECTION, &rules());
        assert!(result.starts_with("## Libraries and Tools\n"));
    }

    #[test]
    fn name_without_description_gets_name_only_bullet() {
        let input = "## Libraries and Tools\nFlask\n\nRequests\nThe HTTP library for humans.";
        assert_eq!(
            standardize(input, SECTION, &rules()),
            "## Libraries and Tools\n- **Flask**\n\n- **Requests**: The HTTP library for humans."
        );
    }

    #[test]
    fn malformed_bullet_is_repaired() {
        let input = "## Libraries and Tools\n•Celery\nA distributed task queue for Python apps.";
        assert_eq!(
            standardize(input, SECTION, &rules()),
            "## Libraries and Tools\n- **Celery**: A distributed task queue for Python apps."
        );
    }

    #[test]
    fn bulleted_description_line_is_consumed() {
        let input = "## Libraries and Tools\nRedis\n- Used for caching and session storage.";
        assert_eq!(
            standardize(input, SECTION, &rules()),
            "## Libraries and Tools\n- **Redis**: Used for caching and session storage."
        );
    }

    #[test]
    fn prose_is_not_force_bulletized() {
        let input =
            "## Libraries and Tools\nThis stack keeps the backend entirely in Python for now.";
        assert_eq!(standardize(input, SECTION, &rules()), input);
    }

    #[test]
    fn sentence_final_punctuation_disqualifies_a_name() {
        let input = "## Libraries and Tools\nShip it.\nmore words follow on this next line here";
        let result = standardize(input, SECTION, &rules());
        assert!(!result.contains("**Ship it.**"));
    }

    #[test]
    fn outside_scope_lines_are_untouched() {
        let input = "## Summary\nFlask\nA lightweight web framework for Python.";
        assert_eq!(standardize(input, SECTION, &rules()), input);
    }

    #[test]
    fn next_heading_ends_the_scope() {
        let input = "## Libraries and Tools\nFlask\nA lightweight web framework for Python.\n## Risks\nVendor\nThe lock-in risk is real and well documented.";
        let result = standardize(input, SECTION, &rules());
        assert!(result.contains("- **Flask**: A lightweight web framework for Python."));
        // After "## Risks" the repair must be off again.
        assert!(result.contains("## Risks\nVendor\nThe lock-in risk"));
    }

    #[test]
    fn heading_is_never_consumed_as_description() {
        let input = "## Libraries and Tools\nFlask\n## Risks";
        assert_eq!(
            standardize(input, SECTION, &rules()),
            "## Libraries and Tools\n- **Flask**\n## Risks"
        );
    }

    #[test]
    fn blank_lines_inside_scope_pass_through() {
        let input = "## Libraries and Tools\n\nFlask\nA lightweight web framework for Python.\n";
        let result = standardize(input, SECTION, &rules());
        assert!(result.contains("\n\n- **Flask**"));
    }

    #[test]
    fn short_description_under_threshold_is_a_known_limit() {
        // "Fast JSON parsing tool" is 22 chars and does not start with an
        // opener word, so it reads as another name candidate rather than a
        // description. Tunable via Heuristics::desc_min_chars.
        let input = "## Libraries and Tools\nserde\nFast JSON parsing tool";
        let result = standardize(input, SECTION, &rules());
        assert!(result.contains("- **serde**\n- **Fast JSON parsing tool**"));
    }

    #[test]
    fn idempotent_on_own_output() {
        let input = "## Libraries and Tools\nFlask\nA lightweight web framework for Python.\n\nRequests\nThe HTTP library for humans.";
        let once = standardize(input, SECTION, &rules());
        let twice = standardize(&once, SECTION, &rules());
        assert_eq!(once, twice);
    }
}
