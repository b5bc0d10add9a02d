//! Heading promotion for a fixed vocabulary of section titles.
//!
//! The generator sometimes emits a section title as a bare line instead of
//! a heading. A line whose trimmed content exactly equals one of the known
//! titles (case-insensitive) is rewritten as a second-level heading. Runs
//! after reflow and standardization so it only ever sees genuine standalone
//! lines, never fragments of a paragraph that happen to contain the word.

/// Promote bare vocabulary lines to `## ` headings. Lines already marked as
/// headings, and lines that are not an exact title match, are untouched.
pub fn promote_headings(input: &str, vocabulary: &[String]) -> String {
    input
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if !trimmed.starts_with('#')
                && vocabulary.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
            {
                format!("## {trimmed}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vec<String> {
        ["Summary", "Risks", "Opportunities"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn exact_match_is_promoted() {
        assert_eq!(promote_headings("Risks", &vocab()), "## Risks");
    }

    #[test]
    fn match_is_case_insensitive_but_keeps_original_casing() {
        assert_eq!(promote_headings("RISKS", &vocab()), "## RISKS");
    }

    #[test]
    fn non_exact_match_is_left_alone() {
        let input = "Risks and considerations";
        assert_eq!(promote_headings(input, &vocab()), input);
    }

    #[test]
    fn existing_heading_is_not_double_marked() {
        let input = "## Risks";
        assert_eq!(promote_headings(input, &vocab()), input);
    }

    #[test]
    fn vocabulary_word_inside_a_list_item_is_left_alone() {
        let input = "- Risks";
        assert_eq!(promote_headings(input, &vocab()), input);
    }

    #[test]
    fn mixed_document() {
        let input = "Summary\n\nThe plan is sound.\n\nRisks\n\n- vendor lock-in";
        assert_eq!(
            promote_headings(input, &vocab()),
            "## Summary\n\nThe plan is sound.\n\n## Risks\n\n- vendor lock-in"
        );
    }
}
