//! Line classification: the single structural judgement every repair stage
//! shares.
//!
//! The pipeline never parses Markdown properly — it only needs to know, per
//! line, whether it is looking at a structural break (blank, heading, list
//! item) or at prose that may continue the previous line. Classification is
//! recomputed from the line text on demand; nothing stores it alongside the
//! line, so the stages can rewrite lines freely without invalidating state.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structural class of a single text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Empty or whitespace-only.
    Blank,
    /// `#`–`######` followed by at least one space and content. Carries the
    /// heading level (1–6).
    Heading(u8),
    /// Bulleted (`-`, `*`, `+`, `•`, `◦`, `‣`) or numbered (`1.` / `1)`)
    /// item with at least one space before its content.
    ListItem,
    /// Anything else.
    Text,
}

impl Class {
    /// True for the classes that terminate a paragraph: headings, list
    /// items, and blank lines are emitted as-is and never joined into a
    /// paragraph buffer.
    pub fn is_break(self) -> bool {
        !matches!(self, Class::Text)
    }
}

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(#{1,6})\s+\S").unwrap());

static RE_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+•◦‣]|\d+[.)])\s+\S").unwrap());

/// Classify one line. Pure; one regex scan per call.
pub fn classify(line: &str) -> Class {
    if line.trim().is_empty() {
        return Class::Blank;
    }
    if let Some(caps) = RE_HEADING.captures(line) {
        return Class::Heading(caps[1].len() as u8);
    }
    if RE_LIST_ITEM.is_match(line) {
        return Class::ListItem;
    }
    Class::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(classify(""), Class::Blank);
        assert_eq!(classify("   \t  "), Class::Blank);
    }

    #[test]
    fn headings_carry_level() {
        assert_eq!(classify("# Title"), Class::Heading(1));
        assert_eq!(classify("  ### Deep"), Class::Heading(3));
        assert_eq!(classify("###### Max"), Class::Heading(6));
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        assert_eq!(classify("####### Too deep"), Class::Text);
    }

    #[test]
    fn hash_without_space_is_text() {
        assert_eq!(classify("#hashtag"), Class::Text);
    }

    #[test]
    fn list_items() {
        assert_eq!(classify("- item"), Class::ListItem);
        assert_eq!(classify("* item"), Class::ListItem);
        assert_eq!(classify("+ item"), Class::ListItem);
        assert_eq!(classify("• glyph bullet"), Class::ListItem);
        assert_eq!(classify("  3. numbered"), Class::ListItem);
        assert_eq!(classify("12) numbered"), Class::ListItem);
    }

    #[test]
    fn bullet_without_space_is_text() {
        // The repair stage relies on this: "•Flask" is a malformed entry,
        // not a well-formed list item.
        assert_eq!(classify("•Flask"), Class::Text);
        assert_eq!(classify("-dash-prefixed-word"), Class::Text);
    }

    #[test]
    fn prose_is_text() {
        assert_eq!(classify("Just an ordinary sentence."), Class::Text);
    }

    #[test]
    fn break_classes() {
        assert!(Class::Blank.is_break());
        assert!(Class::Heading(2).is_break());
        assert!(Class::ListItem.is_break());
        assert!(!Class::Text.is_break());
    }
}
