//! Heuristic block classification
//!
//! Plain text is cut on blank lines and each chunk is classified as a list,
//! a heading, or a paragraph. The classifier is a best-effort heuristic: any
//! input is accepted, and the worst case is that everything becomes a
//! paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

/// Headings must be shorter than this many characters
const HEADING_MAX_CHARS: usize = 100;

/// Headings shorter than this many characters get level 3, others level 4
const PROMINENT_HEADING_MAX_CHARS: usize = 50;

/// Headings that are not all upper-case must have fewer words than this
const HEADING_MAX_WORDS: usize = 4;

static HORIZONTAL_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\u{a0}\u{3000}]+").expect("static regex is valid"));

static ORDINAL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(?:\s+|$)").expect("static regex is valid"));

static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-*](?:\s+|$)").expect("static regex is valid"));

/// One classified content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A short standalone line; level 3 or 4
    Heading { level: u8, text: String },

    /// Bulleted or numbered items, markers removed
    List { ordered: bool, items: Vec<String> },

    /// Running text; `\n` marks a soft line break
    Paragraph { text: String },
}

/// Collapses horizontal whitespace runs and trims every line
pub fn clean_text(content: &str) -> String {
    content
        .lines()
        .map(|line| HORIZONTAL_WHITESPACE.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits text into chunks separated by blank or whitespace-only lines
pub fn split_candidates(content: &str) -> Vec<String> {
    let cleaned = clean_text(content);
    let mut candidates = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in cleaned.lines() {
        if line.is_empty() {
            if !current.is_empty() {
                candidates.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        candidates.push(current.join("\n"));
    }

    candidates
}

/// Classifies one chunk of text
///
/// Headings are recognised first, then lists; anything else is a paragraph.
/// Returns None for empty or whitespace-only input.
///
/// # Example
///
/// ```
/// use doc_dossier::document::{classify_block, Block};
///
/// assert_eq!(
///     classify_block("INSTALLATION"),
///     Some(Block::Heading { level: 3, text: "INSTALLATION".to_string() })
/// );
/// assert!(matches!(classify_block("- one\n- two"), Some(Block::List { ordered: false, .. })));
/// ```
pub fn classify_block(candidate: &str) -> Option<Block> {
    let text = candidate.trim();
    if text.is_empty() {
        return None;
    }

    if is_heading(text) {
        let level = if text.chars().count() < PROMINENT_HEADING_MAX_CHARS {
            3
        } else {
            4
        };
        return Some(Block::Heading {
            level,
            text: text.to_string(),
        });
    }

    let first_line = text.lines().next().unwrap_or_default().trim();

    if ORDINAL_MARKER.is_match(first_line) || BULLET_MARKER.is_match(first_line) {
        return Some(Block::List {
            ordered: ORDINAL_MARKER.is_match(first_line),
            items: list_items(text),
        });
    }

    Some(Block::Paragraph {
        text: text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Splits content into classified blocks
pub fn split_blocks(content: &str) -> Vec<Block> {
    split_candidates(content)
        .iter()
        .filter_map(|candidate| classify_block(candidate))
        .collect()
}

fn is_heading(text: &str) -> bool {
    if text.chars().count() >= HEADING_MAX_CHARS {
        return false;
    }

    is_upper_case(text) || text.split_whitespace().count() < HEADING_MAX_WORDS
}

/// True when the text has cased characters and none of them are lower-case
fn is_upper_case(text: &str) -> bool {
    let mut has_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

fn list_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_marker)
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_marker(line: &str) -> String {
    if let Some(found) = ORDINAL_MARKER.find(line) {
        return line[found.end()..].trim().to_string();
    }
    if let Some(found) = BULLET_MARKER.find(line) {
        return line[found.end()..].trim().to_string();
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> Option<Block> {
        Some(Block::Heading {
            level,
            text: text.to_string(),
        })
    }

    fn paragraph(text: &str) -> Option<Block> {
        Some(Block::Paragraph {
            text: text.to_string(),
        })
    }

    fn list(ordered: bool, items: &[&str]) -> Option<Block> {
        Some(Block::List {
            ordered,
            items: items.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_short_text_is_heading() {
        assert_eq!(classify_block("Getting Started"), heading(3, "Getting Started"));
        assert_eq!(classify_block("Overview"), heading(3, "Overview"));
    }

    #[test]
    fn test_upper_case_sentence_is_heading() {
        let text = "CHAPTER TWO WHERE EVERYTHING IS EXPLAINED IN GREAT DETAIL FOR ALL";
        assert_eq!(classify_block(text), heading(4, text));
    }

    #[test]
    fn test_heading_level_by_length() {
        let short = "CONFIGURING THE SERVER";
        assert_eq!(classify_block(short), heading(3, short));

        let long = "CONFIGURING THE SERVER FOR HIGH AVAILABILITY DEPLOYMENTS";
        assert!(long.len() >= 50);
        assert_eq!(classify_block(long), heading(4, long));
    }

    #[test]
    fn test_long_text_is_paragraph() {
        let text = "This sentence has enough words to be prose rather than a heading.";
        assert_eq!(classify_block(text), paragraph(text));
    }

    #[test]
    fn test_upper_case_over_limit_is_paragraph() {
        let text = "A".repeat(100);
        assert_eq!(classify_block(&text), paragraph(&text));
    }

    #[test]
    fn test_digits_only_not_upper_case() {
        assert!(!is_upper_case("1234 5678"));
        assert!(is_upper_case("API V2"));
        assert!(!is_upper_case("Api"));
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(
            classify_block("- install\n- configure\n- run"),
            list(false, &["install", "configure", "run"])
        );
        assert_eq!(
            classify_block("• one\n• two"),
            list(false, &["one", "two"])
        );
        assert_eq!(
            classify_block("* starred item\n* another item"),
            list(false, &["starred item", "another item"])
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            classify_block("1. Download\n2. Unpack\n10. Profit"),
            list(true, &["Download", "Unpack", "Profit"])
        );
    }

    #[test]
    fn test_heading_checked_before_list() {
        // Short enough to be a heading, so the marker is kept as text
        assert_eq!(classify_block("1. Install"), heading(3, "1. Install"));
        assert_eq!(classify_block("- Tips"), heading(3, "- Tips"));
    }

    #[test]
    fn test_short_multiline_block_is_heading() {
        assert_eq!(classify_block("Version 2\nBeta"), heading(3, "Version 2\nBeta"));
        assert_eq!(classify_block("NOTE\nREAD THIS FIRST"), heading(3, "NOTE\nREAD THIS FIRST"));
    }

    #[test]
    fn test_list_continuation_lines_kept() {
        assert_eq!(
            classify_block("- first\ncontinued\n- second"),
            list(false, &["first", "continued", "second"])
        );
    }

    #[test]
    fn test_marker_needs_whitespace() {
        // Flags and decimals are not list markers
        assert!(matches!(
            classify_block("--verbose turns on debug output for every subcommand"),
            Some(Block::Paragraph { .. })
        ));
        assert!(matches!(
            classify_block("3.14 is an approximation of pi that most people will recognise"),
            Some(Block::Paragraph { .. })
        ));
        assert!(matches!(
            classify_block("- install the toolchain first"),
            Some(Block::List { ordered: false, .. })
        ));
    }

    #[test]
    fn test_multiline_paragraph_keeps_breaks() {
        assert_eq!(
            classify_block("First line of text\nsecond line of text"),
            paragraph("First line of text\nsecond line of text")
        );
    }

    #[test]
    fn test_empty_candidate() {
        assert_eq!(classify_block(""), None);
        assert_eq!(classify_block("  \n\t "), None);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a   b\t\tc  \n   d  "), "a b c\nd");
    }

    #[test]
    fn test_split_candidates_on_blank_lines() {
        let chunks = split_candidates("Title\n\n\n\nFirst para\nstill first\n   \nSecond");
        assert_eq!(chunks, vec!["Title", "First para\nstill first", "Second"]);
    }

    #[test]
    fn test_split_blocks_mixed() {
        let blocks = split_blocks(
            "INSTALLATION\n\nRun the installer and follow the prompts on screen.\n\n- step one\n- step two",
        );
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Heading { level: 3, .. }));
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
        assert!(matches!(blocks[2], Block::List { ordered: false, .. }));
    }

    #[test]
    fn test_arbitrary_text_never_panics() {
        for input in ["\u{0}", "•", "1.", "-", "\n\n\n", "ß", "🦀 🦀 🦀 🦀 🦀"] {
            let _ = split_blocks(input);
        }
        assert_eq!(classify_block("-"), heading(3, "-"));
    }
}
