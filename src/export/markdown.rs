//! Markdown dossier rendering

use crate::document::{Block, StructuredDocument};

/// Renders the document as Markdown
///
/// # Arguments
///
/// * `document` - The assembled document
///
/// # Returns
///
/// UTF-8 encoded Markdown
pub fn render_markdown(document: &StructuredDocument) -> Vec<u8> {
    format_markdown(document).into_bytes()
}

/// Formats the document as a Markdown string
///
/// Layout: a top-level heading, the generation timestamp, a rule, then per
/// page a second-level heading, a bold source line, the content blocks, and
/// a trailing rule.
pub fn format_markdown(document: &StructuredDocument) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", single_line(&document.title)));
    md.push_str(&format!(
        "Generated on: {}\n\n",
        document.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    md.push_str("---\n\n");

    for page in &document.pages {
        md.push_str(&format!("## {}\n\n", page.title));
        md.push_str(&format!("**Source:** {}\n\n", page.url));

        for block in &page.blocks {
            md.push_str(&format_block(block));
            md.push_str("\n\n");
        }

        md.push_str("---\n\n");
    }

    md
}

fn format_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("{} {}", "#".repeat(usize::from(*level)), single_line(text))
        }
        Block::List { ordered, items } => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if *ordered {
                    format!("{}. {}", index + 1, item)
                } else {
                    format!("- {}", item)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        // Two trailing spaces force a hard line break
        Block::Paragraph { text } => text.lines().collect::<Vec<_>>().join("  \n"),
    }
}

/// Joins a multi-line heading into one line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
