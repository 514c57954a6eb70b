//! Print-ready HTML rendering
//!
//! The output is one self-contained page: print CSS, an on-screen
//! instructions box hidden when printing, a title page, a table of contents,
//! and one section per crawled page separated by page breaks.

use crate::document::{Block, StructuredDocument};
use crate::progress::truncate_chars;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Table-of-contents entries are cut to this many characters
pub const TOC_TITLE_MAX_CHARS: usize = 80;

const PRINT_CSS: &str = r#"@media print {
  body { margin: 0; }
  .page-break { page-break-before: always; }
  .no-print { display: none; }
}
body { font-family: "Times New Roman", Times, serif; line-height: 1.6; margin: 20px; color: #333; }
h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; font-size: 2em; }
h2 { color: #34495e; border-bottom: 1px solid #bdc3c7; padding-bottom: 5px; margin-top: 30px; }
h3 { color: #34495e; margin-top: 25px; }
h4 { color: #34495e; margin-top: 20px; }
.page-break { page-break-before: always; margin-top: 50px; }
.page-title { border-bottom: 2px solid #3498db; padding-bottom: 15px; margin-bottom: 20px; }
.page-url { font-size: 0.9em; color: #7f8c8d; margin-bottom: 20px; font-style: italic; }
p { margin: 10px 0; text-align: justify; }
.toc { background: #f8f9fa; padding: 20px; border-radius: 5px; margin-bottom: 30px; }
.toc h2 { margin-top: 0; }
.toc ul { list-style-type: none; padding-left: 0; }
.toc li { margin: 5px 0; }
.toc a { text-decoration: none; color: #3498db; }
.print-instruction { background: #e8f4f8; padding: 15px; border-radius: 5px; margin-bottom: 20px; border-left: 4px solid #3498db; }"#;

const PRINT_INSTRUCTIONS: &str = r#"<div class="print-instruction no-print">
<h3>How to convert this to PDF:</h3>
<ol>
<li>Press <strong>Ctrl+P</strong> (Windows/Linux) or <strong>Cmd+P</strong> (Mac)</li>
<li>Select "Save as PDF" as the destination</li>
<li>Choose "More settings" and select "Paper size: A4" for best results</li>
<li>Click "Save" and choose your download location</li>
</ol>
<p><em>This instruction box will not appear in the printed version.</em></p>
</div>"#;

/// Renders the document as a print-ready HTML page
///
/// # Arguments
///
/// * `document` - The assembled document
///
/// # Returns
///
/// UTF-8 encoded HTML
pub fn render_html(document: &StructuredDocument) -> Vec<u8> {
    format_html(document).into_bytes()
}

/// Formats the document as an HTML string
pub fn format_html(document: &StructuredDocument) -> String {
    let mut html = String::new();
    let title = encode_text(&document.title);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} - Ready for PDF</title>\n", title));
    html.push_str(&format!("<style>\n{}\n</style>\n", PRINT_CSS));
    html.push_str("</head>\n<body>\n");

    html.push_str(PRINT_INSTRUCTIONS);
    html.push('\n');

    // Title page
    html.push_str("<div class=\"title-page\">\n");
    html.push_str(&format!(
        "<h1 style=\"text-align: center; margin-top: 100px; font-size: 3em;\">{}</h1>\n",
        title
    ));
    html.push_str(&format!(
        "<p style=\"text-align: center; font-size: 1.2em; margin-top: 30px;\">Generated on {}</p>\n",
        document.generated_at.format("%B %d, %Y at %H:%M")
    ));
    html.push_str(&format!(
        "<p style=\"text-align: center; margin-top: 50px;\"><strong>Total Pages:</strong> {}</p>\n",
        document.page_count()
    ));
    html.push_str("</div>\n");

    // Table of contents
    html.push_str("<div class=\"page-break\"></div>\n");
    html.push_str("<div class=\"toc\">\n<h2>Table of Contents</h2>\n<ul>\n");
    for (index, page) in document.pages.iter().enumerate() {
        let number = index + 1;
        html.push_str(&format!(
            "<li>{}. <a href=\"#page-{}\">{}</a></li>\n",
            number,
            number,
            encode_text(&truncate_chars(&page.title, TOC_TITLE_MAX_CHARS))
        ));
    }
    html.push_str("</ul>\n</div>\n");

    // Pages
    for (index, page) in document.pages.iter().enumerate() {
        html.push_str("<div class=\"page-break\"></div>\n");
        html.push_str(&format!("<div id=\"page-{}\">\n", index + 1));
        html.push_str(&format!(
            "<h1 class=\"page-title\">{}</h1>\n",
            encode_text(&page.title)
        ));
        html.push_str(&format!(
            "<div class=\"page-url\">Source: <a href=\"{}\">{}</a></div>\n",
            encode_double_quoted_attribute(page.url.as_str()),
            encode_text(page.url.as_str())
        ));
        for block in &page.blocks {
            html.push_str(&format_block(block));
            html.push('\n');
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn format_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", encode_text(text), level = level)
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", encode_text(item)))
                .collect();
            format!("<{tag}>{items}</{tag}>")
        }
        Block::Paragraph { text } => {
            let lines: Vec<_> = text.lines().map(|line| encode_text(line).into_owned()).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        }
    }
}
