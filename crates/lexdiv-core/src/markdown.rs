//! Markdown prose extraction.
//!
//! Code, markup and metadata would count as vocabulary if scored raw, so
//! Markdown input is reduced to the words a reader actually reads. Parsing
//! goes through pulldown-cmark rather than regexes.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reduce Markdown to plain prose.
///
/// Removes:
/// - YAML frontmatter
/// - Code blocks and inline code
/// - Raw HTML
/// - Image alt text
///
/// Keeps:
/// - Heading text
/// - Paragraph, list, blockquote and table cell text
/// - Link text (not the URL)
/// - Emphasis and strong text (without markers)
///
/// Block boundaries become line breaks, so words on either side never merge.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(body, options);

    let mut prose = String::with_capacity(body.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Image { .. }) => skip_depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),

            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => prose.push('\n'),

            _ => {}
        }
    }

    prose
}

/// Skip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    #[test]
    fn removes_code_blocks() {
        let input = "Some text.\n\n```rust\nlet x = 1;\n```\n\nMore text.";
        let result = strip_to_prose(input);
        assert!(!result.contains("let x"));
        assert!(result.contains("Some text."));
        assert!(result.contains("More text."));
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\nstatus: draft\nauthor: someone\n---\n\nSome text.";
        let result = strip_to_prose(input);
        assert!(!result.contains("status"));
        assert!(result.contains("Some text."));
    }

    #[test]
    fn unterminated_frontmatter_is_kept() {
        let input = "---\nnot closed\n\nBody.";
        assert!(strip_to_prose(input).contains("Body."));
    }

    #[test]
    fn keeps_heading_text() {
        let result = strip_to_prose("# Opening Remarks\n\nBody text.");
        assert_eq!(tokenize(&result), vec!["opening", "remarks", "body", "text"]);
    }

    #[test]
    fn keeps_link_text_drops_url() {
        let result = strip_to_prose("Read [the guide](https://example.com/docs) first.");
        assert!(result.contains("the guide"));
        assert!(!result.contains("example"));
    }

    #[test]
    fn drops_inline_code_and_images() {
        let result = strip_to_prose("Call `parse_args()` now. ![diagram of flow](flow.png)");
        assert_eq!(tokenize(&result), vec!["call", "now"]);
    }

    #[test]
    fn drops_emphasis_markers() {
        let result = strip_to_prose("This is **bold** and *italic*.");
        assert_eq!(tokenize(&result), vec!["this", "is", "bold", "and", "italic"]);
    }

    #[test]
    fn list_items_do_not_merge() {
        let result = strip_to_prose("- first\n- second\n");
        assert_eq!(tokenize(&result), vec!["first", "second"]);
    }

    #[test]
    fn table_cells_do_not_merge() {
        let result = strip_to_prose("| left | right |\n|---|---|\n| one | two |\n");
        assert_eq!(tokenize(&result), vec!["left", "right", "one", "two"]);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(strip_to_prose("").is_empty());
    }
}
