// src/utils/html_debug.rs
use std::fs;
use std::path::Path;

use crate::catalog::SectionType;
use crate::extractors::SectionIdentifier;
use crate::models::PageText;
use crate::utils::error::StorageError;

/// Escapes text for inclusion in HTML element content or attributes
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// CSS class by priority tier, so the most important hits stand out
fn css_class(section_type: SectionType) -> &'static str {
    match section_type.default_priority() {
        10 => "highlight-p10",
        9 => "highlight-p9",
        8 => "highlight-p8",
        7 => "highlight-p7",
        _ => "highlight-low",
    }
}

/// Renders one page's text with highlight spans around the given hits.
/// Hits overlapping an earlier highlight are skipped.
fn render_page(text: &str, highlights: &[(usize, usize, SectionType)]) -> String {
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, h.2)); // Sort by position

    let mut body = String::new();
    let mut last_pos = 0;
    for (start, end, section_type) in sorted_highlights {
        if start < last_pos {
            continue;
        }
        // Add content before the highlight
        body.push_str(&escape_html(&text[last_pos..start]));

        body.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class(section_type),
            start,
            end,
            escape_html(section_type.name())
        ));
        body.push_str(&escape_html(&text[start..end]));
        body.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    body.push_str(&escape_html(&text[last_pos..]));
    body
}

/// Builds an HTML view of a document with every primary pattern hit highlighted
pub fn render_debug_html(document: &str, pages: &[PageText], identifier: &SectionIdentifier) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    debug_html.push_str(&format!("<title>{}</title>\n<style>\n", escape_html(document)));

    // CSS for highlight colors
    debug_html.push_str("pre { white-space: pre-wrap; border-bottom: 1px dashed #999; }\n");
    debug_html.push_str(".highlight-p10 { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-p9 { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-p8 { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-p7 { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-low { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    for page in pages {
        let highlights = identifier.highlights(&page.text);
        debug_html.push_str(&format!(
            "<h2 id=\"page-{}\">Page {} ({} hits)</h2>\n<pre>",
            page.page_number,
            page.page_number,
            highlights.len()
        ));
        debug_html.push_str(&render_page(&page.text, &highlights));
        debug_html.push_str("</pre>\n");
    }

    // Close the HTML document
    debug_html.push_str("</body>\n</html>\n");
    debug_html
}

/// Writes the annotated debug view of a document to `path`
pub fn save_debug_html(
    path: &Path,
    document: &str,
    pages: &[PageText],
    identifier: &SectionIdentifier,
) -> Result<(), StorageError> {
    fs::write(path, render_debug_html(document, pages, identifier))?;
    tracing::info!("Saved debug HTML to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierConfig;

    #[test]
    fn test_render_page_escapes_and_highlights() {
        let text = "<b>MORTGAGE</b> & more";
        let html = render_page(text, &[(3, 11, SectionType::Mortgage)]);
        assert_eq!(
            html,
            "&lt;b&gt;<span class=\"highlight-p10\" title=\"Position: 3-11, Type: Mortgage\">MORTGAGE</span>&lt;/b&gt; &amp; more"
        );
    }

    #[test]
    fn test_overlapping_highlights_skipped() {
        let text = "DEED OF TRUST";
        let html = render_page(
            text,
            &[(0, 13, SectionType::Mortgage), (0, 4, SectionType::Deed)],
        );
        assert_eq!(html.matches("<span").count(), 1);
        assert!(html.contains("Type: Mortgage"));
    }

    #[test]
    fn test_render_debug_html_lists_pages() {
        let identifier = SectionIdentifier::new(IdentifierConfig::default()).unwrap();
        let pages = vec![
            PageText::new(1, "WIRE INSTRUCTIONS"),
            PageText::new(2, "nothing here"),
        ];
        let html = render_debug_html("pkg", &pages, &identifier);
        assert!(html.contains("Page 1 (1 hits)"));
        assert!(html.contains("Page 2 (0 hits)"));
        assert!(html.contains("Type: Wire Instructions"));
        assert!(html.ends_with("</html>\n"));
    }
}
