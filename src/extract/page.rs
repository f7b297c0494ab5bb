//! HTML parser for building the email search space
//!
//! The search space is the page's visible text followed by the `href` of
//! every anchor, so addresses that only appear in `mailto:` links are found
//! alongside the ones printed on the page.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Elements whose text content is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Builds the string scanned for email addresses
///
/// Layout: `<visible text> <href> <href> ...`. Text segments are trimmed
/// and joined with a single space; anchors without an `href` contribute an
/// empty string.
///
/// # Example
///
/// ```
/// use mailscout::extract::build_search_space;
///
/// let html = r#"<p>Write to us</p><a href="mailto:hi@example.com">mail</a>"#;
/// assert_eq!(build_search_space(html), "Write to us mail mailto:hi@example.com");
/// ```
pub fn build_search_space(html: &str) -> String {
    let document = Html::parse_document(html);

    let text = visible_text(&document);
    let hrefs = anchor_hrefs(&document);

    format!("{} {}", text, hrefs)
}

/// Collects the text nodes of the document, skipping script and style bodies
fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));

            if hidden {
                None
            } else {
                Some(text.trim())
            }
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-joined `href` values of every `<a>` element
fn anchor_hrefs(document: &Html) -> String {
    document
        .select(&ANCHOR_SELECTOR)
        .map(|anchor| anchor.value().attr("href").unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}
