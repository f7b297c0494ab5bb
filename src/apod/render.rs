//! HTML rendering for picture-of-the-day entries

use crate::apod::ApodEntry;

/// Formats an entry as a standalone HTML page
///
/// Images are embedded (linking to the HD version when present); any other
/// media type is shown as a link to the upstream URL.
pub fn render_apod_page(entry: &ApodEntry) -> String {
    let title = entry.title.as_deref().unwrap_or("Astronomy Picture of the Day");
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    if let Some(date) = &entry.date {
        html.push_str(&format!("<p class=\"date\">{}</p>\n", escape_html(date)));
    }

    if let Some(url) = &entry.url {
        if entry.is_image() {
            let href = entry.hdurl.as_deref().unwrap_or(url.as_str());
            html.push_str(&format!(
                "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>\n",
                escape_html(href),
                escape_html(url),
                escape_html(title)
            ));
        } else {
            html.push_str(&format!(
                "<p><a href=\"{}\">View {}</a></p>\n",
                escape_html(url),
                escape_html(entry.media_type.as_deref().unwrap_or("media"))
            ));
        }
    }

    if let Some(explanation) = &entry.explanation {
        html.push_str(&format!("<p class=\"explanation\">{}</p>\n", escape_html(explanation)));
    }

    if let Some(copyright) = &entry.copyright {
        html.push_str(&format!(
            "<p class=\"copyright\">&copy; {}</p>\n",
            escape_html(copyright.trim())
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escapes text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
