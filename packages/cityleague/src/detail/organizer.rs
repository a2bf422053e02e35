//! Organizer extraction with ordered fallback strategies.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::detail::dom::{element_text, next_element, own_text};
use crate::detail::text::collapse_ws;

const ORGANIZER_MARKER: &str = "主催者";

/// Extract the organizer string from a rendered document.
///
/// Strategies are tried in order; the first success wins. A miss on all
/// of them returns an empty string, never an error.
pub fn extract_organizer(doc: &Html) -> String {
    let strategies: [(&str, fn(&Html) -> Option<String>); 3] = [
        ("table-header", organizer_from_table),
        ("definition-list", organizer_from_definition_list),
        ("free-text", organizer_from_body_text),
    ];

    for (name, strategy) in strategies {
        if let Some(value) = strategy(doc) {
            debug!(strategy = name, "organizer extracted");
            return value;
        }
    }
    String::new()
}

/// Table layout: a header cell labeled 主催者 followed by the value cell.
fn organizer_from_table(doc: &Html) -> Option<String> {
    let th = Selector::parse("table th").unwrap();
    let header = doc
        .select(&th)
        .find(|el| own_text(el).contains(ORGANIZER_MARKER))?;
    next_element(&header).map(|cell| element_text(&cell))
}

/// Definition-list layout: a 主催者 term followed by its definition.
fn organizer_from_definition_list(doc: &Html) -> Option<String> {
    let dt = Selector::parse("dl dt").unwrap();
    let term = doc
        .select(&dt)
        .find(|el| own_text(el).contains(ORGANIZER_MARKER))?;
    next_element(&term).map(|def| element_text(&def))
}

/// Free-text fallback: a labeled single-line mention in the body text,
/// delimited by the next schedule/venue label or end of text.
fn organizer_from_body_text(doc: &Html) -> Option<String> {
    let body = Selector::parse("body").unwrap();
    let text = doc
        .select(&body)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))?;
    let text = collapse_ws(&text);

    let labeled = Regex::new(r"主催者[:：]\s*(.+?)\s(開催日|日時|会場|場所|$)").unwrap();
    labeled
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
