//! Small DOM helpers shared by the extraction strategies.

use scraper::ElementRef;
use url::Url;

use crate::detail::text::collapse_ws;

/// Text of the element's direct text-node children only, excluding
/// descendant elements.
pub(crate) fn own_text(el: &ElementRef) -> String {
    el.children()
        .filter_map(|node| node.value().as_text().map(|t| &*t.text))
        .collect()
}

/// Full descendant text of an element, whitespace-collapsed.
pub(crate) fn element_text(el: &ElementRef) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Next sibling that is an element, skipping text and comment nodes.
pub(crate) fn next_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Resolve an href to an absolute URL string against the page base.
pub(crate) fn resolve_href(href: &str, base: &Url) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        base.join(href).ok().map(|u| u.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_own_text_excludes_descendants() {
        let doc = Html::parse_document(
            "<table><tr><th>主催者<span>（必須）</span></th><td>値</td></tr></table>",
        );
        let sel = Selector::parse("th").unwrap();
        let th = doc.select(&sel).next().unwrap();

        assert_eq!(own_text(&th), "主催者");
        assert_eq!(element_text(&th), "主催者（必須）");
    }

    #[test]
    fn test_next_element_skips_text_nodes() {
        let doc = Html::parse_document(
            "<table><tr><th>主催者</th> <td>ショップA</td></tr></table>",
        );
        let sel = Selector::parse("th").unwrap();
        let th = doc.select(&sel).next().unwrap();

        let td = next_element(&th).unwrap();
        assert_eq!(element_text(&td), "ショップA");
    }

    #[test]
    fn test_resolve_href() {
        let base = Url::parse("https://players.pokemon-card.com/event/detail/1/result").unwrap();

        assert_eq!(
            resolve_href("/deck/confirm/abc", &base).unwrap(),
            "https://players.pokemon-card.com/deck/confirm/abc"
        );
        assert_eq!(
            resolve_href("https://other.example/deck/x", &base).unwrap(),
            "https://other.example/deck/x"
        );
    }
}
