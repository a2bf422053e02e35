//! Awarded-deck extraction and next-page detection.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::detail::dom::{element_text, resolve_href};
use crate::types::detail::AwardedDeck;

const RANK_HEADER: &str = "順位";
const DECK_HEADERS: [&str; 2] = ["デッキ", "レシピ"];

/// Anchor texts that mark a "next page" control.
const NEXT_TEXT_MARKERS: [&str; 4] = ["次のページ", "次へ", "次ページ", "次へ進む"];

/// Known pagination-widget selectors, tried after the generic markers.
const NEXT_WIDGET_SELECTORS: [&str; 4] = [
    ".pagination a.next",
    ".c-pagination__next a",
    ".p-pagination__next a",
    ".bl_pager .next a",
];

/// Extract up to `remaining` (rank, deck URL) pairs from one page.
///
/// The table strategy runs first; the card/list strategy is consulted
/// only when the table strategy yields nothing. Relative hrefs are
/// resolved against `base` so deck URLs are always absolute.
pub fn extract_decks(doc: &Html, base: &Url, remaining: usize) -> Vec<AwardedDeck> {
    if remaining == 0 {
        return Vec::new();
    }

    let decks = decks_from_tables(doc, base, remaining);
    if !decks.is_empty() {
        return decks;
    }
    decks_from_cards(doc, base, remaining)
}

/// Table layout: header columns for rank and deck/recipe, one awarded
/// deck per body row.
fn decks_from_tables(doc: &Html, base: &Url, remaining: usize) -> Vec<AwardedDeck> {
    let table_sel = Selector::parse("table").unwrap();
    let header_sel = Selector::parse("th").unwrap();
    let row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();

    let mut out = Vec::new();

    'tables: for table in doc.select(&table_sel) {
        let headers: Vec<String> = table.select(&header_sel).map(|th| element_text(&th)).collect();

        let rank_col = match headers.iter().position(|h| h.contains(RANK_HEADER)) {
            Some(i) => i,
            None => continue,
        };
        let deck_col = match headers
            .iter()
            .position(|h| DECK_HEADERS.iter().any(|marker| h.contains(marker)))
        {
            Some(i) => i,
            None => continue,
        };

        for row in table.select(&row_sel) {
            let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
            if cells.is_empty() || rank_col >= cells.len() || deck_col >= cells.len() {
                continue;
            }

            let link = match cells[deck_col].select(&link_sel).next() {
                Some(a) => a,
                None => continue,
            };
            let href = match link.value().attr("href") {
                Some(h) => h,
                None => continue,
            };

            if let Some(url) = resolve_href(href, base) {
                out.push(AwardedDeck {
                    rank: element_text(&cells[rank_col]),
                    url,
                });
                if out.len() >= remaining {
                    break 'tables;
                }
            }
        }
    }

    out
}

/// Card/list layout: rank text and deck link live in the same block
/// element but not in a table.
fn decks_from_cards(doc: &Html, base: &Url, remaining: usize) -> Vec<AwardedDeck> {
    let candidate_sel = Selector::parse("li, div").unwrap();
    let deck_link_sel = Selector::parse(r#"a[href*="/deck"], a[href*="/recipe"]"#).unwrap();
    let rank_re = Regex::new(r"(\d+)位").unwrap();

    let mut out = Vec::new();

    for row in doc.select(&candidate_sel) {
        let text = element_text(&row);
        let rank = match rank_re.find(&text) {
            Some(m) => m.as_str().trim().to_string(),
            None => continue,
        };

        let link = match row.select(&deck_link_sel).next() {
            Some(a) => a,
            None => continue,
        };
        let href = match link.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        if let Some(url) = resolve_href(href, base) {
            out.push(AwardedDeck { rank, url });
            if out.len() >= remaining {
                break;
            }
        }
    }

    out
}

/// Locate the "next page" link, trying the known markers in fixed order.
pub fn find_next_page(doc: &Html, base: &Url) -> Option<Url> {
    let next = next_from_selector(doc, base, r#"a[rel="next"]"#)
        .or_else(|| next_from_link_text(doc, base))
        .or_else(|| {
            NEXT_WIDGET_SELECTORS
                .iter()
                .find_map(|sel| next_from_selector(doc, base, sel))
        });

    if let Some(url) = &next {
        debug!(next = %url, "next page link found");
    }
    next
}

fn next_from_selector(doc: &Html, base: &Url, selector: &str) -> Option<Url> {
    let sel = Selector::parse(selector).unwrap();
    let anchor = doc.select(&sel).next()?;
    resolve_anchor(&anchor, base)
}

fn next_from_link_text(doc: &Html, base: &Url) -> Option<Url> {
    let anchors = Selector::parse("a").unwrap();
    doc.select(&anchors)
        .find(|a| {
            let text = element_text(a);
            NEXT_TEXT_MARKERS.iter().any(|marker| text.contains(marker))
        })
        .and_then(|a| resolve_anchor(&a, base))
}

fn resolve_anchor(anchor: &ElementRef, base: &Url) -> Option<Url> {
    let href = anchor.value().attr("href")?;
    base.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://players.pokemon-card.com/event/detail/1/result").unwrap()
    }

    const RANKED_TABLE: &str = r#"<html><body>
        <table>
            <thead><tr><th>順位</th><th>プレイヤー</th><th>デッキレシピ</th></tr></thead>
            <tbody>
                <tr><td>1位</td><td>A</td><td><a href="/deck/confirm/aaa">レシピ</a></td></tr>
                <tr><td>2位</td><td>B</td><td><a href="/deck/confirm/bbb">レシピ</a></td></tr>
                <tr><td>3位</td><td>C</td><td><a href="/deck/confirm/ccc">レシピ</a></td></tr>
            </tbody>
        </table>
    </body></html>"#;

    #[test]
    fn test_table_strategy_extracts_ranked_links() {
        let doc = Html::parse_document(RANKED_TABLE);
        let decks = extract_decks(&doc, &base(), 16);

        assert_eq!(decks.len(), 3);
        assert_eq!(decks[0].rank, "1位");
        assert_eq!(
            decks[0].url,
            "https://players.pokemon-card.com/deck/confirm/aaa"
        );
        assert_eq!(decks[2].rank, "3位");
    }

    #[test]
    fn test_table_strategy_stops_at_remaining() {
        let doc = Html::parse_document(RANKED_TABLE);
        let decks = extract_decks(&doc, &base(), 2);

        assert_eq!(decks.len(), 2);
        assert_eq!(decks[1].rank, "2位");
    }

    #[test]
    fn test_table_without_deck_column_is_skipped() {
        let doc = Html::parse_document(
            r#"<html><body>
                <table>
                    <thead><tr><th>順位</th><th>プレイヤー</th></tr></thead>
                    <tbody><tr><td>1位</td><td><a href="/deck/x">A</a></td></tr></tbody>
                </table>
            </body></html>"#,
        );
        assert!(extract_decks(&doc, &base(), 16).is_empty());
    }

    #[test]
    fn test_rows_without_links_are_skipped() {
        let doc = Html::parse_document(
            r#"<html><body>
                <table>
                    <thead><tr><th>順位</th><th>デッキ</th></tr></thead>
                    <tbody>
                        <tr><td>1位</td><td>非公開</td></tr>
                        <tr><td>2位</td><td><a href="/deck/confirm/bbb">レシピ</a></td></tr>
                    </tbody>
                </table>
            </body></html>"#,
        );
        let decks = extract_decks(&doc, &base(), 16);
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].rank, "2位");
    }

    #[test]
    fn test_card_strategy_used_when_tables_yield_nothing() {
        let doc = Html::parse_document(
            r#"<html><body>
                <ul>
                    <li>3位 すごいデッキ <a href="https://example.com/deck/xyz">レシピを見る</a></li>
                    <li>優勝インタビュー <a href="/news/1">記事</a></li>
                </ul>
            </body></html>"#,
        );
        let decks = extract_decks(&doc, &base(), 16);

        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].rank, "3位");
        assert_eq!(decks[0].url, "https://example.com/deck/xyz");
    }

    #[test]
    fn test_card_strategy_honors_remaining() {
        let doc = Html::parse_document(
            r#"<html><body>
                <ul>
                    <li>1位 <a href="/deck/a">レシピ</a></li>
                    <li>2位 <a href="/deck/b">レシピ</a></li>
                    <li>3位 <a href="/recipe/c">レシピ</a></li>
                </ul>
            </body></html>"#,
        );
        assert_eq!(extract_decks(&doc, &base(), 2).len(), 2);
    }

    #[test]
    fn test_next_page_rel_attribute() {
        let doc = Html::parse_document(
            r#"<html><body><a rel="next" href="?offset=20">2</a></body></html>"#,
        );
        let next = find_next_page(&doc, &base()).unwrap();
        assert_eq!(
            next.as_str(),
            "https://players.pokemon-card.com/event/detail/1/result?offset=20"
        );
    }

    #[test]
    fn test_next_page_by_link_text() {
        let doc = Html::parse_document(
            r#"<html><body><a href="/event/detail/1/result?page=2">次へ</a></body></html>"#,
        );
        let next = find_next_page(&doc, &base()).unwrap();
        assert_eq!(
            next.as_str(),
            "https://players.pokemon-card.com/event/detail/1/result?page=2"
        );
    }

    #[test]
    fn test_next_page_widget_selector() {
        let doc = Html::parse_document(
            r#"<html><body>
                <div class="pagination"><a class="next" href="/p/2">&gt;</a></div>
            </body></html>"#,
        );
        let next = find_next_page(&doc, &base()).unwrap();
        assert_eq!(next.as_str(), "https://players.pokemon-card.com/p/2");
    }

    #[test]
    fn test_rel_next_takes_precedence_over_text() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a href="/text-next">次へ</a>
                <a rel="next" href="/rel-next">2</a>
            </body></html>"#,
        );
        let next = find_next_page(&doc, &base()).unwrap();
        assert_eq!(next.path(), "/rel-next");
    }

    #[test]
    fn test_no_next_page() {
        let doc = Html::parse_document("<html><body><a href=\"/other\">前へ</a></body></html>");
        assert!(find_next_page(&doc, &base()).is_none());
    }
}
