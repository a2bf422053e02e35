//! List normalizer: decoded items to display-ready links.

use std::collections::HashSet;

use crate::list::client::DEFAULT_BASE_URL;
use crate::types::event::{CityLeagueLink, EventItem};

/// Marker substring identifying City League events.
pub const CITY_MARKER: &str = "シティ";

/// Whether an item belongs to the City League category.
pub fn is_city_league(item: &EventItem) -> bool {
    item.event_title.contains(CITY_MARKER)
        || item
            .league_name
            .as_deref()
            .is_some_and(|name| name.contains(CITY_MARKER))
}

/// Filter, categorize, deduplicate, and sort decoded items.
///
/// Retains City League items with a recognized league category, collapses
/// duplicate canonical URLs (first occurrence wins, stable), and sorts by
/// date key descending. Lexicographic comparison is chronological because
/// date keys are fixed-width `YYYYMMDD`.
pub fn normalize(items: &[EventItem]) -> Vec<CityLeagueLink> {
    let mut links: Vec<CityLeagueLink> = items
        .iter()
        .filter(|item| is_city_league(item))
        .filter_map(|item| CityLeagueLink::from_item(item, DEFAULT_BASE_URL))
        .collect();

    let mut seen = HashSet::new();
    links.retain(|link| seen.insert(link.url.clone()));

    links.sort_by(|a, b| b.date_key.cmp(&a.date_key));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::LeagueCategory;

    fn item(
        event_holding_id: u64,
        date_key: &str,
        title: &str,
        league_name: Option<&str>,
    ) -> EventItem {
        EventItem {
            id: event_holding_id,
            event_holding_id,
            event_date_params: date_key.to_string(),
            event_date: format!("{}/{}", &date_key[4..6], &date_key[6..8]),
            event_title: title.to_string(),
            prefecture_name: "東京都".to_string(),
            shop_name: Some("ショップA".to_string()),
            league_name: league_name.map(String::from),
        }
    }

    #[test]
    fn test_retains_only_categorized_city_league_items() {
        let items = vec![
            item(1, "20251006", "シティリーグ 2026", Some("オープンリーグ")),
            // City marker but no recognized category
            item(2, "20251006", "シティリーグ 2026", Some("マスターリーグ")),
            // Recognized category but not a City League event
            item(3, "20251006", "ジムバトル", Some("オープンリーグ")),
            item(4, "20251006", "シティリーグ 2026", Some("ジュニアリーグ")),
        ];

        let links = normalize(&items);
        assert_eq!(links.len(), 2);
        assert!(links
            .iter()
            .all(|l| matches!(l.category, LeagueCategory::Open | LeagueCategory::Junior)));
    }

    #[test]
    fn test_city_marker_in_league_name_suffices() {
        let items = vec![item(1, "20251006", "大会", Some("シティリーグ オープン"))];
        assert_eq!(normalize(&items).len(), 1);
    }

    #[test]
    fn test_duplicate_urls_collapse_to_first() {
        let mut duplicate = item(1, "20251004", "シティリーグ", Some("オープンリーグ"));
        duplicate.prefecture_name = "大阪府".to_string();

        let items = vec![
            item(1, "20251006", "シティリーグ", Some("オープンリーグ")),
            duplicate,
        ];

        let links = normalize(&items);
        assert_eq!(links.len(), 1);
        // First occurrence wins
        assert_eq!(links[0].date_key, "20251006");
        assert!(links[0].title.contains("東京都"));
    }

    #[test]
    fn test_sorted_by_date_key_descending() {
        let items = vec![
            item(1, "20251004", "シティリーグ", Some("シニアリーグ")),
            item(2, "20251006", "シティリーグ", Some("オープンリーグ")),
            item(3, "20251005", "シティリーグ", Some("ジュニアリーグ")),
        ];

        let links = normalize(&items);
        let keys: Vec<&str> = links.iter().map(|l| l.date_key.as_str()).collect();
        assert_eq!(keys, vec!["20251006", "20251005", "20251004"]);
    }
}
