//! Event list types: decoded search items and display-ready links.

use serde::{Deserialize, Serialize};

/// One event as decoded from a search-endpoint page.
///
/// JSON keys are snake_case except `leagueName`. Immutable once decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventItem {
    pub id: u64,
    pub event_holding_id: u64,
    /// Sortable date key, fixed-width `YYYYMMDD` (e.g. `20251006`)
    pub event_date_params: String,
    /// Human date label (e.g. `10/06`)
    pub event_date: String,
    pub event_title: String,
    pub prefecture_name: String,
    pub shop_name: Option<String>,
    #[serde(rename = "leagueName")]
    pub league_name: Option<String>,
}

/// League category, derived from substring matching on league-name text.
///
/// Items matching none of the markers are excluded, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeagueCategory {
    Open,
    Senior,
    Junior,
}

impl LeagueCategory {
    /// All categories, in classification order.
    pub const ALL: [LeagueCategory; 3] = [
        LeagueCategory::Open,
        LeagueCategory::Senior,
        LeagueCategory::Junior,
    ];

    /// Classify a league name; first marker match wins.
    pub fn from_league_name(name: &str) -> Option<Self> {
        if name.contains("オープン") {
            return Some(LeagueCategory::Open);
        }
        if name.contains("シニア") {
            return Some(LeagueCategory::Senior);
        }
        if name.contains("ジュニア") {
            return Some(LeagueCategory::Junior);
        }
        None
    }

    /// Japanese display label.
    pub fn label(&self) -> &'static str {
        match self {
            LeagueCategory::Open => "オープンリーグ",
            LeagueCategory::Senior => "シニアリーグ",
            LeagueCategory::Junior => "ジュニアリーグ",
        }
    }
}

/// Display-ready link to one event's result page.
///
/// The canonical `url` is the identity key: any produced list holds at
/// most one link per URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLeagueLink {
    pub title: String,
    pub url: String,
    pub category: LeagueCategory,
    pub date_key: String,
    pub date_label: String,
}

impl CityLeagueLink {
    /// Build a link from a decoded item, or `None` when the league name
    /// matches no category.
    pub fn from_item(item: &EventItem, base_url: &str) -> Option<Self> {
        let category = LeagueCategory::from_league_name(item.league_name.as_deref().unwrap_or(""))?;

        Some(Self {
            title: format!(
                "シティリーグ {} {} {} {}",
                item.prefecture_name,
                item.event_date,
                item.shop_name.as_deref().unwrap_or(""),
                item.event_title,
            ),
            url: detail_url(base_url, item.event_holding_id),
            category,
            date_key: item.event_date_params.clone(),
            date_label: item.event_date.clone(),
        })
    }
}

/// Canonical result-page URL for an event holding.
pub fn detail_url(base_url: &str, event_holding_id: u64) -> String {
    format!("{}/event/detail/{}/result", base_url, event_holding_id)
}
