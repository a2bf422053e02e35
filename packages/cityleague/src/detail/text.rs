//! Text-cleaning helpers for loosely structured page text.

use regex::Regex;

/// The 47 prefecture names, used to truncate free-text shop names.
const PREFECTURE_PATTERN: &str = "北海道|青森県|岩手県|宮城県|秋田県|山形県|福島県|茨城県|栃木県|群馬県|埼玉県|千葉県|東京都|神奈川県|新潟県|富山県|石川県|福井県|山梨県|長野県|岐阜県|静岡県|愛知県|三重県|滋賀県|京都府|大阪府|兵庫県|奈良県|和歌山県|鳥取県|島根県|岡山県|広島県|山口県|徳島県|香川県|愛媛県|高知県|福岡県|佐賀県|長崎県|熊本県|大分県|宮崎県|鹿児島県|沖縄県";

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_ws(text: &str) -> String {
    let ws = Regex::new(r"\s+").unwrap();
    ws.replace_all(text, " ").trim().to_string()
}

/// Strip date and time noise: `YYYY年M月D日`, `M/D`, and `HH:MM`
/// patterns, then collapse whitespace.
pub fn clean_date_noise(text: &str) -> String {
    let jp_date = Regex::new(r"\d{4}年\s*\d{1,2}月\s*\d{1,2}日").unwrap();
    let slash_date = Regex::new(r"\d{1,2}/\d{1,2}").unwrap();
    let clock = Regex::new(r"\d{1,2}:\d{2}").unwrap();

    let t = jp_date.replace_all(text, "");
    let t = slash_date.replace_all(&t, "");
    let t = clock.replace_all(&t, "");
    collapse_ws(&t)
}

/// Keep only the shop-name portion of a free-text venue string.
///
/// Cuts at the first postal-code marker, then at the first prefecture
/// name preceded by whitespace, keeps only the first line, and trims.
pub fn keep_shop_name(text: &str) -> String {
    let mut t = text.trim().to_string();

    let postal = Regex::new(r"〒\s*\d{3}-?\d{4}").unwrap();
    if let Some(m) = postal.find(&t) {
        t.truncate(m.start());
    }

    let prefecture = Regex::new(&format!(r"\s({})", PREFECTURE_PATTERN)).unwrap();
    if let Some(m) = prefecture.find(&t) {
        t.truncate(m.start());
    }

    if let Some(first_line) = t.lines().next() {
        t = first_line.to_string();
    }
    t.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  ショップ\n\tA  B "), "ショップ A B");
        assert_eq!(collapse_ws(""), "");
    }

    #[test]
    fn test_clean_date_noise() {
        assert_eq!(
            clean_date_noise("大会 2025年10月6日 10:30 開始"),
            "大会 開始"
        );
        assert_eq!(clean_date_noise("シティリーグ 10/06"), "シティリーグ");
        assert_eq!(clean_date_noise("2025年 10月 6日"), "");
    }

    #[test]
    fn test_keep_shop_name_cuts_at_postal_code() {
        assert_eq!(
            keep_shop_name("ショップA〒123-4567 東京都渋谷区1-2-3"),
            "ショップA"
        );
        assert_eq!(keep_shop_name("ショップA 〒1234567 大阪市"), "ショップA");
    }

    #[test]
    fn test_keep_shop_name_cuts_at_prefecture() {
        assert_eq!(keep_shop_name("ショップB 東京都渋谷区1-2-3"), "ショップB");
        assert_eq!(keep_shop_name("カードラボ 神奈川県横浜市"), "カードラボ");
    }

    #[test]
    fn test_keep_shop_name_prefecture_requires_leading_whitespace() {
        // Prefecture text embedded without whitespace is part of the name.
        assert_eq!(keep_shop_name("東京都カード店"), "東京都カード店");
    }

    #[test]
    fn test_keep_shop_name_keeps_first_line() {
        assert_eq!(keep_shop_name("ショップC\n営業時間 10:00"), "ショップC");
    }

    #[test]
    fn test_keep_shop_name_plain_passthrough() {
        assert_eq!(keep_shop_name("  ショップD  "), "ショップD");
    }
}
