//! Static translation table for itinerary copy.
//!
//! Just enough localization to name trips and title categories. Anything
//! without a translation falls back to the untranslated key, so an unknown
//! locale degrades to English-ish output instead of failing.

use roam_core::classify::labels;

use crate::request::TravelingWith;

/// Translate a copy key for a locale.
pub fn localize(locale: &str, key: &str) -> String {
    translation(locale, key).unwrap_or(key).to_string()
}

/// Localized trip name from destination, length and company.
pub fn trip_name(
    locale: &str,
    destination: &str,
    num_of_days: u32,
    traveling_with: TravelingWith,
) -> String {
    let with = companion(locale, traveling_with);
    match locale {
        "he" => format!("{num_of_days} ימים ב{destination} עם {with}"),
        _ => format!("{num_of_days} days in {destination} with {with}"),
    }
}

fn translation(locale: &str, key: &str) -> Option<&'static str> {
    match locale {
        "he" => hebrew(key),
        _ => None,
    }
}

fn hebrew(key: &str) -> Option<&'static str> {
    Some(match key {
        labels::GENERAL => "כללי",
        labels::FLIGHTS => "טיסות",
        labels::HOTELS => "מלונות",
        labels::FOOD => "אוכל",
        labels::DESSERTS => "קינוחים",
        labels::BARS_NIGHTLIFE => "ברים וחיי לילה",
        labels::SHOPPING => "קניות",
        labels::ATTRACTIONS => "אטרקציות",
        labels::GIMMICKS => "גימיקים",
        labels::NATURE => "טבע",
        labels::TOURISM => "תיירות",
        labels::BEACH_BARS => "ברי חוף",
        labels::BEACH => "חוף",
        labels::MUSEUMS => "מוזיאונים",
        labels::MARKETS => "שווקים",
        _ => return None,
    })
}

fn companion(locale: &str, traveling_with: TravelingWith) -> &'static str {
    match (locale, traveling_with) {
        ("he", TravelingWith::Spouse) => "בן/בת הזוג",
        ("he", TravelingWith::Family) => "המשפחה",
        ("he", TravelingWith::Friends) => "חברים",
        (_, TravelingWith::Spouse) => "my partner",
        (_, TravelingWith::Family) => "the family",
        (_, TravelingWith::Friends) => "friends",
    }
}
