//! Keyword classifier: free-text fragments from a point of interest (title,
//! cleaned description, place-type code) resolve to one category label.
//!
//! Matching is plain case-insensitive substring containment against an
//! ordered table. Order is the tie-break: earlier entries beat later ones,
//! and the hotels label loses to any more specific match so venues on hotel
//! grounds keep their own category.

use crate::event::PreferredTime;

/// Category labels. The first eleven are the predefined table; the rest are
/// created on demand by the classifier.
pub mod labels {
    pub const GENERAL: &str = "General";
    pub const FLIGHTS: &str = "Flights";
    pub const HOTELS: &str = "Hotels";
    pub const FOOD: &str = "Food";
    pub const DESSERTS: &str = "Desserts";
    pub const BARS_NIGHTLIFE: &str = "Bars & Nightlife";
    pub const SHOPPING: &str = "Shopping";
    pub const ATTRACTIONS: &str = "Attractions";
    pub const GIMMICKS: &str = "Gimmicks";
    pub const NATURE: &str = "Nature";
    pub const TOURISM: &str = "Tourism";
    pub const BEACH_BARS: &str = "Beach Bars";
    pub const BEACH: &str = "Beach";
    pub const MUSEUMS: &str = "Museums";
    pub const MARKETS: &str = "Markets";
}

/// The keyword table, scanned top to bottom. Specific labels sit above the
/// generic ones they overlap with ("beach bar" above "bar", "market" above
/// "shopping", "museum" above "attraction").
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        labels::FLIGHTS,
        &["flight", "airport", "airline", "terminal"],
    ),
    (
        labels::HOTELS,
        &[
            "hotel",
            "hostel",
            "resort",
            "guesthouse",
            "bed and breakfast",
            "aparthotel",
            "lodge",
        ],
    ),
    (labels::BEACH_BARS, &["beach bar", "beachfront", "tiki"]),
    (
        labels::BARS_NIGHTLIFE,
        &[
            "nightlife",
            "nightclub",
            "night club",
            "bar",
            "pub",
            "cocktail",
            "brewery",
            "taproom",
            "karaoke",
            "lounge",
        ],
    ),
    (
        labels::DESSERTS,
        &[
            "dessert",
            "ice cream",
            "gelato",
            "bakery",
            "pastry",
            "patisserie",
            "cake",
            "chocolate",
            "waffle",
            "crepe",
            "donut",
        ],
    ),
    (
        labels::FOOD,
        &[
            "restaurant",
            "street food",
            "food",
            "cuisine",
            "bistro",
            "brasserie",
            "steakhouse",
            "pizzeria",
            "sushi",
            "ramen",
            "tapas",
            "cafe",
            "coffee",
            "brunch",
            "eatery",
            "diner",
        ],
    ),
    (labels::MARKETS, &["market", "bazaar", "food hall"]),
    (
        labels::SHOPPING,
        &[
            "shopping",
            "mall",
            "boutique",
            "outlet",
            "department store",
            "souvenir",
            "flea",
        ],
    ),
    (labels::MUSEUMS, &["museum", "gallery", "exhibition"]),
    (
        labels::BEACH,
        &["beach", "cove", "lagoon", "boardwalk", "seafront", "promenade"],
    ),
    (
        labels::NATURE,
        &[
            "park",
            "garden",
            "nature",
            "hike",
            "hiking",
            "trail",
            "waterfall",
            "lake",
            "mountain",
            "forest",
            "botanical",
            "wildlife",
            "zoo",
            "aquarium",
            "cliff",
        ],
    ),
    (
        labels::GIMMICKS,
        &[
            "escape room",
            "arcade",
            "mini golf",
            "minigolf",
            "go kart",
            "karting",
            "paintball",
            "laser tag",
            "trampoline",
        ],
    ),
    (
        labels::ATTRACTIONS,
        &[
            "attraction",
            "theme park",
            "amusement",
            "landmark",
            "tower",
            "castle",
            "palace",
            "cathedral",
            "basilica",
            "temple",
            "synagogue",
            "mosque",
            "fortress",
            "observation",
            "ferris",
        ],
    ),
    (
        labels::TOURISM,
        &[
            "tour",
            "sightseeing",
            "cruise",
            "excursion",
            "day trip",
            "old town",
            "historic",
            "heritage",
            "monument",
            "viewpoint",
            "walking",
        ],
    ),
];

/// Classify text fragments into a category label.
///
/// Pure: the same fragments always produce the same label. All matching
/// categories are collected in table order, the hotels label is dropped
/// when anything more specific also matched, and the first survivor wins.
/// No match at all falls back to "General".
pub fn classify<S: AsRef<str>>(fragments: &[S]) -> &'static str {
    let lowered: Vec<String> = fragments
        .iter()
        .map(|f| f.as_ref().to_lowercase())
        .collect();

    let mut candidates: Vec<&'static str> = Vec::new();
    for (label, keywords) in CATEGORY_KEYWORDS {
        let hit = keywords
            .iter()
            .any(|kw| lowered.iter().any(|frag| frag.contains(kw)));
        if hit {
            candidates.push(label);
        }
    }

    if candidates.len() > 1 {
        candidates.retain(|label| *label != labels::HOTELS);
    }

    candidates.first().copied().unwrap_or(labels::GENERAL)
}

/// Time-of-day hint for a resolved label.
pub fn preferred_time_for(label: &str) -> PreferredTime {
    match label {
        labels::BARS_NIGHTLIFE => PreferredTime::Night,
        labels::DESSERTS => PreferredTime::Morning,
        labels::BEACH_BARS | labels::BEACH => PreferredTime::Noon,
        _ => PreferredTime::Unset,
    }
}
