//! Category table: the predefined set, icon lookup, and the id assigner.

use serde::{Deserialize, Serialize};

use crate::classify::labels;
use crate::event::Event;

/// One itinerary category. Ids are dense and 1-based: 1-11 are the
/// predefined set, anything beyond is appended in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub icon: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    fn new(id: u32, icon: &str, title: &str) -> Self {
        Self {
            id,
            icon: icon.to_string(),
            title: title.to_string(),
            description: None,
        }
    }
}

/// The eleven predefined categories, ids 1-11 in this exact order.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "📍", labels::GENERAL),
        Category::new(2, "✈️", labels::FLIGHTS),
        Category::new(3, "🏨", labels::HOTELS),
        Category::new(4, "🍽️", labels::FOOD),
        Category::new(5, "🍰", labels::DESSERTS),
        Category::new(6, "🍸", labels::BARS_NIGHTLIFE),
        Category::new(7, "🛍️", labels::SHOPPING),
        Category::new(8, "🎡", labels::ATTRACTIONS),
        Category::new(9, "🎈", labels::GIMMICKS),
        Category::new(10, "🌲", labels::NATURE),
        Category::new(11, "🚌", labels::TOURISM),
    ]
}

/// Icon for a label minted outside the predefined table. Unmapped labels
/// get an empty icon rather than a placeholder.
pub fn icon_for(label: &str) -> &'static str {
    match label {
        labels::BEACH_BARS => "🏖️",
        labels::BEACH => "🏝️",
        labels::MUSEUMS => "🏛️",
        labels::MARKETS => "🧺",
        _ => "",
    }
}

/// Stamp a numeric category id onto every event label.
///
/// A fold over the event list: starts from the predefined table, appends
/// each unknown label with `id = len + 1` the first time it shows up, and
/// returns the final table together with one id per event, parallel to the
/// input. Re-running the same list from a fresh baseline yields identical
/// ids.
pub fn assign_categories(events: &[Event]) -> (Vec<Category>, Vec<u32>) {
    let mut categories = default_categories();
    let mut ids = Vec::with_capacity(events.len());

    for event in events {
        let id = match categories.iter().find(|c| c.title == event.category) {
            Some(existing) => existing.id,
            None => {
                let id = categories.len() as u32 + 1;
                categories.push(Category::new(id, icon_for(&event.category), &event.category));
                id
            }
        };
        ids.push(id);
    }

    (categories, ids)
}
