//! Activity categories for itinerary entries.
//!
//! Every activity planned on a day carries one of these types. The type is
//! stored as its lowercase name and parsed leniently from user input.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kinds of activity that can be planned on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityType {
    /// Landmarks, museums, viewpoints
    #[default]
    Sightseeing,
    /// Restaurants, cafes, markets
    Food,
    /// Shops and boutiques
    Shopping,
    /// Shows, nightlife, events
    Entertainment,
    /// Flights, trains, transfers
    Transport,
    /// Check-ins and stays
    Accommodation,
    /// Anything else
    Other,
}

impl ActivityType {
    /// Returns a slice containing all activity types in display order.
    pub fn all() -> &'static [ActivityType] {
        &[
            ActivityType::Sightseeing,
            ActivityType::Food,
            ActivityType::Shopping,
            ActivityType::Entertainment,
            ActivityType::Transport,
            ActivityType::Accommodation,
            ActivityType::Other,
        ]
    }

    /// Returns the stored (lowercase) name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Sightseeing => "sightseeing",
            ActivityType::Food => "food",
            ActivityType::Shopping => "shopping",
            ActivityType::Entertainment => "entertainment",
            ActivityType::Transport => "transport",
            ActivityType::Accommodation => "accommodation",
            ActivityType::Other => "other",
        }
    }

    /// Returns a human-readable display label for the type.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Sightseeing => "Sightseeing",
            ActivityType::Food => "Food & Dining",
            ActivityType::Shopping => "Shopping",
            ActivityType::Entertainment => "Entertainment",
            ActivityType::Transport => "Transport",
            ActivityType::Accommodation => "Accommodation",
            ActivityType::Other => "Other",
        }
    }

    /// Short marker used in day cards.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::Sightseeing => "\u{1F3DB}",   // 🏛
            ActivityType::Food => "\u{1F37D}",          // 🍽
            ActivityType::Shopping => "\u{1F6CD}",      // 🛍
            ActivityType::Entertainment => "\u{1F3AD}", // 🎭
            ActivityType::Transport => "\u{1F686}",     // 🚆
            ActivityType::Accommodation => "\u{1F3E8}", // 🏨
            ActivityType::Other => "\u{1F4CC}",         // 📌
        }
    }

    /// Returns the next type in display order, wrapping around.
    ///
    /// Used by the activity form to cycle through types with a single key.
    pub fn next(&self) -> ActivityType {
        let all = Self::all();
        let index = all.iter().position(|t| t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Parses user input into an ActivityType.
    ///
    /// Matching is case-insensitive and supports aliases:
    /// - "sightseeing" | "sight" | "see" -> Sightseeing
    /// - "food" | "eat" | "dining" -> Food
    /// - "shopping" | "shop" -> Shopping
    /// - "entertainment" | "fun" | "show" -> Entertainment
    /// - "transport" | "travel" | "transit" -> Transport
    /// - "accommodation" | "hotel" | "stay" -> Accommodation
    /// - "other" -> Other
    ///
    /// Returns `None` if the input doesn't match any type.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<ActivityType> {
        match s.to_lowercase().trim() {
            "sightseeing" | "sight" | "see" => Some(ActivityType::Sightseeing),
            "food" | "eat" | "dining" => Some(ActivityType::Food),
            "shopping" | "shop" => Some(ActivityType::Shopping),
            "entertainment" | "fun" | "show" => Some(ActivityType::Entertainment),
            "transport" | "travel" | "transit" => Some(ActivityType::Transport),
            "accommodation" | "hotel" | "stay" => Some(ActivityType::Accommodation),
            "other" => Some(ActivityType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Stored trips may carry types this build doesn't know; they load as Other.
impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActivityType::from_str(&raw).unwrap_or(ActivityType::Other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_returns_seven_types() {
        let all = ActivityType::all();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0], ActivityType::Sightseeing);
        assert_eq!(all[6], ActivityType::Other);
    }

    #[rstest]
    #[case("sightseeing", ActivityType::Sightseeing)]
    #[case("Sight", ActivityType::Sightseeing)]
    #[case("eat", ActivityType::Food)]
    #[case("DINING", ActivityType::Food)]
    #[case("shop", ActivityType::Shopping)]
    #[case("fun", ActivityType::Entertainment)]
    #[case("transit", ActivityType::Transport)]
    #[case("hotel", ActivityType::Accommodation)]
    #[case("  other ", ActivityType::Other)]
    fn test_from_str_aliases(#[case] input: &str, #[case] expected: ActivityType) {
        assert_eq!(ActivityType::from_str(input), Some(expected));
    }

    #[test]
    fn test_from_str_invalid_input() {
        assert!(ActivityType::from_str("skydiving").is_none());
        assert!(ActivityType::from_str("").is_none());
    }

    #[test]
    fn test_as_str_parses_back() {
        for t in ActivityType::all() {
            assert_eq!(ActivityType::from_str(t.as_str()), Some(*t));
        }
    }

    #[test]
    fn test_next_wraps_to_first() {
        assert_eq!(ActivityType::Sightseeing.next(), ActivityType::Food);
        assert_eq!(ActivityType::Other.next(), ActivityType::Sightseeing);
    }

    #[test]
    fn test_serializes_as_lowercase_name() {
        let json = serde_json::to_string(&ActivityType::Accommodation).unwrap();
        assert_eq!(json, "\"accommodation\"");
    }

    #[test]
    fn test_unknown_type_deserializes_as_other() {
        let parsed: ActivityType = serde_json::from_str("\"nightlife\"").unwrap();
        assert_eq!(parsed, ActivityType::Other);
    }
}
