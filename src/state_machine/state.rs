//! Conversation state types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// User Identity
// ============================================================================

/// Stable identifier the chat transport assigns to one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Position of a user in the search-preferences flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvState {
    /// Start of the flow, also reached after a finished or reset search
    #[default]
    Initial,
    /// Property-type buttons have been shown
    AwaitingPropertyType,
    /// Waiting for a free-text price range such as `1200 - 1800`
    AwaitingPriceRange,
    /// Bedroom buttons have been shown
    AwaitingBedrooms,
    /// Furnished/unfurnished buttons have been shown
    AwaitingFurnished,
    /// Waiting for a free-text area, which triggers the search
    AwaitingArea,
}

impl ConvState {
    #[allow(dead_code)] // Used in tests
    pub const ALL: [ConvState; 6] = [
        ConvState::Initial,
        ConvState::AwaitingPropertyType,
        ConvState::AwaitingPriceRange,
        ConvState::AwaitingBedrooms,
        ConvState::AwaitingFurnished,
        ConvState::AwaitingArea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConvState::Initial => "initial",
            ConvState::AwaitingPropertyType => "awaiting_property_type",
            ConvState::AwaitingPriceRange => "awaiting_price_range",
            ConvState::AwaitingBedrooms => "awaiting_bedrooms",
            ConvState::AwaitingFurnished => "awaiting_furnished",
            ConvState::AwaitingArea => "awaiting_area",
        }
    }

    /// Decode a stored state column. Unknown or stale values fall back to
    /// `Initial`, where free text is answered with the "not understood" notice.
    pub fn from_stored(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| {
            tracing::warn!(stored = %raw, "Unrecognized stored state, treating as initial");
            ConvState::Initial
        })
    }

    /// Encode for the state column
    pub fn to_stored(self) -> String {
        format!("\"{}\"", self.as_str())
    }
}

impl fmt::Display for ConvState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Preference Record
// ============================================================================

/// One record per user identity; the only source of truth for flow position
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    pub state: ConvState,
    pub property_type: Option<String>,
    /// Raw text as typed, parsed only when the search runs
    pub price_range: Option<String>,
    pub bedrooms: Option<String>,
    pub furnished: Option<String>,
    pub area: Option<String>,
}

impl UserPreferences {
    /// Blank record in the initial state
    pub fn blank() -> Self {
        Self::default()
    }

    /// True when no preference field holds a value (state is ignored)
    pub fn has_no_fields(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Labelled preference fields in display order
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("Property Type", self.property_type.as_deref()),
            ("Price Range", self.price_range.as_deref()),
            ("Bedrooms", self.bedrooms.as_deref()),
            ("Furnished", self.furnished.as_deref()),
            ("Area", self.area.as_deref()),
        ]
    }
}

/// Treat empty or whitespace-only column values as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
