//! Events that can occur in a conversation

use crate::listings::Listing;

/// Label of the entry button shown with the welcome message
pub const GO_LABEL: &str = "Let's go!";

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Text starting with `/`, routed outside the state-driven text path
    Command(Command),
    /// Free text, interpreted according to the stored state
    Text { text: String },
    /// A press on one of the fixed button vocabularies
    Button(Button),
    /// Button payload outside every vocabulary
    UnknownButton { payload: String },
    /// The listing search finished (successfully or not)
    SearchComplete { outcome: SearchOutcome },
}

impl Event {
    /// Classify an inbound text message as a command or free text
    pub fn from_text(text: &str) -> Self {
        if text.starts_with('/') {
            Event::Command(Command::parse(text))
        } else {
            Event::Text {
                text: text.to_string(),
            }
        }
    }

    /// Classify a button payload against the closed vocabularies
    pub fn from_payload(payload: &str) -> Self {
        Button::parse(payload).map_or_else(
            || Event::UnknownButton {
                payload: payload.to_string(),
            },
            Event::Button,
        )
    }
}

/// Result of running the listing search, fed back into the state machine
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Vec<Listing>),
    Failed,
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Preferences,
    Unknown(String),
}

impl Command {
    /// Match on the first whitespace-separated token
    pub fn parse(text: &str) -> Self {
        let name = text.split_whitespace().next().unwrap_or(text);
        match name {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/preferences" => Command::Preferences,
            _ => Command::Unknown(text.to_string()),
        }
    }
}

// ============================================================================
// Button Vocabularies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Flat,
    House,
}

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::Flat, PropertyType::House];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Flat => "Flat",
            PropertyType::House => "House",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bedrooms {
    Studio,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Bedrooms {
    pub const ALL: [Bedrooms; 6] = [
        Bedrooms::Studio,
        Bedrooms::One,
        Bedrooms::Two,
        Bedrooms::Three,
        Bedrooms::Four,
        Bedrooms::Five,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bedrooms::Studio => "Studio",
            Bedrooms::One => "1",
            Bedrooms::Two => "2",
            Bedrooms::Three => "3",
            Bedrooms::Four => "4",
            Bedrooms::Five => "5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Furnishing {
    Furnished,
    Unfurnished,
}

impl Furnishing {
    pub const ALL: [Furnishing; 2] = [Furnishing::Furnished, Furnishing::Unfurnished];

    pub fn label(self) -> &'static str {
        match self {
            Furnishing::Furnished => "Furnished",
            Furnishing::Unfurnished => "Unfurnished",
        }
    }
}

/// A recognised button press. The payload is the label itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Go,
    PropertyType(PropertyType),
    Bedrooms(Bedrooms),
    Furnishing(Furnishing),
}

impl Button {
    /// Exact-match a payload against every vocabulary
    pub fn parse(payload: &str) -> Option<Self> {
        if payload == GO_LABEL {
            return Some(Button::Go);
        }
        if let Some(p) = PropertyType::ALL.into_iter().find(|p| p.label() == payload) {
            return Some(Button::PropertyType(p));
        }
        if let Some(b) = Bedrooms::ALL.into_iter().find(|b| b.label() == payload) {
            return Some(Button::Bedrooms(b));
        }
        Furnishing::ALL
            .into_iter()
            .find(|f| f.label() == payload)
            .map(Button::Furnishing)
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Go => GO_LABEL,
            Button::PropertyType(p) => p.label(),
            Button::Bedrooms(b) => b.label(),
            Button::Furnishing(f) => f.label(),
        }
    }
}
