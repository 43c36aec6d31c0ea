//! Transport-facing event model
//!
//! A chat transport turns platform updates into `Inbound` events and renders
//! `Outbound` intents back into platform messages.

pub mod console;

use crate::state_machine::UserId;

/// Event delivered by a transport to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Free text or a `/command`
    Text { user: UserId, text: String },
    /// A button press; the payload is the button's label
    Button { user: UserId, payload: String },
}

impl Inbound {
    pub fn user(&self) -> UserId {
        match self {
            Inbound::Text { user, .. } | Inbound::Button { user, .. } => *user,
        }
    }
}

/// Intent emitted by the engine for a transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        user: UserId,
        text: String,
    },
    /// Text with ordered choices rendered as buttons
    Prompt {
        user: UserId,
        text: String,
        choices: Vec<String>,
    },
}

impl Outbound {
    pub fn user(&self) -> UserId {
        match self {
            Outbound::Text { user, .. } | Outbound::Prompt { user, .. } => *user,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn text(&self) -> &str {
        match self {
            Outbound::Text { text, .. } | Outbound::Prompt { text, .. } => text,
        }
    }
}
