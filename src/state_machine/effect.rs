//! Effects produced by state transitions

use super::criteria::{CriteriaError, SearchCriteria};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the full preference record
    PersistPreferences,

    /// Plain text reply
    SendText { text: String },

    /// Reply with a set of buttons; each label comes back as a payload
    SendPrompt { text: String, choices: Vec<String> },

    /// Query the listing provider (runs with the user lock released)
    RunSearch { criteria: SearchCriteria },

    /// Stored input could not be turned into search criteria
    ReportInvalidInput { error: CriteriaError },

    /// Command or button payload outside every known vocabulary
    ReportUnrecognized { input: String },
}

impl Effect {
    pub fn text(text: impl Into<String>) -> Self {
        Effect::SendText { text: text.into() }
    }

    pub fn prompt<I, S>(text: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Effect::SendPrompt {
            text: text.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn run_search(criteria: SearchCriteria) -> Self {
        Effect::RunSearch { criteria }
    }
}
