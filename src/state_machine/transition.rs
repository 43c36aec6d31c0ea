//! Pure state transition function
//!
//! Two dispatch paths: button presses are keyed on the payload alone and
//! ignore the stored state, free text is keyed on the stored state.

use super::criteria::{CriteriaError, SearchCriteria};
use super::event::{
    Bedrooms, Button, Command, Event, Furnishing, PropertyType, SearchOutcome, GO_LABEL,
};
use super::messages;
use super::state::{ConvState, UserPreferences};
use super::Effect;
use crate::listings::Listing;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_prefs: UserPreferences,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(prefs: UserPreferences) -> Self {
        Self {
            new_prefs: prefs,
            effects: vec![],
        }
    }

    /// Record unchanged, no persistence
    pub fn unchanged(prefs: &UserPreferences) -> Self {
        Self::new(prefs.clone())
    }

    /// Record changed; the full record is written before any reply is sent
    pub fn persisted(prefs: UserPreferences) -> Self {
        Self::new(prefs).with_effect(Effect::PersistPreferences)
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    #[allow(dead_code)] // Used in tests
    pub fn persists(&self) -> bool {
        self.effects.contains(&Effect::PersistPreferences)
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("search result arrived while user was in state {0}")]
    StaleSearchResult(ConvState),
}

/// Pure transition function
///
/// Given the same record and event it always produces the same record and
/// effects, with no I/O.
pub fn transition(
    prefs: &UserPreferences,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Command(command) => Ok(handle_command(prefs, &command)),
        Event::Button(button) => Ok(handle_button(prefs, button)),

        // Unknown buttons get no reply
        Event::UnknownButton { payload } => Ok(TransitionResult::unchanged(prefs)
            .with_effect(Effect::ReportUnrecognized { input: payload })),

        Event::Text { text } => Ok(handle_text(prefs, text)),

        Event::SearchComplete { outcome } => {
            if prefs.state != ConvState::AwaitingArea {
                return Err(TransitionError::StaleSearchResult(prefs.state));
            }
            Ok(handle_search_outcome(prefs, outcome))
        }
    }
}

fn handle_command(prefs: &UserPreferences, command: &Command) -> TransitionResult {
    match command {
        Command::Start => TransitionResult::persisted(UserPreferences::blank())
            .with_effect(Effect::prompt(messages::WELCOME, [GO_LABEL])),
        Command::Help => TransitionResult::unchanged(prefs).with_effect(Effect::text(messages::HELP)),
        Command::Preferences => {
            let text = messages::preferences_summary(prefs)
                .unwrap_or_else(|| messages::NO_PREFERENCES.to_string());
            TransitionResult::unchanged(prefs).with_effect(Effect::text(text))
        }
        Command::Unknown(input) => TransitionResult::unchanged(prefs)
            .with_effect(Effect::ReportUnrecognized {
                input: input.clone(),
            })
            .with_effect(Effect::text(messages::NOT_UNDERSTOOD)),
    }
}

fn handle_button(prefs: &UserPreferences, button: Button) -> TransitionResult {
    let mut next = prefs.clone();
    match button {
        // A stale Go press mid-flow re-shows the prompt but keeps the user's place
        Button::Go if prefs.state != ConvState::Initial => {
            TransitionResult::unchanged(prefs).with_effect(property_type_prompt())
        }
        Button::Go => {
            next.state = ConvState::AwaitingPropertyType;
            TransitionResult::persisted(next).with_effect(property_type_prompt())
        }
        Button::PropertyType(property_type) => {
            next.property_type = Some(property_type.label().to_string());
            next.state = ConvState::AwaitingPriceRange;
            TransitionResult::persisted(next).with_effect(Effect::text(messages::PRICE_RANGE))
        }
        Button::Bedrooms(bedrooms) => {
            next.bedrooms = Some(bedrooms.label().to_string());
            next.state = ConvState::AwaitingFurnished;
            TransitionResult::persisted(next).with_effect(furnished_prompt())
        }
        Button::Furnishing(furnishing) => {
            next.furnished = Some(furnishing.label().to_string());
            next.state = ConvState::AwaitingArea;
            TransitionResult::persisted(next).with_effect(Effect::text(messages::SELECT_AREA))
        }
    }
}

fn handle_text(prefs: &UserPreferences, text: String) -> TransitionResult {
    let mut next = prefs.clone();
    match prefs.state {
        ConvState::AwaitingPriceRange => {
            next.price_range = Some(text);
            next.state = ConvState::AwaitingBedrooms;
            TransitionResult::persisted(next).with_effect(bedrooms_prompt())
        }
        // Typed bedroom counts skip the furnishing question
        ConvState::AwaitingBedrooms => {
            next.bedrooms = Some(text);
            next.state = ConvState::AwaitingArea;
            TransitionResult::persisted(next).with_effect(Effect::text(messages::SELECT_AREA))
        }
        ConvState::AwaitingArea => {
            next.area = Some(text);
            // The state only advances once the search outcome arrives. A
            // parse failure leaves the user here to retry the area.
            match SearchCriteria::from_preferences(&next) {
                Ok(criteria) => {
                    TransitionResult::persisted(next).with_effect(Effect::run_search(criteria))
                }
                Err(error) => {
                    let notice = match error {
                        CriteriaError::PriceRange(_) => messages::BAD_PRICE_RANGE,
                        CriteriaError::Bedrooms(_) => messages::BAD_BEDROOMS,
                    };
                    TransitionResult::persisted(next)
                        .with_effect(Effect::ReportInvalidInput { error })
                        .with_effect(Effect::text(notice))
                }
            }
        }
        ConvState::Initial | ConvState::AwaitingPropertyType | ConvState::AwaitingFurnished => {
            TransitionResult::unchanged(prefs).with_effect(Effect::text(messages::NOT_UNDERSTOOD))
        }
    }
}

fn handle_search_outcome(prefs: &UserPreferences, outcome: SearchOutcome) -> TransitionResult {
    let mut next = prefs.clone();
    next.state = ConvState::Initial;
    let result = TransitionResult::persisted(next);

    match outcome {
        SearchOutcome::Failed => result.with_effect(Effect::text(messages::SEARCH_FAILED)),
        SearchOutcome::Found(listings) if listings.is_empty() => {
            result.with_effect(Effect::text(messages::NO_RESULTS))
        }
        SearchOutcome::Found(listings) => result
            .with_effect(Effect::text(messages::results_summary(listings.len())))
            .with_effects(
                listings
                    .iter()
                    .take(messages::MAX_LISTINGS_SHOWN)
                    .map(|l: &Listing| Effect::text(messages::listing(l))),
            )
            .with_effect(Effect::text(messages::NEW_SEARCH_HINT)),
    }
}

fn property_type_prompt() -> Effect {
    Effect::prompt(messages::SELECT_PROPERTY, PropertyType::ALL.map(PropertyType::label))
}

fn bedrooms_prompt() -> Effect {
    Effect::prompt(messages::SELECT_BEDROOMS, Bedrooms::ALL.map(Bedrooms::label))
}

fn furnished_prompt() -> Effect {
    Effect::prompt(messages::SELECT_FURNISHED, Furnishing::ALL.map(Furnishing::label))
}
