//! User-facing text

use super::state::UserPreferences;
use crate::listings::Listing;

pub const WELCOME: &str = "Hello! I'm here to assist you in finding your perfect home. \
     I'll start by asking a few questions to tailor your search preferences.";
pub const HELP: &str = "Hello! I'm here to assist you in finding your perfect home.\n\n\
     /start - begin a new search\n\
     /preferences - show your saved preferences\n\
     /help - show this message";
pub const SELECT_PROPERTY: &str = "🏠 Select the property type.";
pub const PRICE_RANGE: &str =
    "💰 Let me know the price range for the monthly price in GBP. Format: 1200 - 1800.";
pub const SELECT_BEDROOMS: &str = "Select the number of bedrooms.";
pub const SELECT_FURNISHED: &str =
    "Do you want to search for furnished or unfurnished accommodation?";
pub const SELECT_AREA: &str = "Please reply with the area you'd like to follow. \
     It could be a neighbourhood, borough, or postcode area (e.g. Camden or N7).";

pub const NOT_UNDERSTOOD: &str = "I'm sorry, but I don't recognize this command. \
     Please type /help to see the available list of commands.";
pub const GENERIC_ERROR: &str = "Sorry, an error occurred. Please try again.";
pub const BAD_PRICE_RANGE: &str =
    "I'm sorry, I couldn't understand the price range. Please try again.";
pub const BAD_BEDROOMS: &str =
    "I'm sorry, I couldn't understand the number of bedrooms. Please try again.";
pub const SEARCH_FAILED: &str = "Sorry, I encountered an error while searching for properties. \
     Please try again later.";
pub const NO_RESULTS: &str = "I'm sorry, but I couldn't find any properties matching your criteria. \
     Please try broadening your search.";
pub const NEW_SEARCH_HINT: &str = "To start a new search, just type /start";
pub const NO_PREFERENCES: &str =
    "You don't have any saved preferences yet. Start a new search to set your preferences!";

/// Maximum number of listings rendered individually
pub const MAX_LISTINGS_SHOWN: usize = 5;

pub fn results_summary(count: usize) -> String {
    format!("Great! I found {count} properties matching your criteria. Here are the top results:")
}

pub fn listing(listing: &Listing) -> String {
    format!(
        "🏠 {}\n 💰 £{}\n 🛏 {} bedrooms",
        listing.address, listing.price, listing.bedrooms
    )
}

/// Summary of every non-blank field, or `None` when nothing is saved
pub fn preferences_summary(prefs: &UserPreferences) -> Option<String> {
    if prefs.has_no_fields() {
        return None;
    }
    let mut summary = String::from("Your saved preferences:\n\n");
    for (label, value) in prefs.fields() {
        if let Some(value) = value {
            summary.push_str(label);
            summary.push_str(": ");
            summary.push_str(value);
            summary.push('\n');
        }
    }
    Some(summary)
}
