//! Search criteria derived from a finished preference record

use super::event::Bedrooms;
use super::state::UserPreferences;
use thiserror::Error;

/// Validated input for one listing search. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub area: String,
    pub min_price: u32,
    pub max_price: u32,
    pub bedrooms: u32,
    pub property_type: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("invalid price range: {0:?}")]
    PriceRange(String),
    #[error("invalid bedroom count: {0:?}")]
    Bedrooms(String),
}

impl SearchCriteria {
    /// Build criteria from the stored record. Price is checked before bedrooms.
    pub fn from_preferences(prefs: &UserPreferences) -> Result<Self, CriteriaError> {
        let raw_price = prefs.price_range.as_deref().unwrap_or_default();
        let (min_price, max_price) = parse_price_range(raw_price)?;
        let bedrooms = parse_bedrooms(prefs.bedrooms.as_deref().unwrap_or_default())?;

        Ok(Self {
            area: prefs.area.clone().unwrap_or_default(),
            min_price,
            max_price,
            bedrooms,
            property_type: prefs.property_type.clone().unwrap_or_default(),
        })
    }
}

/// Parse `"<int> - <int>"`, tolerating whitespace around the dash
pub fn parse_price_range(raw: &str) -> Result<(u32, u32), CriteriaError> {
    let invalid = || CriteriaError::PriceRange(raw.to_string());
    let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
    let min = min.trim().parse().map_err(|_| invalid())?;
    let max = max.trim().parse().map_err(|_| invalid())?;
    Ok((min, max))
}

/// Parse a bedroom count; a studio counts as zero bedrooms
pub fn parse_bedrooms(raw: &str) -> Result<u32, CriteriaError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case(Bedrooms::Studio.label()) {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| CriteriaError::Bedrooms(raw.to_string()))
}
