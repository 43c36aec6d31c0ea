//! Synthetic listings for local runs without provider credentials

use super::{Listing, ListingError, ListingProvider};
use crate::state_machine::SearchCriteria;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

const STREETS: [&str; 5] = [
    "High Street",
    "Church Road",
    "Main Street",
    "Park Road",
    "London Road",
];

const CONDITIONS: [&str; 4] = [
    "well-maintained",
    "newly renovated",
    "in good condition",
    "charming",
];

/// Generates 1 to 5 plausible listings inside the requested price range
#[derive(Debug, Default)]
pub struct SyntheticListings;

impl SyntheticListings {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R, criteria: &SearchCriteria) -> Vec<Listing> {
        let low = criteria.min_price.min(criteria.max_price);
        let high = criteria.min_price.max(criteria.max_price);
        let count = rng.gen_range(1..=5);
        let kind = criteria.property_type.to_lowercase();

        (0..count)
            .map(|_| {
                let price = rng.gen_range(low..=high);
                let street = STREETS.choose(rng).copied().unwrap_or(STREETS[0]);
                let condition = CONDITIONS.choose(rng).copied().unwrap_or(CONDITIONS[0]);
                Listing {
                    id: rng.gen_range(0..10_000).to_string(),
                    address: format!("{} {street}, {}", rng.gen_range(1..=100), criteria.area),
                    price,
                    bedrooms: criteria.bedrooms,
                    description: format!(
                        "A lovely {} bedroom {kind} in {}. This property is {condition} and available for £{price} per month.",
                        criteria.bedrooms, criteria.area
                    ),
                    url: String::new(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl ListingProvider for SyntheticListings {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError> {
        Ok(Self::generate(&mut rand::thread_rng(), criteria))
    }

    async fn test_connection(&self) -> Result<(), ListingError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
