//! Listing types shared by every provider

use serde::{Deserialize, Serialize};

/// One property listing, read-only to the conversation core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "listing_id")]
    pub id: String,
    pub address: String,
    pub price: u32,
    #[serde(rename = "num_bedrooms")]
    pub bedrooms: u32,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "details_url", default)]
    pub url: String,
}
