//! Zoopla inventory provider implementation

use super::{Listing, ListingError, ListingProvider};
use crate::config::ZooplaConfig;
use crate::state_machine::SearchCriteria;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Search used by `test_connection` to prove credentials and inventory work
fn probe_criteria() -> SearchCriteria {
    SearchCriteria {
        area: "London".to_string(),
        min_price: 1000,
        max_price: 2000,
        bedrooms: 2,
        property_type: "Flat".to_string(),
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Network-backed provider using OAuth client credentials
pub struct ZooplaClient {
    client: Client,
    client_id: String,
    client_secret: String,
    agency_ref: String,
    token_url: String,
    inventory_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl ZooplaClient {
    pub fn new(config: &ZooplaConfig) -> Result<Self, ListingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ListingError::unknown(format!("Failed to create HTTP client: {e}")))?;
        let base = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            agency_ref: config.agency_ref.clone(),
            token_url: format!("{base}/token"),
            inventory_url: format!("{base}/inventory"),
            token: Mutex::new(None),
        })
    }

    /// Return a cached bearer token, fetching a new one once it has expired
    async fn bearer_token(&self) -> Result<String, ListingError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ListingError::from_reqwest(&e))?;

        let body = Self::read_body(response).await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ListingError::decode(format!("Failed to parse token response: {e}")))?;

        let fresh = CachedToken {
            access_token: token.access_token,
            expires_at: token_expiry(Instant::now(), token.expires_in)?,
        };
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ListingError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ListingError::network(format!("Failed to read response: {e}")))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(classify_error(status, &body))
        }
    }
}

fn token_expiry(now: Instant, expires_in: u64) -> Result<Instant, ListingError> {
    now.checked_add(Duration::from_secs(expires_in))
        .ok_or_else(|| ListingError::decode(format!("Token lifetime out of range: {expires_in}s")))
}

/// Query parameters for the inventory endpoint
fn search_query(criteria: &SearchCriteria) -> [(&'static str, String); 5] {
    [
        ("address", criteria.area.clone()),
        ("minimum_price", criteria.min_price.to_string()),
        ("maximum_price", criteria.max_price.to_string()),
        ("minimum_beds", criteria.bedrooms.to_string()),
        ("property_type", criteria.property_type.clone()),
    ]
}

fn classify_error(status: StatusCode, body: &str) -> ListingError {
    match status.as_u16() {
        401 | 403 => ListingError::auth(format!("Authentication failed: {body}")),
        400 => ListingError::invalid_request(format!("Invalid request: {body}")),
        500..=599 => ListingError::server_error(format!("Server error: {body}")),
        _ => ListingError::unknown(format!("HTTP {status}: {body}")),
    }
}

fn parse_inventory(body: &str) -> Result<Vec<Listing>, ListingError> {
    let inventory: InventoryResponse = serde_json::from_str(body)
        .map_err(|e| ListingError::decode(format!("Failed to parse inventory: {e}")))?;
    Ok(inventory.properties)
}

#[async_trait]
impl ListingProvider for ZooplaClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError> {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .get(&self.inventory_url)
            .query(&search_query(criteria))
            .header("AgencyRef", &self.agency_ref)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ListingError::from_reqwest(&e))?;

        tracing::debug!(status = %response.status(), url = %response.url(), "Inventory response received");

        let body = Self::read_body(response).await?;
        parse_inventory(&body)
    }

    async fn test_connection(&self) -> Result<(), ListingError> {
        self.bearer_token().await?;
        let listings = self.search(&probe_criteria()).await?;
        match listings.first() {
            Some(first) => tracing::info!(
                count = listings.len(),
                first_address = %first.address,
                "Probe search returned listings"
            ),
            None => tracing::info!("Probe search succeeded with no listings"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "zoopla"
    }
}

// Zoopla API types

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct InventoryResponse {
    #[serde(default)]
    properties: Vec<Listing>,
}
