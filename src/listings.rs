//! Listing provider abstraction
//!
//! Provides a common interface over the network-backed and synthetic
//! property-listing sources. The variant is chosen once at startup.

mod error;
mod synthetic;
mod types;
mod zoopla;

pub use error::{ListingError, ListingErrorKind};
pub use synthetic::SyntheticListings;
pub use types::Listing;
pub use zoopla::ZooplaClient;

use crate::config::ListingsConfig;
use crate::state_machine::SearchCriteria;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for listing sources
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Search for listings matching the criteria
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError>;

    /// Check the provider is reachable; called once at startup
    async fn test_connection(&self) -> Result<(), ListingError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ListingProvider + ?Sized> ListingProvider for Arc<T> {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError> {
        (**self).search(criteria).await
    }

    async fn test_connection(&self) -> Result<(), ListingError> {
        (**self).test_connection().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Build the configured provider, wrapped for logging
pub fn from_config(config: &ListingsConfig) -> Result<Arc<dyn ListingProvider>, ListingError> {
    let inner: Arc<dyn ListingProvider> = match config {
        ListingsConfig::Synthetic => Arc::new(SyntheticListings::new()),
        ListingsConfig::Zoopla(zoopla) => Arc::new(ZooplaClient::new(zoopla)?),
    };
    Ok(Arc::new(LoggingProvider::new(inner)))
}

/// Logging wrapper for listing providers
pub struct LoggingProvider {
    inner: Arc<dyn ListingProvider>,
    name: String,
}

impl LoggingProvider {
    pub fn new(inner: Arc<dyn ListingProvider>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl ListingProvider for LoggingProvider {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError> {
        let start = std::time::Instant::now();
        let result = self.inner.search(criteria).await;
        let duration = start.elapsed();

        match &result {
            Ok(listings) => {
                tracing::info!(
                    provider = %self.name,
                    duration_ms = %duration.as_millis(),
                    area = %criteria.area,
                    min_price = criteria.min_price,
                    max_price = criteria.max_price,
                    bedrooms = criteria.bedrooms,
                    property_type = %criteria.property_type,
                    results = listings.len(),
                    "Listing search completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    provider = %self.name,
                    duration_ms = %duration.as_millis(),
                    area = %criteria.area,
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Listing search failed"
                );
            }
        }

        result
    }

    async fn test_connection(&self) -> Result<(), ListingError> {
        tracing::info!(provider = %self.name, "Testing listing provider connection");
        let result = self.inner.test_connection().await;
        match &result {
            Ok(()) => tracing::info!(provider = %self.name, "Listing provider reachable"),
            Err(e) => tracing::error!(provider = %self.name, error = %e, "Listing provider unreachable"),
        }
        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
