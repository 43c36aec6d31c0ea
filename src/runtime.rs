//! Runtime for executing conversations
//!
//! Couples the pure state machine to a preference store, a listing provider
//! and an outbound channel.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationEngine;
pub use traits::*;

use crate::listings::ListingProvider;
use std::sync::Arc;

/// Type alias for the production engine with concrete implementations
pub type ProductionEngine = ConversationEngine<DatabaseStorage, Arc<dyn ListingProvider>>;
