//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the engine with mock implementations.

use crate::db::Database;
use crate::state_machine::{UserId, UserPreferences};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for one preference record per user
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Get the stored record, `None` if the user has never interacted
    async fn get(&self, user: UserId) -> Result<Option<UserPreferences>, String>;

    /// Write every field of the record
    async fn put(&self, user: UserId, prefs: &UserPreferences) -> Result<(), String>;
}

#[async_trait]
impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    async fn get(&self, user: UserId) -> Result<Option<UserPreferences>, String> {
        (**self).get(user).await
    }

    async fn put(&self, user: UserId, prefs: &UserPreferences) -> Result<(), String> {
        (**self).put(user, prefs).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as a `PreferenceStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceStore for DatabaseStorage {
    async fn get(&self, user: UserId) -> Result<Option<UserPreferences>, String> {
        self.db.get_user(user).map_err(|e| e.to_string())
    }

    async fn put(&self, user: UserId, prefs: &UserPreferences) -> Result<(), String> {
        self.db.save_user(user, prefs).map_err(|e| e.to_string())
    }
}
