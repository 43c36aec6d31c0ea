//! Mock implementations for testing
//!
//! These mocks enable scenario testing of the engine without real I/O.

use super::executor::ConversationEngine;
use super::traits::*;
use crate::listings::{Listing, ListingError, ListingProvider};
use crate::state_machine::{SearchCriteria, UserId, UserPreferences};
use crate::transport::{Inbound, Outbound};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};

// ============================================================================
// In-Memory Preference Store
// ============================================================================

/// In-memory store with switchable failures
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    records: Mutex<HashMap<UserId, UserPreferences>>,
    fail_gets: AtomicBool,
    fail_puts: AtomicBool,
    puts: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: UserId, prefs: UserPreferences) {
        self.records.lock().unwrap().insert(user, prefs);
    }

    pub fn record(&self, user: UserId) -> Option<UserPreferences> {
        self.records.lock().unwrap().get(&user).cloned()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Number of writes attempted, including failed ones
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user: UserId) -> Result<Option<UserPreferences>, String> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err("store unavailable".to_string());
        }
        Ok(self.record(user))
    }

    async fn put(&self, user: UserId, prefs: &UserPreferences) -> Result<(), String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err("disk full".to_string());
        }
        self.insert(user, prefs.clone());
        Ok(())
    }
}

// ============================================================================
// Scripted Listing Provider
// ============================================================================

/// Listing provider that returns queued responses
///
/// With a gate installed, each search signals `started` and then waits for
/// the gate before answering.
#[derive(Default)]
pub struct ScriptedListings {
    responses: Mutex<VecDeque<Result<Vec<Listing>, ListingError>>>,
    /// Record of all searches made
    pub requests: Mutex<Vec<SearchCriteria>>,
    gate: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
}

#[allow(dead_code)]
impl ScriptedListings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_listings(&self, listings: Vec<Listing>) {
        self.responses.lock().unwrap().push_back(Ok(listings));
    }

    pub fn queue_error(&self, error: ListingError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Hold searches until the returned gate is notified. The first handle
    /// fires when a search starts, the second releases it.
    pub fn install_gate(&self) -> (Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some((Arc::clone(&started), Arc::clone(&release)));
        (started, release)
    }

    pub fn recorded_requests(&self) -> Vec<SearchCriteria> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingProvider for ScriptedListings {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>, ListingError> {
        self.requests.lock().unwrap().push(criteria.clone());
        let gate = self.gate.lock().unwrap().clone();
        if let Some((started, release)) = gate {
            started.notify_one();
            release.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ListingError::network("No scripted response queued")))
    }

    async fn test_connection(&self) -> Result<(), ListingError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// Test Engine Harness
// ============================================================================

/// Engine wired to in-memory collaborators, with its outbox exposed
pub struct TestEngine {
    pub engine: Arc<ConversationEngine<Arc<InMemoryPreferenceStore>, Arc<ScriptedListings>>>,
    pub store: Arc<InMemoryPreferenceStore>,
    pub listings: Arc<ScriptedListings>,
    outbox: mpsc::Receiver<Outbound>,
}

#[allow(dead_code)]
impl TestEngine {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let listings = Arc::new(ScriptedListings::new());
        let (tx, outbox) = mpsc::channel(256);
        let engine = Arc::new(ConversationEngine::new(
            Arc::clone(&store),
            Arc::clone(&listings),
            tx,
        ));
        Self {
            engine,
            store,
            listings,
            outbox,
        }
    }

    pub async fn say(&self, user: UserId, text: &str) {
        self.engine
            .dispatch(Inbound::Text {
                user,
                text: text.to_string(),
            })
            .await;
    }

    pub async fn press(&self, user: UserId, payload: &str) {
        self.engine
            .dispatch(Inbound::Button {
                user,
                payload: payload.to_string(),
            })
            .await;
    }

    /// Everything sent since the last drain
    pub fn drain(&mut self) -> Vec<Outbound> {
        let mut sent = Vec::new();
        while let Ok(outbound) = self.outbox.try_recv() {
            sent.push(outbound);
        }
        sent
    }

    /// Texts sent since the last drain
    pub fn drain_texts(&mut self) -> Vec<String> {
        self.drain()
            .iter()
            .map(|o| o.text().to_string())
            .collect()
    }
}

/// A listing with predictable fields
pub fn listing(n: u32) -> Listing {
    Listing {
        id: format!("L{n}"),
        address: format!("{n} Camden Road, London"),
        price: 1000 + n * 100,
        bedrooms: 2,
        description: String::new(),
        url: String::new(),
    }
}
