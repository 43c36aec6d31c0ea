//! Conversation engine
//!
//! Loads a user's record, runs the pure transition, and executes the
//! resulting effects. Each user's events are serialised by a per-user lock,
//! which is released while the listing provider is queried.

use super::traits::PreferenceStore;
use crate::listings::ListingProvider;
use crate::state_machine::{
    messages, transition, Effect, Event, SearchCriteria, SearchOutcome, UserId, UserPreferences,
};
use crate::transport::{Inbound, Outbound};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per user identity. Entries only live while some task
/// holds or waits on them.
#[derive(Default)]
struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    fn map(&self) -> MutexGuard<'_, HashMap<UserId, Arc<AsyncMutex<()>>>> {
        self.locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn acquire(&self, user: UserId) -> UserGuard<'_> {
        // The map lock is only held to look up the entry, never across an await
        let lock = Arc::clone(self.map().entry(user).or_default());
        UserGuard {
            locks: self,
            user,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Drop the entry once nobody else holds a handle to it. Handles are
    /// only cloned under the map lock, so the count cannot grow meanwhile.
    fn prune(&self, user: UserId) {
        let mut locks = self.map();
        if locks.get(&user).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&user);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map().len()
    }
}

/// Held user lock; releasing it prunes the idle map entry
struct UserGuard<'a> {
    locks: &'a UserLocks,
    user: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.prune(self.user);
    }
}

/// Generic engine that can work with any store and listing provider
pub struct ConversationEngine<S, P>
where
    S: PreferenceStore,
    P: ListingProvider,
{
    store: S,
    provider: P,
    outbox: mpsc::Sender<Outbound>,
    locks: UserLocks,
}

impl<S, P> ConversationEngine<S, P>
where
    S: PreferenceStore,
    P: ListingProvider,
{
    pub fn new(store: S, provider: P, outbox: mpsc::Sender<Outbound>) -> Self {
        Self {
            store,
            provider,
            outbox,
            locks: UserLocks::default(),
        }
    }

    /// Process one inbound event to completion
    pub async fn dispatch(&self, inbound: Inbound) {
        let user = inbound.user();
        let event = match &inbound {
            Inbound::Text { text, .. } => Event::from_text(text),
            Inbound::Button { payload, .. } => Event::from_payload(payload),
        };
        tracing::debug!(user_id = %user, ?inbound, "Dispatching event");

        let search = {
            let _guard = self.locks.acquire(user).await;
            let Some(prefs) = self.load_or_create(user).await else {
                return;
            };
            self.apply(user, &prefs, event).await
        };

        if let Some(criteria) = search {
            self.run_search(user, &criteria).await;
        }
    }

    /// Query the provider without holding the user lock, then feed the
    /// outcome back through the state machine against a fresh snapshot
    async fn run_search(&self, user: UserId, criteria: &SearchCriteria) {
        let outcome = match self.provider.search(criteria).await {
            Ok(listings) => SearchOutcome::Found(listings),
            Err(e) => {
                tracing::error!(
                    user_id = %user,
                    area = %criteria.area,
                    error = %e,
                    "Listing search failed"
                );
                SearchOutcome::Failed
            }
        };

        let _guard = self.locks.acquire(user).await;
        let Some(prefs) = self.load_or_create(user).await else {
            return;
        };
        self.apply(user, &prefs, Event::SearchComplete { outcome }).await;
    }

    /// Fetch the user's record, creating a blank one on first contact.
    /// Returns `None` (after telling the user) if the store is unavailable.
    async fn load_or_create(&self, user: UserId) -> Option<UserPreferences> {
        match self.store.get(user).await {
            Ok(Some(prefs)) => Some(prefs),
            Ok(None) => {
                tracing::info!(user_id = %user, "New user, creating blank record");
                let prefs = UserPreferences::blank();
                self.persist(user, &prefs).await;
                Some(prefs)
            }
            Err(e) => {
                tracing::error!(user_id = %user, error = %e, "Failed to load user record");
                self.send(Outbound::Text {
                    user,
                    text: messages::GENERIC_ERROR.to_string(),
                })
                .await;
                None
            }
        }
    }

    /// Run one transition and execute its effects in order. Returns the
    /// criteria of a requested search, which the caller runs unlocked.
    async fn apply(
        &self,
        user: UserId,
        prefs: &UserPreferences,
        event: Event,
    ) -> Option<SearchCriteria> {
        let result = match transition(prefs, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(user_id = %user, error = %e, "Dropping event");
                return None;
            }
        };

        if result.new_prefs.state != prefs.state {
            tracing::info!(
                user_id = %user,
                from = %prefs.state,
                to = %result.new_prefs.state,
                "State transition"
            );
        }

        let mut search = None;
        for effect in result.effects {
            match effect {
                Effect::PersistPreferences => self.persist(user, &result.new_prefs).await,
                Effect::SendText { text } => self.send(Outbound::Text { user, text }).await,
                Effect::SendPrompt { text, choices } => {
                    self.send(Outbound::Prompt { user, text, choices }).await;
                }
                Effect::RunSearch { criteria } => search = Some(criteria),
                Effect::ReportInvalidInput { error } => {
                    tracing::warn!(user_id = %user, error = %error, "Rejected search input");
                }
                Effect::ReportUnrecognized { input } => {
                    tracing::warn!(
                        user_id = %user,
                        state = %prefs.state,
                        payload = %input,
                        "Unrecognized command or button"
                    );
                }
            }
        }
        search
    }

    /// Best-effort write: failures are logged and never retried
    async fn persist(&self, user: UserId, prefs: &UserPreferences) {
        if let Err(e) = self.store.put(user, prefs).await {
            tracing::error!(
                user_id = %user,
                state = %prefs.state,
                error = %e,
                "Failed to save user record"
            );
        }
    }

    async fn send(&self, outbound: Outbound) {
        if let Err(e) = self.outbox.send(outbound).await {
            tracing::warn!(user_id = %e.0.user(), "Outbound channel closed, reply dropped");
        }
    }
}
