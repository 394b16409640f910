//! Drives `ScreenState` against a contact store.
//!
//! # Invariants
//! - Storage failures are logged and never surface as panics or banners.
//! - A failed write keeps the in-memory mutation and leaves the prompt open.

use crate::model::contact::Contact;
use crate::repo::contact_repo::ContactStore;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::screen::state::{Effect, PersistOutcome, ScreenAction, ScreenState};
use log::{error, warn};

/// Result of dispatching one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The transition requested no write.
    Idle,
    Persisted(PersistOutcome),
    PersistFailed(PersistOutcome),
}

/// Contact list screen bound to a store.
pub struct ContactScreen<S: KeyValueStore> {
    store: ContactStore<S>,
    state: ScreenState,
}

impl<S: KeyValueStore> ContactScreen<S> {
    /// Loads the stored list and builds the initial screen.
    ///
    /// A failed load is logged and starts from an empty list.
    pub fn open(kv: S) -> Self {
        let store = ContactStore::new(kv);
        let contacts = store.load().unwrap_or_else(|err| {
            warn!("event=screen_open module=screen status=degraded reason=load_failed error={err}");
            Vec::new()
        });

        Self::with_contacts(store, contacts)
    }

    /// Like [`ContactScreen::open`], but returns the load error instead of
    /// starting empty. Callers that must not overwrite an unreadable blob use this.
    pub fn try_open(kv: S) -> RepoResult<Self> {
        let store = ContactStore::new(kv);
        let contacts = store.load()?;
        Ok(Self::with_contacts(store, contacts))
    }

    fn with_contacts(store: ContactStore<S>, contacts: Vec<Contact>) -> Self {
        let mut state = ScreenState::default();
        state.apply(ScreenAction::Loaded(contacts));
        Self { store, state }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn store(&self) -> &ContactStore<S> {
        &self.store
    }

    /// Applies `action` and runs the effect it requests.
    pub fn dispatch(&mut self, action: ScreenAction) -> Dispatched {
        let Some(effect) = self.state.apply(action) else {
            return Dispatched::Idle;
        };

        match effect {
            Effect::Persist { contacts, outcome } => match self.store.save_all(&contacts) {
                Ok(()) => {
                    self.state.apply(ScreenAction::PersistSucceeded(outcome));
                    Dispatched::Persisted(outcome)
                }
                Err(err) => {
                    error!(
                        "event=screen_persist module=screen status=error id={} error={err}",
                        outcome.contact_id()
                    );
                    Dispatched::PersistFailed(outcome)
                }
            },
        }
    }
}
