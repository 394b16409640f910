//! Core domain logic for the contact list.
//! This crate owns the contact model, its persistence and the screen state.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod screen;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    Contact, ContactDraft, ContactId, ContactValidationError, PhoneCategory, PhoneParts,
};
pub use repo::contact_repo::{ContactStore, CONTACTS_STORAGE_KEY};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use screen::controller::{ContactScreen, Dispatched};
pub use screen::state::{
    Effect, ErrorBanner, PersistOutcome, ScreenAction, ScreenState, ERROR_BANNER_TTL,
};
pub use service::contact_service::ContactService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
