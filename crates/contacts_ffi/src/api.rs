//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose contact list use-cases to Dart via FRB.
//! - Flatten core errors into response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Read-modify-write calls are serialized process-wide so concurrent
//!   callers never overwrite each other's list.

use contacts_core::db::open_db;
use contacts_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Contact, ContactDraft, ContactId, ContactService, PhoneCategory, SqliteKeyValueStore,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const CONTACTS_DB_FILE_NAME: &str = "contacts.sqlite3";
const CONTACTS_DB_PATH_ENV: &str = "CONTACTS_DB_PATH";
static CONTACTS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORAGE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Contact row as rendered by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    /// Stable contact ID in string form.
    pub id: String,
    /// Stored name, possibly empty.
    pub name: String,
    /// Name with placeholder applied for empty names.
    pub display_name: String,
    /// Formatted `"<category>: <number>"` string.
    pub phone: String,
    /// Category split out of `phone` for prefilling the edit form.
    pub phone_category: String,
    /// Number split out of `phone` for prefilling the edit form.
    pub phone_number: String,
    pub email: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub ok: bool,
    pub items: Vec<ContactItem>,
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected contact on success.
    pub contact: Option<ContactItem>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>, contact: &Contact) -> Self {
        Self {
            ok: true,
            contact: Some(to_contact_item(contact)),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contact: None,
            message: message.into(),
        }
    }
}

/// Returns the selectable phone categories in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn phone_categories() -> Vec<String> {
    PhoneCategory::ALL
        .iter()
        .map(|category| category.label().to_string())
        .collect()
}

/// Lists all stored contacts in stored order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Storage failures yield `ok=false` with an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list() -> ContactListResponse {
    match with_contact_service(|service| service.list()) {
        Ok(contacts) => ContactListResponse {
            ok: true,
            items: contacts.iter().map(to_contact_item).collect(),
            message: format!("{} contact(s).", contacts.len()),
        },
        Err(err) => ContactListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("contacts_list failed: {err}"),
        },
    }
}

/// Creates a contact from form fields.
///
/// `category` accepts `Cell|Work|Home` (legacy labels too).
#[flutter_rust_bridge::frb(sync)]
pub fn contact_create(
    name: String,
    category: String,
    number: String,
    email: String,
) -> ContactActionResponse {
    let draft = match build_draft(name, &category, number, email) {
        Ok(draft) => draft,
        Err(message) => return ContactActionResponse::failure(message),
    };
    match with_contact_service(|service| service.add(draft)) {
        Ok(contact) => ContactActionResponse::success("Contact created.", &contact),
        Err(err) => ContactActionResponse::failure(format!("contact_create failed: {err}")),
    }
}

/// Replaces the contact `id` with form fields, keeping its position.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_update(
    id: String,
    name: String,
    category: String,
    number: String,
    email: String,
) -> ContactActionResponse {
    let id = match parse_contact_id(&id) {
        Ok(id) => id,
        Err(message) => return ContactActionResponse::failure(message),
    };
    let draft = match build_draft(name, &category, number, email) {
        Ok(draft) => draft,
        Err(message) => return ContactActionResponse::failure(message),
    };
    match with_contact_service(|service| service.update(id, draft)) {
        Ok(contact) => ContactActionResponse::success("Contact updated.", &contact),
        Err(err) => ContactActionResponse::failure(format!("contact_update failed: {err}")),
    }
}

/// Deletes the contact `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: String) -> ContactActionResponse {
    let id = match parse_contact_id(&id) {
        Ok(id) => id,
        Err(message) => return ContactActionResponse::failure(message),
    };
    match with_contact_service(|service| service.delete(id)) {
        Ok(contact) => ContactActionResponse::success("Contact deleted.", &contact),
        Err(err) => ContactActionResponse::failure(format!("contact_delete failed: {err}")),
    }
}

fn build_draft(
    name: String,
    category: &str,
    number: String,
    email: String,
) -> Result<ContactDraft, String> {
    let category = category
        .parse::<PhoneCategory>()
        .map_err(|err| err.to_string())?;
    Ok(ContactDraft::new(name, category, number, email))
}

fn parse_contact_id(raw: &str) -> Result<ContactId, String> {
    ContactId::parse_str(raw.trim()).map_err(|_| format!("invalid contact id `{raw}`"))
}

fn resolve_contacts_db_path() -> PathBuf {
    CONTACTS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(CONTACTS_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CONTACTS_DB_FILE_NAME)
        })
        .clone()
}

fn with_contact_service<T>(
    f: impl FnOnce(&ContactService<SqliteKeyValueStore<'_>>) -> contacts_core::RepoResult<T>,
) -> Result<T, String> {
    let _guard = STORAGE_LOCK.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_storage_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    });
    let conn = open_db(resolve_contacts_db_path())
        .map_err(|err| format!("contacts DB open failed: {err}"))?;
    let service = ContactService::new(SqliteKeyValueStore::new(&conn));
    f(&service).map_err(|err| err.to_string())
}

fn to_contact_item(contact: &Contact) -> ContactItem {
    let parts = contact.phone_parts();
    ContactItem {
        id: contact.id.to_string(),
        name: contact.name.clone(),
        display_name: contact.display_name().to_string(),
        phone: contact.phone.clone(),
        phone_category: parts.category.label().to_string(),
        phone_number: parts.number,
        email: contact.email.clone(),
    }
}
