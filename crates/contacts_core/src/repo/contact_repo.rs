//! Whole-list contact persistence over one key-value slot.
//!
//! # Responsibility
//! - Read the persisted blob into an in-memory contact list.
//! - Overwrite the blob with a full serialized list.
//!
//! # Invariants
//! - An absent or blank slot loads as an empty list.
//! - A blob that is not a JSON array of contact records is `InvalidData`;
//!   it is never replaced by an empty list on read.
//! - Records stored without an `id` receive one on load, and the list is
//!   written back so the ids stay stable across loads.

use crate::model::contact::{Contact, ContactId};
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use log::{error, info, warn};
use serde::Deserialize;
use uuid::Uuid;

/// Fixed key of the slot holding the serialized contact list.
pub const CONTACTS_STORAGE_KEY: &str = "contatos";

/// Read shape that tolerates records written before ids existed.
///
/// Text fields may be missing or `null`; both read as empty.
#[derive(Deserialize)]
struct StoredContact {
    #[serde(default)]
    id: Option<ContactId>,
    #[serde(rename = "nome", default)]
    name: Option<String>,
    #[serde(rename = "telefone", default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Contact list persistence backed by any [`KeyValueStore`].
pub struct ContactStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ContactStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns the underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Loads the full contact list.
    ///
    /// # Errors
    /// - `Db` when the slot cannot be read.
    /// - `InvalidData` when the blob cannot be deserialized.
    pub fn load(&self) -> RepoResult<Vec<Contact>> {
        let blob = match self.kv.get_item(CONTACTS_STORAGE_KEY) {
            Ok(blob) => blob,
            Err(err) => {
                error!("event=contacts_load module=repo status=error error_code=read_failed error={err}");
                return Err(err);
            }
        };

        let Some(blob) = blob.filter(|blob| !blob.trim().is_empty()) else {
            info!("event=contacts_load module=repo status=ok count=0 slot=absent");
            return Ok(Vec::new());
        };

        let stored: Vec<StoredContact> = serde_json::from_str(&blob).map_err(|err| {
            error!(
                "event=contacts_load module=repo status=error error_code=deserialize_failed error={err}"
            );
            RepoError::InvalidData(err.to_string())
        })?;

        let mut assigned = 0usize;
        let contacts: Vec<Contact> = stored
            .into_iter()
            .map(|record| {
                let id = record.id.unwrap_or_else(|| {
                    assigned += 1;
                    Uuid::new_v4()
                });
                Contact {
                    id,
                    name: record.name.unwrap_or_default(),
                    phone: record.phone.unwrap_or_default(),
                    email: record.email.unwrap_or_default(),
                }
            })
            .collect();

        if assigned > 0 {
            // Ids stay valid for this session even if the write-back fails.
            match self.save_all(&contacts) {
                Ok(()) => info!("event=contacts_assign_ids module=repo status=ok assigned={assigned}"),
                Err(err) => warn!(
                    "event=contacts_assign_ids module=repo status=error assigned={assigned} error={err}"
                ),
            }
        }

        info!(
            "event=contacts_load module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    /// Serializes `contacts` and overwrites the persisted blob.
    pub fn save_all(&self, contacts: &[Contact]) -> RepoResult<()> {
        let blob = serde_json::to_string(contacts).map_err(RepoError::Serialize)?;
        match self.kv.set_item(CONTACTS_STORAGE_KEY, &blob) {
            Ok(()) => {
                info!(
                    "event=contacts_save module=repo status=ok count={} bytes={}",
                    contacts.len(),
                    blob.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=contacts_save module=repo status=error count={} error_code=write_failed error={err}",
                    contacts.len()
                );
                Err(err)
            }
        }
    }
}
