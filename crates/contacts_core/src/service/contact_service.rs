//! Stateless contact use-cases.
//!
//! # Responsibility
//! - Apply add/edit/delete against a freshly loaded list.
//! - Persist the post-mutation list through `ContactStore::save_all`.
//!
//! # Invariants
//! - Validation and id lookups happen before any write.
//! - A failed lookup or validation never touches storage.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::model::contact_list::{find_contact, remove_contact, replace_contact};
use crate::repo::contact_repo::ContactStore;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use log::info;

/// Use-case wrapper over a contact store.
pub struct ContactService<S: KeyValueStore> {
    store: ContactStore<S>,
}

impl<S: KeyValueStore> ContactService<S> {
    pub fn new(kv: S) -> Self {
        Self {
            store: ContactStore::new(kv),
        }
    }

    /// Returns all contacts in stored order.
    pub fn list(&self) -> RepoResult<Vec<Contact>> {
        self.store.load()
    }

    /// Gets one contact by id.
    pub fn get(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let contacts = self.store.load()?;
        Ok(find_contact(&contacts, id).cloned())
    }

    /// Appends a contact built from `draft` and returns it.
    pub fn add(&self, draft: ContactDraft) -> RepoResult<Contact> {
        let contact = draft.into_contact()?;
        let mut contacts = self.store.load()?;
        contacts.push(contact.clone());
        self.store.save_all(&contacts)?;
        info!("event=contact_add module=service status=ok id={}", contact.id);
        Ok(contact)
    }

    /// Replaces the contact `id` with `draft`, keeping its id and position.
    pub fn update(&self, id: ContactId, draft: ContactDraft) -> RepoResult<Contact> {
        let contact = draft.into_contact_with_id(id)?;
        let mut contacts = self.store.load()?;
        replace_contact(&mut contacts, contact.clone()).ok_or(RepoError::NotFound(id))?;
        self.store.save_all(&contacts)?;
        info!("event=contact_update module=service status=ok id={id}");
        Ok(contact)
    }

    /// Removes the contact `id` and returns it.
    pub fn delete(&self, id: ContactId) -> RepoResult<Contact> {
        let mut contacts = self.store.load()?;
        let removed = remove_contact(&mut contacts, id).ok_or(RepoError::NotFound(id))?;
        self.store.save_all(&contacts)?;
        info!(
            "event=contact_delete module=service status=ok id={id} remaining={}",
            contacts.len()
        );
        Ok(removed)
    }
}
