//! Screen state record and its reducer.
//!
//! # Invariants
//! - Fields are private; `ScreenState::apply` is the only mutator.
//! - Form and confirmation prompts close only after their write succeeded.
//! - Confirming an open delete prompt always requests a write.
//! - The validation banner expires `ERROR_BANNER_TTL` after it was raised.

use crate::model::contact::{Contact, ContactDraft, ContactId, PhoneCategory};
use crate::model::contact_list::{find_contact, remove_contact, replace_contact};
use log::{debug, warn};
use std::time::{Duration, Instant};

/// How long the validation message stays visible.
pub const ERROR_BANNER_TTL: Duration = Duration::from_secs(2);

/// Transient user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub expires_at: Instant,
}

impl ErrorBanner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Mutation whose write is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Added(ContactId),
    Updated(ContactId),
    Deleted(ContactId),
}

impl PersistOutcome {
    pub fn contact_id(self) -> ContactId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Deleted(id) => id,
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Overwrite the stored blob with `contacts`, then report `outcome` back.
    Persist {
        contacts: Vec<Contact>,
        outcome: PersistOutcome,
    },
}

/// User gestures and driver notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Loaded(Vec<Contact>),
    OpenAddForm,
    OpenEditForm(ContactId),
    SetName(String),
    SetNumber(String),
    SetCategory(PhoneCategory),
    SetEmail(String),
    SubmitForm { now: Instant },
    CloseForm,
    RequestDelete(ContactId),
    ConfirmDelete,
    CancelDelete,
    Tick { now: Instant },
    PersistSucceeded(PersistOutcome),
}

/// All ephemeral state of the contact list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    contacts: Vec<Contact>,
    form: ContactDraft,
    form_visible: bool,
    editing: Option<ContactId>,
    pending_delete: Option<ContactId>,
    error: Option<ErrorBanner>,
}

impl ScreenState {
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn form(&self) -> &ContactDraft {
        &self.form
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    /// Contact the open form will replace, `None` when adding.
    pub fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    pub fn pending_delete(&self) -> Option<ContactId> {
        self.pending_delete
    }

    pub fn is_confirmation_visible(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Banner text if one is raised and not yet expired at `now`.
    pub fn error_message(&self, now: Instant) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|banner| !banner.is_expired(now))
            .map(|banner| banner.message.as_str())
    }

    /// Applies one transition and returns the effect it requests, if any.
    pub fn apply(&mut self, action: ScreenAction) -> Option<Effect> {
        match action {
            ScreenAction::Loaded(contacts) => {
                self.contacts = contacts;
                None
            }
            ScreenAction::OpenAddForm => {
                self.form = ContactDraft::default();
                self.editing = None;
                self.form_visible = true;
                None
            }
            ScreenAction::OpenEditForm(id) => {
                let Some(contact) = find_contact(&self.contacts, id) else {
                    warn!("event=screen_open_edit module=screen status=error error_code=not_found id={id}");
                    return None;
                };
                self.form = contact.to_draft();
                self.editing = Some(id);
                self.form_visible = true;
                None
            }
            ScreenAction::SetName(value) => {
                self.form.name = value;
                None
            }
            ScreenAction::SetNumber(value) => {
                self.form.number = value;
                None
            }
            ScreenAction::SetCategory(category) => {
                self.form.category = category;
                None
            }
            ScreenAction::SetEmail(value) => {
                self.form.email = value;
                None
            }
            ScreenAction::SubmitForm { now } => self.submit_form(now),
            ScreenAction::CloseForm => {
                self.form_visible = false;
                self.editing = None;
                None
            }
            ScreenAction::RequestDelete(id) => {
                if find_contact(&self.contacts, id).is_some() {
                    self.pending_delete = Some(id);
                } else {
                    warn!("event=screen_request_delete module=screen status=error error_code=not_found id={id}");
                }
                None
            }
            ScreenAction::ConfirmDelete => self.confirm_delete(),
            ScreenAction::CancelDelete => {
                self.pending_delete = None;
                None
            }
            ScreenAction::Tick { now } => {
                if self.error.as_ref().is_some_and(|banner| banner.is_expired(now)) {
                    self.error = None;
                }
                None
            }
            ScreenAction::PersistSucceeded(outcome) => {
                match outcome {
                    PersistOutcome::Added(_) | PersistOutcome::Updated(_) => {
                        self.form_visible = false;
                        self.editing = None;
                    }
                    PersistOutcome::Deleted(_) => self.pending_delete = None,
                }
                None
            }
        }
    }

    fn submit_form(&mut self, now: Instant) -> Option<Effect> {
        if !self.form_visible {
            debug!("event=screen_submit module=screen status=skipped reason=form_hidden");
            return None;
        }
        if let Err(err) = self.form.validate() {
            self.error = Some(ErrorBanner {
                message: err.to_string(),
                expires_at: now + ERROR_BANNER_TTL,
            });
            return None;
        }

        let draft = self.form.clone();
        match self.editing {
            Some(id) => {
                let contact = draft.into_contact_with_id(id).ok()?;
                if replace_contact(&mut self.contacts, contact).is_none() {
                    warn!("event=screen_submit module=screen status=error error_code=not_found id={id}");
                    self.form_visible = false;
                    self.editing = None;
                    return None;
                }
                Some(self.persist(PersistOutcome::Updated(id)))
            }
            None => {
                let contact = draft.into_contact().ok()?;
                let id = contact.id;
                self.contacts.push(contact);
                Some(self.persist(PersistOutcome::Added(id)))
            }
        }
    }

    /// Removes the pending contact and requests a write.
    ///
    /// A prompt still open after a failed write has nothing left to remove;
    /// confirming it again re-requests the write of the current list.
    fn confirm_delete(&mut self) -> Option<Effect> {
        let id = self.pending_delete?;
        if remove_contact(&mut self.contacts, id).is_none() {
            debug!("event=screen_confirm_delete module=screen status=retry id={id}");
        }
        Some(self.persist(PersistOutcome::Deleted(id)))
    }

    fn persist(&self, outcome: PersistOutcome) -> Effect {
        Effect::Persist {
            contacts: self.contacts.clone(),
            outcome,
        }
    }
}
