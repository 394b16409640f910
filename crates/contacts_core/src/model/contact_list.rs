//! Id-based mutations over the in-memory contact list.
//!
//! All helpers preserve the relative order of untouched contacts.

use crate::model::contact::{Contact, ContactId};

/// Returns the position of the contact with `id`.
pub fn position_of(contacts: &[Contact], id: ContactId) -> Option<usize> {
    contacts.iter().position(|contact| contact.id == id)
}

/// Returns the contact with `id`.
pub fn find_contact(contacts: &[Contact], id: ContactId) -> Option<&Contact> {
    contacts.iter().find(|contact| contact.id == id)
}

/// Replaces the contact sharing `replacement.id` in place.
///
/// Returns the previous value, or `None` (list untouched) when the id is unknown.
pub fn replace_contact(contacts: &mut [Contact], replacement: Contact) -> Option<Contact> {
    let index = position_of(contacts, replacement.id)?;
    Some(std::mem::replace(&mut contacts[index], replacement))
}

/// Removes the contact with `id`.
///
/// Returns the removed value, or `None` (list untouched) when the id is unknown.
pub fn remove_contact(contacts: &mut Vec<Contact>, id: ContactId) -> Option<Contact> {
    let index = position_of(contacts, id)?;
    Some(contacts.remove(index))
}
