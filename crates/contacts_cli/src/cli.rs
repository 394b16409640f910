//! CLI command implementations.

use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use contacts_core::{
    ContactId, ContactScreen, Dispatched, KeyValueStore, PersistOutcome, PhoneCategory,
    ScreenAction,
};
use log::{error, info};

use crate::{AddArgs, EditArgs};

const SHORT_ID_LEN: usize = 8;

/// Print the selectable phone categories.
pub fn print_categories(out: &mut impl Write) -> Result<()> {
    for category in PhoneCategory::ALL {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// Print all contacts in stored order.
pub fn list_contacts<S: KeyValueStore>(kv: S, out: &mut impl Write) -> Result<()> {
    let screen = open_screen(kv)?;
    let contacts = screen.state().contacts();
    if contacts.is_empty() {
        writeln!(out, "No contacts.")?;
        return Ok(());
    }
    for contact in contacts {
        let id = contact.id.to_string();
        write!(out, "{}  {}  {}", &id[..SHORT_ID_LEN], contact.display_name(), contact.phone)?;
        if !contact.email.is_empty() {
            write!(out, "  {}", contact.email)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Add a contact through the add form.
pub fn add_contact<S: KeyValueStore>(kv: S, args: AddArgs, out: &mut impl Write) -> Result<()> {
    let mut screen = open_screen(kv)?;
    screen.dispatch(ScreenAction::OpenAddForm);
    screen.dispatch(ScreenAction::SetName(args.name));
    screen.dispatch(ScreenAction::SetCategory(args.category));
    screen.dispatch(ScreenAction::SetNumber(args.number));
    screen.dispatch(ScreenAction::SetEmail(args.email));
    let id = submit(&mut screen)?;
    writeln!(out, "added {id}")?;
    Ok(())
}

/// Edit a contact through the prefilled edit form.
pub fn edit_contact<S: KeyValueStore>(
    kv: S,
    raw_id: &str,
    fields: EditArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut screen = open_screen(kv)?;
    let id = resolve_id(&screen, raw_id)?;
    screen.dispatch(ScreenAction::OpenEditForm(id));
    if let Some(name) = fields.name {
        screen.dispatch(ScreenAction::SetName(name));
    }
    if let Some(category) = fields.category {
        screen.dispatch(ScreenAction::SetCategory(category));
    }
    if let Some(number) = fields.number {
        screen.dispatch(ScreenAction::SetNumber(number));
    }
    if let Some(email) = fields.email {
        screen.dispatch(ScreenAction::SetEmail(email));
    }
    let id = submit(&mut screen)?;
    writeln!(out, "updated {id}")?;
    Ok(())
}

/// Delete a contact; the command itself counts as the confirmation.
pub fn delete_contact<S: KeyValueStore>(kv: S, raw_id: &str, out: &mut impl Write) -> Result<()> {
    let mut screen = open_screen(kv)?;
    let id = resolve_id(&screen, raw_id)?;
    screen.dispatch(ScreenAction::RequestDelete(id));
    match screen.dispatch(ScreenAction::ConfirmDelete) {
        Dispatched::Persisted(outcome) => writeln!(out, "deleted {}", outcome.contact_id())?,
        Dispatched::PersistFailed(_) => bail!("failed to save contacts after delete"),
        Dispatched::Idle => bail!("contact {id} could not be deleted"),
    }
    Ok(())
}

/// Logs the outcome of `command` and hands the result back unchanged.
pub fn log_outcome(command: &str, result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={command}"),
        Err(err) => error!("event=cli_command module=cli status=error command={command} error={err:#}"),
    }
    result
}

fn open_screen<S: KeyValueStore>(kv: S) -> Result<ContactScreen<S>> {
    ContactScreen::try_open(kv).context("load contacts")
}

fn submit<S: KeyValueStore>(screen: &mut ContactScreen<S>) -> Result<ContactId> {
    let now = Instant::now();
    match screen.dispatch(ScreenAction::SubmitForm { now }) {
        Dispatched::Persisted(PersistOutcome::Added(id) | PersistOutcome::Updated(id)) => Ok(id),
        Dispatched::PersistFailed(_) => bail!("failed to save contacts"),
        Dispatched::Persisted(PersistOutcome::Deleted(_)) | Dispatched::Idle => {
            match screen.state().error_message(now) {
                Some(message) => bail!("{message}"),
                None => bail!("contact was not saved"),
            }
        }
    }
}

/// Resolves a full id or a unique, case-insensitive id prefix.
fn resolve_id<S: KeyValueStore>(screen: &ContactScreen<S>, raw: &str) -> Result<ContactId> {
    let needle = raw.trim().to_ascii_lowercase();
    if needle.is_empty() {
        bail!("contact id cannot be empty");
    }
    let matches: Vec<ContactId> = screen
        .state()
        .contacts()
        .iter()
        .map(|contact| contact.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no contact matches `{raw}`"),
        _ => bail!("`{raw}` matches {} contacts; use a longer prefix", matches.len()),
    }
}
