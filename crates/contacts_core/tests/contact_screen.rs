use contacts_core::{
    Contact, ContactDraft, ContactScreen, ContactStore, Dispatched, KeyValueStore,
    MemoryKeyValueStore, PersistOutcome, PhoneCategory, RepoError, RepoResult, ScreenAction,
    CONTACTS_STORAGE_KEY,
};
use serde_json::json;
use std::cell::Cell;
use std::time::{Duration, Instant};

#[test]
fn adding_to_empty_store_persists_single_contact() {
    let kv = MemoryKeyValueStore::with_item(CONTACTS_STORAGE_KEY, "[]");
    let mut screen = ContactScreen::open(&kv);

    screen.dispatch(ScreenAction::OpenAddForm);
    screen.dispatch(ScreenAction::SetName("Ana".into()));
    screen.dispatch(ScreenAction::SetCategory(PhoneCategory::Cell));
    screen.dispatch(ScreenAction::SetNumber("11999".into()));
    let result = screen.dispatch(ScreenAction::SubmitForm {
        now: Instant::now(),
    });

    let Dispatched::Persisted(PersistOutcome::Added(id)) = result else {
        panic!("expected persisted add, got {result:?}");
    };
    assert!(!screen.state().is_form_visible());

    let stored = stored_json(&kv);
    assert_eq!(
        stored,
        json!([{ "id": id.to_string(), "nome": "Ana", "telefone": "Cell: 11999", "email": "" }])
    );
}

#[test]
fn empty_submit_changes_nothing_and_banner_clears_after_two_seconds() {
    let kv = MemoryKeyValueStore::new();
    let existing = seed(&kv, &["Ana"]);
    let mut screen = ContactScreen::open(&kv);
    let now = Instant::now();

    screen.dispatch(ScreenAction::OpenAddForm);
    assert_eq!(
        screen.dispatch(ScreenAction::SubmitForm { now }),
        Dispatched::Idle
    );
    assert_eq!(
        screen.state().error_message(now),
        Some("Enter text in at least one field")
    );
    assert_eq!(ContactStore::new(&kv).load().unwrap(), existing);

    screen.dispatch(ScreenAction::Tick {
        now: now + Duration::from_secs(2),
    });
    assert_eq!(screen.state().error_message(now), None);
}

#[test]
fn edit_is_persisted_and_survives_reload() {
    let kv = MemoryKeyValueStore::new();
    let seeded = seed(&kv, &["Ana", "Bia"]);
    let mut screen = ContactScreen::open(&kv);

    screen.dispatch(ScreenAction::OpenEditForm(seeded[1].id));
    screen.dispatch(ScreenAction::SetCategory(PhoneCategory::Home));
    screen.dispatch(ScreenAction::SetNumber("4040".into()));
    let result = screen.dispatch(ScreenAction::SubmitForm {
        now: Instant::now(),
    });
    assert_eq!(result, Dispatched::Persisted(PersistOutcome::Updated(seeded[1].id)));

    let reopened = ContactScreen::open(&kv);
    let contacts = reopened.state().contacts();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0], seeded[0]);
    assert_eq!(contacts[1].id, seeded[1].id);
    assert_eq!(contacts[1].phone, "Home: 4040");
}

#[test]
fn deleting_first_of_two_keeps_second() {
    let kv = MemoryKeyValueStore::new();
    let seeded = seed(&kv, &["Ana", "Bia"]);
    let mut screen = ContactScreen::open(&kv);

    screen.dispatch(ScreenAction::RequestDelete(seeded[0].id));
    let result = screen.dispatch(ScreenAction::ConfirmDelete);
    assert_eq!(result, Dispatched::Persisted(PersistOutcome::Deleted(seeded[0].id)));
    assert!(!screen.state().is_confirmation_visible());

    assert_eq!(ContactStore::new(&kv).load().unwrap(), vec![seeded[1].clone()]);
}

#[test]
fn deleting_only_contact_then_reloading_is_empty() {
    let kv = MemoryKeyValueStore::new();
    let seeded = seed(&kv, &["Ana"]);
    let mut screen = ContactScreen::open(&kv);

    screen.dispatch(ScreenAction::RequestDelete(seeded[0].id));
    screen.dispatch(ScreenAction::ConfirmDelete);

    assert!(screen.state().contacts().is_empty());
    assert!(ContactScreen::open(&kv).state().contacts().is_empty());
}

#[test]
fn record_with_null_email_is_kept_when_adding() {
    let blob = json!([
        { "nome": "Ana", "telefone": "Celular: 1", "email": null },
        { "nome": "Bia", "telefone": "Casa: 2", "email": "" }
    ]);
    let kv = MemoryKeyValueStore::with_item(CONTACTS_STORAGE_KEY, blob.to_string());
    let mut screen = ContactScreen::try_open(&kv).unwrap();
    assert_eq!(screen.state().contacts().len(), 2);

    screen.dispatch(ScreenAction::OpenAddForm);
    screen.dispatch(ScreenAction::SetName("Caio".into()));
    screen.dispatch(ScreenAction::SubmitForm { now: Instant::now() });

    let names: Vec<String> = ContactStore::new(&kv)
        .load()
        .unwrap()
        .into_iter()
        .map(|contact| contact.name)
        .collect();
    assert_eq!(names, ["Ana", "Bia", "Caio"]);
}

#[test]
fn blank_blob_opens_strictly_as_empty() {
    let kv = MemoryKeyValueStore::with_item(CONTACTS_STORAGE_KEY, "");
    let screen = ContactScreen::try_open(&kv).unwrap();
    assert!(screen.state().contacts().is_empty());
}

#[test]
fn unreadable_blob_opens_empty_screen() {
    let kv = MemoryKeyValueStore::with_item(CONTACTS_STORAGE_KEY, "not json");
    let screen = ContactScreen::open(&kv);
    assert!(screen.state().contacts().is_empty());
}

#[test]
fn try_open_reports_unreadable_blob() {
    let kv = MemoryKeyValueStore::with_item(CONTACTS_STORAGE_KEY, "not json");
    let err = ContactScreen::try_open(&kv).err().expect("load should fail");
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn failed_write_keeps_mutation_and_form_open() {
    let kv = FlakyStore::default();
    let mut screen = ContactScreen::open(&kv);
    kv.fail_writes.set(true);

    screen.dispatch(ScreenAction::OpenAddForm);
    screen.dispatch(ScreenAction::SetEmail("ana@example.com".into()));
    let result = screen.dispatch(ScreenAction::SubmitForm {
        now: Instant::now(),
    });

    assert!(matches!(result, Dispatched::PersistFailed(PersistOutcome::Added(_))));
    assert_eq!(screen.state().contacts().len(), 1);
    assert!(screen.state().is_form_visible());
    assert_eq!(screen.state().error_message(Instant::now()), None);
    assert_eq!(kv.inner.get_item(CONTACTS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn failed_delete_write_keeps_confirmation_open() {
    let kv = FlakyStore::default();
    let seeded = seed(&kv.inner, &["Ana"]);
    let mut screen = ContactScreen::open(&kv);
    kv.fail_writes.set(true);

    screen.dispatch(ScreenAction::RequestDelete(seeded[0].id));
    let result = screen.dispatch(ScreenAction::ConfirmDelete);

    assert_eq!(result, Dispatched::PersistFailed(PersistOutcome::Deleted(seeded[0].id)));
    assert!(screen.state().is_confirmation_visible());
    assert!(screen.state().contacts().is_empty());
    assert_eq!(ContactStore::new(&kv.inner).load().unwrap(), seeded);
}

#[test]
fn delete_confirmed_again_after_failed_write_is_persisted() {
    let kv = FlakyStore::default();
    let seeded = seed(&kv.inner, &["Ana", "Bia"]);
    let mut screen = ContactScreen::open(&kv);
    let target = seeded[0].id;

    kv.fail_writes.set(true);
    screen.dispatch(ScreenAction::RequestDelete(target));
    assert_eq!(
        screen.dispatch(ScreenAction::ConfirmDelete),
        Dispatched::PersistFailed(PersistOutcome::Deleted(target))
    );

    kv.fail_writes.set(false);
    let result = screen.dispatch(ScreenAction::ConfirmDelete);

    assert_eq!(result, Dispatched::Persisted(PersistOutcome::Deleted(target)));
    assert!(!screen.state().is_confirmation_visible());
    let stored = ContactStore::new(&kv.inner).load().unwrap();
    assert_eq!(stored, vec![seeded[1].clone()]);
}

#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::InvalidData("simulated write failure".to_string()));
        }
        self.inner.set_item(key, value)
    }
}

fn seed(kv: &MemoryKeyValueStore, names: &[&str]) -> Vec<Contact> {
    let contacts: Vec<Contact> = names
        .iter()
        .map(|name| {
            ContactDraft::new(*name, PhoneCategory::Cell, "1", "")
                .into_contact()
                .unwrap()
        })
        .collect();
    ContactStore::new(kv).save_all(&contacts).unwrap();
    contacts
}

fn stored_json(kv: &MemoryKeyValueStore) -> serde_json::Value {
    let blob = kv.get_item(CONTACTS_STORAGE_KEY).unwrap().unwrap();
    serde_json::from_str(&blob).unwrap()
}
