//! End-to-end controller flows: roster, notifier, and HTTP store against
//! a mock collection server. The race scenarios are reproduced for real,
//! with a second client deleting records behind the roster's back.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use url::Url;

use dialbook::notify::{Notifier, Severity};
use dialbook::roster::{AddOutcome, Roster};
use dialbook::store::{HttpRecordStore, RecordStore};

use crate::mock_server::{self, person, Collection};

fn http_store(base: &Url) -> Arc<HttpRecordStore> {
    Arc::new(
        HttpRecordStore::new(base, "persons", Duration::from_secs(5)).expect("store should build"),
    )
}

async fn roster_at(base: &Url) -> (Roster, Notifier) {
    let notifier = Notifier::new();
    let mut roster = Roster::new(http_store(base), notifier.clone());
    roster.load().await;
    (roster, notifier)
}

#[tokio::test]
async fn loads_then_adds_over_http() {
    let collection = Collection::default();
    let base = mock_server::serve(collection.clone()).await;
    let (mut roster, notifier) = roster_at(&base).await;
    assert!(roster.contacts().is_empty());

    let outcome = roster.add_or_replace("Ann", "123").await;

    assert!(matches!(outcome, AddOutcome::Added));
    assert_eq!(roster.contacts().len(), 1);
    assert_eq!(roster.contacts()[0].name, "Ann");

    let server_side = mock_server::records(&collection);
    assert_eq!(server_side.len(), 1);
    assert_eq!(server_side[0].id, roster.contacts()[0].id);

    let note = notifier.current().expect("create should notify");
    assert_eq!(note.message, "Added 'Ann'");
    assert_eq!(note.severity, Severity::Success);
}

#[tokio::test]
async fn replaces_a_number_after_confirmation() {
    let collection = Collection::seeded(vec![person("1", "Ann", "123")]);
    let base = mock_server::serve(collection.clone()).await;
    let (mut roster, notifier) = roster_at(&base).await;

    let AddOutcome::NeedsConfirmation(prompt) = roster.add_or_replace("Ann", "999").await else {
        panic!("expected a confirmation prompt");
    };
    roster.confirm_replace(prompt, true).await;

    assert_eq!(roster.contacts()[0].number, "999");
    let server_side = mock_server::records(&collection);
    assert_eq!(server_side, [person("1", "Ann", "999")]);

    let note = notifier.current().expect("update should notify");
    assert_eq!(note.message, "Updated 'Ann'");
}

#[tokio::test]
async fn deletes_after_confirmation() {
    let collection = Collection::seeded(vec![person("1", "Ann", "123")]);
    let base = mock_server::serve(collection.clone()).await;
    let (mut roster, notifier) = roster_at(&base).await;

    let prompt = roster.delete("1").expect("known id");
    roster.confirm_delete(prompt, true).await;

    assert!(roster.contacts().is_empty());
    assert!(mock_server::records(&collection).is_empty());

    let note = notifier.current().expect("delete should notify");
    assert_eq!(note.message, "Deleted 'Ann'");
}

#[tokio::test]
async fn update_racing_a_remote_delete_heals_locally() {
    let collection = Collection::seeded(vec![person("1", "Ann", "123")]);
    let base = mock_server::serve(collection).await;
    let (mut roster, notifier) = roster_at(&base).await;

    // Another client removes Ann behind the roster's back.
    http_store(&base).remove("1").await.expect("remote delete");

    let AddOutcome::NeedsConfirmation(prompt) = roster.add_or_replace("Ann", "999").await else {
        panic!("expected a confirmation prompt");
    };
    roster.confirm_replace(prompt, true).await;

    assert!(roster.contacts().is_empty());
    let note = notifier.current().expect("self-heal should notify");
    assert_eq!(
        note.message,
        "Information of 'Ann' was already removed from server"
    );
    assert_eq!(note.severity, Severity::Error);
}

#[tokio::test]
async fn delete_racing_a_remote_delete_heals_locally() {
    let collection = Collection::seeded(vec![person("1", "Ann", "123")]);
    let base = mock_server::serve(collection).await;
    let (mut roster, notifier) = roster_at(&base).await;

    http_store(&base).remove("1").await.expect("remote delete");

    let prompt = roster.delete("1").expect("known id");
    roster.confirm_delete(prompt, true).await;

    assert!(roster.contacts().is_empty());
    let note = notifier.current().expect("self-heal should notify");
    assert_eq!(
        note.message,
        "Information of 'Ann' was already removed from server"
    );
}

#[tokio::test]
async fn fetch_failure_notifies_and_leaves_the_roster_empty() {
    // Bind then drop so the port actively refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let base = Url::parse(&format!("http://{addr}")).expect("valid base url");

    let (roster, notifier) = roster_at(&base).await;

    assert!(roster.contacts().is_empty());
    let note = notifier.current().expect("fetch failure should notify");
    assert_eq!(note.message, "Error fetching contacts");
    assert_eq!(note.severity, Severity::Error);
}
