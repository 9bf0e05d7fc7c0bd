//! Contact list controller.
//!
//! Owns the in-memory collection, mediates every mutation through the
//! record store, reconciles local state with server responses, and drives
//! the notifier. Store failures never escape this module: each one is
//! converted into a user-visible notification at the point it occurs.
//!
//! Mutations that need user consent run as a two-phase protocol: phase
//! one returns a prompt value carrying everything the effectful branch
//! needs, phase two consumes it together with the caller's decision.
//! Dropping a prompt unresolved is a decline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::person::{Person, PersonDraft};
use crate::store::RecordStore;

/// Outcome of the submission phase of [`Roster::add_or_replace`].
#[derive(Debug)]
pub enum AddOutcome {
    /// A new record was created and appended to the collection.
    Added,
    /// The create call failed; the collection is unchanged.
    CreateFailed,
    /// A record with this name already exists; resolve the prompt to
    /// replace its number, or drop it to leave everything untouched.
    NeedsConfirmation(ReplacePrompt),
}

/// Pending confirmation for overwriting an existing contact's number.
#[derive(Debug)]
pub struct ReplacePrompt {
    /// Name exactly as submitted; echoed verbatim in messages.
    submitted: String,
    /// The record whose number would be replaced.
    existing: Person,
    /// The replacement number.
    number: String,
}

impl ReplacePrompt {
    /// The question to put to the user.
    pub fn question(&self) -> String {
        format!(
            "{} is already added to phonebook. Replace the old number with a new one?",
            self.submitted
        )
    }
}

/// Pending confirmation for deleting a contact.
#[derive(Debug)]
pub struct DeletePrompt {
    id: String,
    name: String,
}

impl DeletePrompt {
    /// The question to put to the user.
    pub fn question(&self) -> String {
        format!("Delete {}?", self.name)
    }
}

/// The contact list controller: collection owner and store mediator.
pub struct Roster {
    store: Arc<dyn RecordStore>,
    notifier: Notifier,
    contacts: Vec<Person>,
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("contacts", &self.contacts.len())
            .finish_non_exhaustive()
    }
}

impl Roster {
    /// Create an empty roster over a store and a notifier.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Notifier) -> Self {
        Self {
            store,
            notifier,
            contacts: Vec::new(),
        }
    }

    /// The collection, in store order with local appends at the end.
    pub fn contacts(&self) -> &[Person] {
        &self.contacts
    }

    /// Replace the collection from the store.
    ///
    /// On failure the collection is left untouched and an error
    /// notification is raised.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(records) => {
                debug!(count = records.len(), "contact list loaded");
                self.contacts = records;
            }
            Err(e) => {
                warn!(error = %e, "contact list fetch failed");
                self.notifier.error("Error fetching contacts");
            }
        }
    }

    /// Submission phase: create a contact, or ask before replacing the
    /// number of an existing one.
    ///
    /// The duplicate check matches names case-insensitively; the first
    /// match wins. Callers enforce that `name` and `number` are
    /// non-empty.
    pub async fn add_or_replace(&mut self, name: &str, number: &str) -> AddOutcome {
        if let Some(existing) = self.contacts.iter().find(|p| p.name_matches(name)) {
            debug!(id = %existing.id, "duplicate name, confirmation required");
            return AddOutcome::NeedsConfirmation(ReplacePrompt {
                submitted: name.to_owned(),
                existing: existing.clone(),
                number: number.to_owned(),
            });
        }

        let draft = PersonDraft {
            name: name.to_owned(),
            number: number.to_owned(),
        };
        match self.store.create(&draft).await {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "contact created");
                self.contacts.push(created);
                self.notifier.success(format!("Added '{name}'"));
                AddOutcome::Added
            }
            Err(e) => {
                warn!(error = %e, name, "contact create failed");
                self.notifier.error(format!("Error adding '{name}'"));
                AddOutcome::CreateFailed
            }
        }
    }

    /// Resolution phase for a duplicate-name submission.
    ///
    /// A declined prompt changes nothing. A confirmed prompt updates the
    /// stored record, keeping its name and id and swapping the number; a
    /// failing update is read as a delete that raced us, so the stale
    /// record is dropped locally instead of retried.
    pub async fn confirm_replace(&mut self, prompt: ReplacePrompt, confirmed: bool) {
        if !confirmed {
            debug!(id = %prompt.existing.id, "replacement declined");
            return;
        }

        let ReplacePrompt {
            submitted,
            existing,
            number,
        } = prompt;
        let mut updated = existing.clone();
        updated.number = number;

        match self.store.update(&existing.id, &updated).await {
            Ok(returned) => {
                info!(id = %existing.id, "contact number replaced");
                if let Some(slot) = self.contacts.iter_mut().find(|p| p.id == existing.id) {
                    *slot = returned;
                }
                self.notifier.success(format!("Updated '{submitted}'"));
            }
            Err(e) => {
                warn!(error = %e, id = %existing.id, "contact update failed, dropping local record");
                self.heal_missing(&existing.id, &submitted);
            }
        }
    }

    /// Submission phase of deletion: snapshot the record into a prompt.
    ///
    /// Returns `None` when no record with `id` is in the collection; the
    /// view only offers deletion of rows it has rendered.
    pub fn delete(&self, id: &str) -> Option<DeletePrompt> {
        self.contacts
            .iter()
            .find(|p| p.id == id)
            .map(|p| DeletePrompt {
                id: p.id.clone(),
                name: p.name.clone(),
            })
    }

    /// Resolution phase of deletion.
    ///
    /// A confirmed prompt removes the record from the store and the
    /// collection; a failing remove still drops the record locally, the
    /// store is assumed to have lost it already.
    pub async fn confirm_delete(&mut self, prompt: DeletePrompt, confirmed: bool) {
        if !confirmed {
            debug!(id = %prompt.id, "deletion declined");
            return;
        }

        match self.store.remove(&prompt.id).await {
            Ok(()) => {
                info!(id = %prompt.id, "contact deleted");
                self.contacts.retain(|p| p.id != prompt.id);
                self.notifier.success(format!("Deleted '{}'", prompt.name));
            }
            Err(e) => {
                warn!(error = %e, id = %prompt.id, "contact delete failed, dropping local record");
                self.heal_missing(&prompt.id, &prompt.name);
            }
        }
    }

    /// Drop a record assumed deleted server-side and raise the
    /// stale-record notice. Shared by the failing update and delete paths.
    fn heal_missing(&mut self, id: &str, name: &str) {
        self.contacts.retain(|p| p.id != id);
        self.notifier
            .error(format!("Information of '{name}' was already removed from server"));
    }
}
