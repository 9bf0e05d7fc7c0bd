//! Record store access: the four-operation JSON collection API.
//!
//! The roster only ever talks to the [`RecordStore`] trait; the one
//! production implementation is [`HttpRecordStore`]. Tests substitute
//! scripted doubles.

pub mod http;

pub use http::HttpRecordStore;

use async_trait::async_trait;

use crate::person::{Person, PersonDraft};

/// Errors returned by record store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Network or protocol failure reaching the store.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered 404 for the addressed record.
    #[error("record '{id}' not found in store")]
    NotFound {
        /// Identifier the request addressed.
        id: String,
    },

    /// The store answered with an unexpected non-success status.
    #[error("store returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Sanitised response body.
        body: String,
    },

    /// The response body did not match the record schema.
    #[error("store response decode failed: {0}")]
    Decode(String),
}

/// The remote collection the contact list is reconciled against.
///
/// Implementations must be `Send + Sync`; the roster holds one behind
/// `Arc<dyn RecordStore>`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the whole collection, in store order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn list(&self) -> Result<Vec<Person>, StoreError>;

    /// Create a record; the store assigns the id and returns the stored
    /// form.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport, status, or decode failure.
    async fn create(&self, draft: &PersonDraft) -> Result<Person, StoreError>;

    /// Replace the record at `id` with `record`, returning the stored
    /// form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the record is gone, or any
    /// other [`StoreError`] kind on failure.
    async fn update(&self, id: &str, record: &Person) -> Result<Person, StoreError>;

    /// Delete the record at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the record is already gone,
    /// or any other [`StoreError`] kind on failure.
    async fn remove(&self, id: &str) -> Result<(), StoreError>;
}
