//! JSON-over-HTTP record store client.
//!
//! Speaks the plain collection-resource dialect (json-server and
//! compatible): `GET`/`POST` on the collection, `PUT`/`DELETE` on
//! `<collection>/<id>`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use super::{RecordStore, StoreError};
use crate::person::{Person, PersonDraft};

/// Upper bound on error-body text carried inside [`StoreError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Record store client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    collection_url: Url,
}

impl HttpRecordStore {
    /// Build a store client for `<base>/<collection>`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base address cannot carry path segments
    /// (e.g. `mailto:`) or the HTTP client cannot be constructed.
    pub fn new(base: &Url, collection: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut collection_url = base.clone();
        collection_url
            .path_segments_mut()
            .map_err(|()| anyhow::anyhow!("store base address cannot carry path segments: {base}"))?
            .pop_if_empty()
            .push(collection);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// URL addressing a single record; the id travels percent-encoded.
    fn record_url(&self, id: &str) -> Url {
        let mut url = self.collection_url.clone();
        // The constructor verified the base can carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self) -> Result<Vec<Person>, StoreError> {
        let response = self.client.get(self.collection_url.clone()).send().await?;
        let body = check_response(response, None).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create(&self, draft: &PersonDraft) -> Result<Person, StoreError> {
        let response = self
            .client
            .post(self.collection_url.clone())
            .json(draft)
            .send()
            .await?;
        let body = check_response(response, None).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update(&self, id: &str, record: &Person) -> Result<Person, StoreError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(record)
            .send()
            .await?;
        let body = check_response(response, Some(id)).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        check_response(response, Some(id)).await?;
        Ok(())
    }
}

/// Read the response body, mapping non-success statuses to [`StoreError`].
///
/// `record_id` names the addressed record for calls that target one; a
/// 404 on those maps to [`StoreError::NotFound`]. A 404 on collection
/// calls is an ordinary [`StoreError::Status`].
///
/// # Errors
///
/// Returns [`StoreError::Transport`] when the body cannot be read,
/// otherwise the mapped status error.
async fn check_response(response: Response, record_id: Option<&str>) -> Result<String, StoreError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = record_id {
            return Err(StoreError::NotFound { id: id.to_owned() });
        }
    }
    let body = response.text().await?;
    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            body: sanitize_error_body(&body),
        });
    }
    Ok(body)
}

/// Collapse whitespace and truncate so status errors stay log-friendly.
fn sanitize_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return format!("{shortened}...[truncated]");
    }
    collapsed
}
