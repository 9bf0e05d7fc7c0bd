//! In-process mock collection server, json-server shaped.
//!
//! Serves `GET`/`POST /persons` and `PUT`/`DELETE /persons/:id` over an
//! ephemeral loopback port.

#![allow(dead_code)] // shared by several test crates, none uses everything

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use url::Url;

use dialbook::person::{Person, PersonDraft};

/// Shared state of the mock collection server.
#[derive(Clone, Default)]
pub struct Collection {
    records: Arc<Mutex<Vec<Person>>>,
    next_id: Arc<Mutex<usize>>,
}

impl Collection {
    /// A collection pre-populated with `records`; ids assigned to created
    /// records continue after the seeded ones.
    pub fn seeded(records: Vec<Person>) -> Self {
        let collection = Self::default();
        *collection.next_id.lock().expect("lock") = records.len();
        *collection.records.lock().expect("lock") = records;
        collection
    }

    fn assign_id(&self) -> String {
        let mut next = self.next_id.lock().expect("lock");
        *next = next.wrapping_add(1);
        next.to_string()
    }
}

/// Snapshot of the server-side records.
pub fn records(collection: &Collection) -> Vec<Person> {
    collection.records.lock().expect("lock").clone()
}

/// Record constructor shorthand for fixtures.
pub fn person(id: &str, name: &str, number: &str) -> Person {
    Person {
        id: id.to_owned(),
        name: name.to_owned(),
        number: number.to_owned(),
    }
}

async fn list_records(State(state): State<Collection>) -> Json<Vec<Person>> {
    Json(records(&state))
}

async fn create_record(
    State(state): State<Collection>,
    Json(draft): Json<PersonDraft>,
) -> (StatusCode, Json<Person>) {
    let created = Person {
        id: state.assign_id(),
        name: draft.name,
        number: draft.number,
    };
    state.records.lock().expect("lock").push(created.clone());
    (StatusCode::CREATED, Json(created))
}

async fn update_record(
    State(state): State<Collection>,
    Path(id): Path<String>,
    Json(record): Json<Person>,
) -> axum::response::Response {
    let mut records = state.records.lock().expect("lock");
    match records.iter_mut().find(|r| r.id == id) {
        Some(slot) => {
            *slot = record.clone();
            Json(record).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_record(State(state): State<Collection>, Path(id): Path<String>) -> StatusCode {
    let mut records = state.records.lock().expect("lock");
    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

/// Routes for a `persons` collection over `collection`.
pub fn router(collection: Collection) -> Router {
    Router::new()
        .route("/persons", get(list_records).post(create_record))
        .route(
            "/persons/:id",
            axum::routing::put(update_record).delete(delete_record),
        )
        .with_state(collection)
}

/// Serve `app` on an ephemeral loopback port, returning its base URL.
pub async fn serve_router(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}")).expect("valid base url")
}

/// Serve a `persons` collection, returning the server's base URL.
pub async fn serve(collection: Collection) -> Url {
    serve_router(router(collection)).await
}
