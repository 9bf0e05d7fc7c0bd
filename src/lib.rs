//! dialbook — a contact-list client for JSON record stores.
//!
//! The library carries the whole client: typed records ([`person`]), the
//! four-operation store client ([`store`]), the controller that owns the
//! collection and reconciles it against the store ([`roster`]), transient
//! notifications with a self-clearing timer ([`notify`]), the name
//! filter projection ([`filter`]), and the line-oriented view
//! ([`shell`]). The binary only wires these together.
//!
//! Mutations are optimistic: an update or delete that fails is read as
//! "someone else already removed this record", and the local collection
//! converges to record-absent instead of retrying.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod filter;
pub mod logging;
pub mod notify;
pub mod person;
pub mod roster;
pub mod shell;
pub mod store;
