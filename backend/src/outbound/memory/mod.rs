//! In-process document store.
//!
//! Holds the `recipes`, `ingredients`, and `units` collections behind a single
//! `tokio::sync::watch` channel. Every mutation runs inside one
//! `send_if_modified` call, so a write either lands completely or leaves the
//! collections untouched, and live queries observe whole snapshots only.

mod document_store;

pub use document_store::InMemoryDocumentStore;
