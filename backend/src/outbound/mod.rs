//! Outbound adapters implementing domain ports for external collaborators.
//!
//! - **memory**: an in-process document store implementing the catalog and
//!   recipe store ports, including live queries and batched writes.
//! - **auth**: a scripted identity provider implementing the authenticator
//!   port.
//!
//! Adapters are thin translators between domain types and their backing
//! state. They contain no business logic.

pub mod auth;
pub mod memory;
