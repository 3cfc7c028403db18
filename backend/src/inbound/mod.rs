//! Inbound adapters that translate user-facing interactions into domain calls
//! while keeping presentation concerns at the edge.
//!
//! The only inbound surface is the session controller in [`session`], which
//! tracks sign-in state, live snapshots, and tab navigation for the views.

pub mod session;
