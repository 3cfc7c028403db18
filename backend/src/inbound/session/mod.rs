//! Session and view controller.
//!
//! [`SessionState`] is a pure state machine over authenticator and store
//! events; [`SessionController`] feeds it from the live ports and exposes the
//! result to the views.

mod runtime;
mod state;

pub use runtime::{SessionController, SessionPorts};
pub use state::{SessionEvent, SessionState, SignedInView, Tab};
