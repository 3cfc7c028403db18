//! Recipe companion library: recipe and ingredient catalog management, the
//! shopping-list generator, and the session controller that binds them to a
//! signed-in user.
//!
//! The crate follows a ports-and-adapters layout. [`domain`] holds entities,
//! services, and port traits; [`outbound`] holds the in-memory document store
//! and identity provider adapters; [`inbound`] holds the session controller
//! views talk to; [`app`] wires them together from [`settings`].

pub mod app;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
pub mod telemetry;

pub use app::RecipeCompanion;
