//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the domain and
//! fetch layers. Nothing in here calls the Zellij host, so all of it runs in
//! native tests.
//!
//! # Architecture
//!
//! ```text
//! Key / Host Event → Event → handle_event → AppState mutations → Actions → Host calls
//!                                                 ↓
//!                                        compute_viewmodel → Renderer
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Focus, input mode and load state types
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Focus, InputMode, LoadState};
pub use state::{AppState, CatalogSettings};
