//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the Zellij host directly. It returns a
//! `Vec<Action>` and the plugin shim in `main.rs` turns each action into a
//! host call, in order.
//!
//! # Example
//!
//! ```
//! use popcorn::fetch::Resource;
//! use popcorn::Action;
//!
//! let actions = vec![Action::FetchResource {
//!     resource: Resource::Genres,
//!     url: "http://127.0.0.1:8000/genres.json".to_string(),
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::fetch::Resource;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET for one catalog resource.
    ///
    /// The response comes back as a web request result tagged with
    /// [`Resource::context`].
    FetchResource {
        /// Which resource the response belongs to.
        resource: Resource,
        /// Absolute URL to request.
        url: String,
    },
}
