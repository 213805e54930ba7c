//! Terminal user interface: view models, components and themes.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Header, filter panel, cards, footer, status message
//! - [`helpers`]: Text formatting shared by state and components
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{EmptyState, FilterPanelInfo, FooterInfo, GenreToggle, HeaderInfo, MovieCard, RatingInfo, UIViewModel};
