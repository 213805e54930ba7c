//! Catalog fetching.
//!
//! The plugin runtime performs the actual HTTP requests through the Zellij
//! host; this module owns everything around them: which resources exist,
//! where they live, how their bodies parse, and when both have arrived.
//!
//! - `resource`: resource identity, URL resolution, status and body parsing
//! - `barrier`: waits for both responses before the catalog is joined

pub mod barrier;
pub mod resource;

pub use barrier::{CatalogBarrier, CatalogParts};
pub use resource::{ensure_success, parse_genres, parse_movies, resolve_url, Resource};
