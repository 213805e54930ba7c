//! Domain layer for the Popcorn plugin.
//!
//! Holds the catalog model and the pure logic derived from it, independent of
//! Zellij APIs and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Genre and movie records as fetched, plus the annotated movie
//! - [`catalog`]: Joining movies with genre names
//! - [`filter`]: Filter state and the filter engine

pub mod catalog;
pub mod error;
pub mod filter;
pub mod movie;

pub use catalog::{join_catalog, UnknownGenrePolicy, UNKNOWN_GENRE_NAME};
pub use error::{PopcornError, Result};
pub use filter::{filter_movies, FilterState};
pub use movie::{AnnotatedMovie, GenreRecord, MovieRecord};
