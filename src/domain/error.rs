//! Error types for the Popcorn plugin.
//!
//! This module defines the centralized error type [`PopcornError`] and a type alias
//! [`Result`] used throughout the crate. All variants derive their `Display`
//! implementation through `thiserror`.

use thiserror::Error;

/// The main error type for Popcorn plugin operations.
///
/// Covers the failure modes of loading the catalog (HTTP status, JSON shape,
/// genre resolution), of the plugin environment (permissions), and of the
/// ambient concerns (theme loading, file I/O).
///
/// # Examples
///
/// ```
/// use popcorn::PopcornError;
///
/// let err = PopcornError::Fetch { resource: "genres".to_string(), status: 404 };
/// assert_eq!(err.to_string(), "Failed to fetch genres: HTTP 404");
/// ```
#[derive(Debug, Error)]
pub enum PopcornError {
    /// A catalog resource answered with a non-success HTTP status.
    #[error("Failed to fetch {resource}: HTTP {status}")]
    Fetch {
        /// Resource name (`genres` or `movies`).
        resource: String,
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// A catalog resource body was not the expected JSON array.
    #[error("Failed to parse {resource}: {source}")]
    Parse {
        /// Resource name (`genres` or `movies`).
        resource: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A movie references a genre id missing from the genre list.
    ///
    /// Only raised under the `fail` unknown-genre policy.
    #[error("Movie \"{title}\" references unknown genre id {genre_id}")]
    UnknownGenre {
        /// The id that did not resolve.
        genre_id: i64,
        /// Title of the movie carrying the id.
        title: String,
    },

    /// The user refused the web access permission.
    #[error("Web access permission denied")]
    PermissionDenied,

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Popcorn operations.
pub type Result<T> = std::result::Result<T, PopcornError>;
