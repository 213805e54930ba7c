//! Catalog resources and their wire format.
//!
//! The plugin reads two static JSON arrays. Each request carries a context
//! map naming the resource so the response can be routed back when the host
//! delivers it.

use crate::domain::error::{PopcornError, Result};
use crate::domain::{GenreRecord, MovieRecord};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;

/// Context key used to tag web requests with their resource.
pub const RESOURCE_CONTEXT_KEY: &str = "popcorn_resource";

/// One of the two static catalog resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Genres,
    Movies,
}

impl Resource {
    /// Both resources, in the order requests are issued.
    pub const ALL: [Self; 2] = [Self::Genres, Self::Movies];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Genres => "genres",
            Self::Movies => "movies",
        }
    }

    /// Builds the context map attached to this resource's web request.
    #[must_use]
    pub fn context(self) -> BTreeMap<String, String> {
        BTreeMap::from([(RESOURCE_CONTEXT_KEY.to_string(), self.as_str().to_string())])
    }

    /// Recovers the resource from a web request's context map.
    ///
    /// Returns `None` for requests this plugin did not issue.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(RESOURCE_CONTEXT_KEY).map(String::as_str) {
            Some("genres") => Some(Self::Genres),
            Some("movies") => Some(Self::Movies),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a resource location against the catalog base URL.
///
/// Absolute `http://` and `https://` locations are returned unchanged.
/// Relative ones (`./movies.json`, `movies.json`, `/movies.json`) are
/// appended to `base_url`.
///
/// # Example
///
/// ```
/// use popcorn::fetch::resolve_url;
///
/// assert_eq!(resolve_url("http://localhost:8000/", "./genres.json"), "http://localhost:8000/genres.json");
/// assert_eq!(resolve_url("http://localhost:8000", "https://cdn.test/m.json"), "https://cdn.test/m.json");
/// ```
#[must_use]
pub fn resolve_url(base_url: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }

    let relative = location.trim_start_matches("./").trim_start_matches('/');
    format!("{}/{relative}", base_url.trim_end_matches('/'))
}

/// Checks the HTTP status of a resource response.
///
/// # Errors
///
/// Returns [`PopcornError::Fetch`] for any status outside `200..300`.
pub fn ensure_success(resource: Resource, status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(PopcornError::Fetch {
            resource: resource.to_string(),
            status,
        })
    }
}

/// Parses the body of `genres.json`.
///
/// # Errors
///
/// Returns [`PopcornError::Parse`] if the body is not an array of genres.
pub fn parse_genres(body: &[u8]) -> Result<Vec<GenreRecord>> {
    parse_array(Resource::Genres, body)
}

/// Parses the body of `movies.json`.
///
/// # Errors
///
/// Returns [`PopcornError::Parse`] if the body is not an array of movies.
pub fn parse_movies(body: &[u8]) -> Result<Vec<MovieRecord>> {
    parse_array(Resource::Movies, body)
}

fn parse_array<T: DeserializeOwned>(resource: Resource, body: &[u8]) -> Result<Vec<T>> {
    let records: Vec<T> = serde_json::from_slice(body).map_err(|source| PopcornError::Parse {
        resource: resource.to_string(),
        source,
    })?;

    tracing::debug!(resource = %resource, record_count = records.len(), bytes = body.len(), "resource parsed");
    Ok(records)
}
