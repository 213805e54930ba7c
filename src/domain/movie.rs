//! Catalog records.
//!
//! [`GenreRecord`] and [`MovieRecord`] mirror the JSON served by the catalog
//! resources. [`AnnotatedMovie`] is a movie after genre ids have been resolved
//! to display names.

use serde::{Deserialize, Serialize};

/// A genre as served by `genres.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: i64,
    pub name: String,
}

/// A movie as served by `movies.json`.
///
/// Fields the plugin does not display (release date, vote count, ...) are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub original_title: String,
    pub overview: String,
    /// Average vote on a 0-10 scale.
    pub vote_average: f64,
    pub popularity: f64,
    pub poster_path: String,
    pub genre_ids: Vec<i64>,
}

/// A movie with its genre ids resolved to names.
///
/// `genre_names` follows the order of `record.genre_ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedMovie {
    pub record: MovieRecord,
    pub genre_names: Vec<String>,
}

impl AnnotatedMovie {
    /// Returns the movie title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.record.original_title
    }

    /// Returns `true` if the movie carries the named genre.
    #[must_use]
    pub fn has_genre(&self, name: &str) -> bool {
        self.genre_names.iter().any(|genre| genre == name)
    }
}
