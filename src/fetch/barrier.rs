//! Join barrier for the two catalog fetches.
//!
//! The host delivers web request results one event at a time and in no
//! particular order. [`CatalogBarrier`] keeps whichever half arrived first and
//! hands both halves over once the second one lands.

use super::resource::{ensure_success, parse_genres, parse_movies, Resource};
use crate::domain::error::Result;
use crate::domain::{GenreRecord, MovieRecord};

/// Both halves of the catalog, ready to be joined.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogParts {
    pub movies: Vec<MovieRecord>,
    pub genres: Vec<GenreRecord>,
}

/// Collects the genre and movie responses until both are present.
#[derive(Debug, Clone, Default)]
pub struct CatalogBarrier {
    genres: Option<Vec<GenreRecord>>,
    movies: Option<Vec<MovieRecord>>,
}

impl CatalogBarrier {
    /// Accepts one response.
    ///
    /// Returns `Ok(Some(parts))` when this response completes the pair, after
    /// which the barrier is empty again. Returns `Ok(None)` while the other
    /// half is still outstanding. A repeated response for the same resource
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns the status or parse error of this response. The other half, if
    /// already held, is kept.
    pub fn accept(&mut self, resource: Resource, status: u16, body: &[u8]) -> Result<Option<CatalogParts>> {
        ensure_success(resource, status)?;

        match resource {
            Resource::Genres => self.genres = Some(parse_genres(body)?),
            Resource::Movies => self.movies = Some(parse_movies(body)?),
        }

        if self.genres.is_none() || self.movies.is_none() {
            tracing::debug!(resource = %resource, "waiting for the other catalog resource");
            return Ok(None);
        }

        Ok(self
            .movies
            .take()
            .zip(self.genres.take())
            .map(|(movies, genres)| CatalogParts { movies, genres }))
    }

    /// Returns `true` if one half has arrived and the other has not.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.genres.is_some() != self.movies.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENRES: &[u8] = br#"[{"id": 1, "name": "Action"}]"#;
    const MOVIES: &[u8] = br#"[{
        "original_title": "A",
        "overview": "",
        "vote_average": 8,
        "popularity": 10,
        "poster_path": "/a.jpg",
        "genre_ids": [1]
    }]"#;

    #[test]
    fn completes_in_either_order() {
        let mut barrier = CatalogBarrier::default();
        assert!(barrier.accept(Resource::Movies, 200, MOVIES).unwrap().is_none());
        assert!(barrier.is_partial());
        let parts = barrier.accept(Resource::Genres, 200, GENRES).unwrap().unwrap();
        assert_eq!(parts.movies.len(), 1);
        assert_eq!(parts.genres.len(), 1);
        assert!(!barrier.is_partial());

        let mut barrier = CatalogBarrier::default();
        assert!(barrier.accept(Resource::Genres, 200, GENRES).unwrap().is_none());
        assert!(barrier.accept(Resource::Movies, 200, MOVIES).unwrap().is_some());
    }

    #[test]
    fn failed_half_keeps_the_other() {
        let mut barrier = CatalogBarrier::default();
        barrier.accept(Resource::Genres, 200, GENRES).unwrap();

        assert!(barrier.accept(Resource::Movies, 404, b"").is_err());
        assert!(barrier.is_partial());
    }

    #[test]
    fn malformed_body_is_rejected() {
        let mut barrier = CatalogBarrier::default();

        assert!(barrier.accept(Resource::Genres, 200, b"not json").is_err());
        assert!(!barrier.is_partial());
    }
}
