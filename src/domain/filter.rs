//! Filter state and the filter engine.
//!
//! [`FilterState`] is the user's selection: which genres are ticked and the
//! minimum rating. [`filter_movies`] derives the visible list from it. The
//! derivation is pure, so callers re-run it whenever the selection changes.

use super::movie::AnnotatedMovie;
use std::collections::HashSet;

/// Lower bound of the rating scale.
pub const MIN_RATING: f64 = 0.0;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 10.0;

/// User-controlled genre selection and rating threshold.
///
/// The genre list is fixed when the state is built from the annotated
/// catalog and keeps first-seen order; only the selection and threshold
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    genres: Vec<String>,
    selected: HashSet<String>,
    min_rating: f64,
}

impl FilterState {
    /// Builds an all-unselected state from the genres present in `movies`.
    ///
    /// Genre names are listed in the order they are first seen when walking
    /// the movies in order.
    #[must_use]
    pub fn from_movies(movies: &[AnnotatedMovie]) -> Self {
        let mut seen = HashSet::new();
        let genres = movies
            .iter()
            .flat_map(|movie| movie.genre_names.iter())
            .filter(|name| seen.insert((*name).clone()))
            .cloned()
            .collect();

        Self {
            genres,
            selected: HashSet::new(),
            min_rating: MIN_RATING,
        }
    }

    /// All known genre names in display order.
    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    #[must_use]
    pub fn is_selected(&self, genre: &str) -> bool {
        self.selected.contains(genre)
    }

    /// Returns `true` if at least one genre is ticked.
    #[must_use]
    pub fn has_genre_filter(&self) -> bool {
        !self.selected.is_empty()
    }

    #[must_use]
    pub const fn min_rating(&self) -> f64 {
        self.min_rating
    }

    /// Flips the selected flag of one genre, leaving the others untouched.
    ///
    /// Returns `false` without changing anything if the genre is not known.
    pub fn toggle(&mut self, genre: &str) -> bool {
        if !self.genres.iter().any(|known| known == genre) {
            return false;
        }

        if !self.selected.remove(genre) {
            self.selected.insert(genre.to_string());
        }
        true
    }

    /// Sets the rating threshold. Bounding the value is the caller's job.
    pub fn set_min_rating(&mut self, rating: f64) {
        self.min_rating = rating;
    }

    /// Clears every genre flag and sets the threshold back to zero.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.min_rating = MIN_RATING;
    }
}

/// Derives the visible movies from the annotated catalog.
///
/// A movie is visible when it carries every selected genre (no selection
/// means every movie passes) and its average vote is strictly above the
/// minimum rating. Catalog order is preserved.
#[must_use]
pub fn filter_movies(movies: &[AnnotatedMovie], filters: &FilterState) -> Vec<AnnotatedMovie> {
    let _span = tracing::debug_span!(
        "filter_movies",
        total_movies = movies.len(),
        selected_genres = filters.selected.len(),
        min_rating = filters.min_rating
    )
    .entered();

    let visible: Vec<AnnotatedMovie> = movies
        .iter()
        .filter(|movie| filters.selected.iter().all(|genre| movie.has_genre(genre)))
        .filter(|movie| movie.record.vote_average > filters.min_rating)
        .cloned()
        .collect();

    tracing::debug!(visible_count = visible.len(), "filters applied");
    visible
}
