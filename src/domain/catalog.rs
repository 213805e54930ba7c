//! Movie-genre join.
//!
//! Turns the two fetched collections into the annotated, popularity-ordered
//! movie list the rest of the plugin works with. The order produced here is
//! final; filtering only ever removes movies from it.

use super::error::{PopcornError, Result};
use super::movie::{AnnotatedMovie, GenreRecord, MovieRecord};
use std::cmp::Ordering;

/// Display name substituted for unresolved genre ids under [`UnknownGenrePolicy::Label`].
pub const UNKNOWN_GENRE_NAME: &str = "Unknown";

/// What to do when a movie references a genre id that the genre list lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownGenrePolicy {
    /// Substitute [`UNKNOWN_GENRE_NAME`] and keep loading.
    #[default]
    Label,
    /// Abort the load with [`PopcornError::UnknownGenre`].
    Fail,
}

impl UnknownGenrePolicy {
    /// Parses the `unknown_genre` configuration value (`label` or `fail`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "label" => Some(Self::Label),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Joins movies with genre names and orders them by descending popularity.
///
/// Each `genre_ids` entry resolves to the first genre with the same id. The
/// sort is stable, so equally popular movies keep their fetch order. A `NaN`
/// popularity compares equal to everything.
///
/// # Errors
///
/// Returns [`PopcornError::UnknownGenre`] for the first unresolved id when the
/// policy is [`UnknownGenrePolicy::Fail`].
///
/// # Example
///
/// ```
/// use popcorn::domain::{join_catalog, GenreRecord, MovieRecord, UnknownGenrePolicy};
///
/// let genres = vec![GenreRecord { id: 28, name: "Action".to_string() }];
/// let movies = vec![MovieRecord {
///     original_title: "Heat".to_string(),
///     overview: String::new(),
///     vote_average: 8.3,
///     popularity: 42.5,
///     poster_path: "/heat.jpg".to_string(),
///     genre_ids: vec![28],
/// }];
///
/// let joined = join_catalog(movies, &genres, UnknownGenrePolicy::Label)?;
/// assert_eq!(joined[0].genre_names, vec!["Action"]);
/// # Ok::<(), popcorn::PopcornError>(())
/// ```
pub fn join_catalog(
    mut movies: Vec<MovieRecord>,
    genres: &[GenreRecord],
    policy: UnknownGenrePolicy,
) -> Result<Vec<AnnotatedMovie>> {
    let _span = tracing::debug_span!(
        "join_catalog",
        movie_count = movies.len(),
        genre_count = genres.len(),
        policy = ?policy
    )
    .entered();

    movies.sort_by(|a, b| b.popularity.partial_cmp(&a.popularity).unwrap_or(Ordering::Equal));

    let annotated = movies
        .into_iter()
        .map(|record| {
            let genre_names = record
                .genre_ids
                .iter()
                .map(|&genre_id| resolve_genre(genre_id, &record, genres, policy))
                .collect::<Result<Vec<_>>>()?;
            Ok(AnnotatedMovie { record, genre_names })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(annotated_count = annotated.len(), "catalog joined");
    Ok(annotated)
}

fn resolve_genre(
    genre_id: i64,
    movie: &MovieRecord,
    genres: &[GenreRecord],
    policy: UnknownGenrePolicy,
) -> Result<String> {
    if let Some(genre) = genres.iter().find(|genre| genre.id == genre_id) {
        return Ok(genre.name.clone());
    }

    match policy {
        UnknownGenrePolicy::Label => {
            tracing::warn!(
                genre_id = genre_id,
                title = %movie.original_title,
                "unresolved genre id, labelling as unknown"
            );
            Ok(UNKNOWN_GENRE_NAME.to_string())
        }
        UnknownGenrePolicy::Fail => Err(PopcornError::UnknownGenre {
            genre_id,
            title: movie.original_title.clone(),
        }),
    }
}
