//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the root of all plugin state. It owns the
//! joined catalog, the user's filter selection and the derived visible list,
//! and it is the only place where the filter engine is invoked.
//!
//! # State Components
//!
//! - **Movies**: annotated catalog in popularity order, set once after load
//! - **Filters**: genre selection and minimum rating
//! - **Visible Movies**: derived from the two above on every filter change
//! - **Cursor / Scroll**: genre cursor in the filter panel, first card shown
//! - **Modes**: focus, input mode and load progress
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into display-ready strings for
//! the given pane size. It never re-runs the filter engine.

use super::modes::{Focus, InputMode, LoadState};
use crate::app::Action;
use crate::domain::error::Result;
use crate::domain::filter::{MAX_RATING, MIN_RATING};
use crate::domain::{filter_movies, join_catalog, AnnotatedMovie, FilterState, UnknownGenrePolicy};
use crate::fetch::{resolve_url, CatalogBarrier, Resource};
use crate::ui::helpers::{display_width, format_genre_list, format_number, poster_url, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FilterPanelInfo, FooterInfo, GenreToggle, HeaderInfo, MovieCard, RatingInfo, UIViewModel,
};

/// Amount the rating input moves per `+`/`-` press.
pub const RATING_STEP: f64 = 0.5;

/// Terminal rows taken by one movie card, separator included.
pub const CARD_HEIGHT: usize = 6;

/// Rows used by everything but genre rows and cards: blank, header, border,
/// rating line, border, result count, border, footer.
const FIXED_CHROME_ROWS: usize = 8;

/// Columns between a card's text and the pane edge.
const CARD_INDENT: usize = 2;

/// Spaces between two genre checkboxes on the same row.
pub const GENRE_GAP: usize = 2;

/// Longest accepted rating text ("10.0").
const MAX_RATING_INPUT_LEN: usize = 4;

/// Where the catalog lives and how it is joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Absolute URL of `genres.json`.
    pub genres_url: String,
    /// Absolute URL of `movies.json`.
    pub movies_url: String,
    /// Prefix for poster paths.
    pub image_base_url: String,
    pub unknown_genre: UnknownGenrePolicy,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let base_url = crate::DEFAULT_BASE_URL;
        Self {
            genres_url: resolve_url(base_url, crate::DEFAULT_GENRES_URL),
            movies_url: resolve_url(base_url, crate::DEFAULT_MOVIES_URL),
            image_base_url: crate::DEFAULT_IMAGE_BASE_URL.to_string(),
            unknown_genre: UnknownGenrePolicy::default(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog locations and join policy.
    pub settings: CatalogSettings,

    /// Progress of the one-time load.
    pub load_state: LoadState,

    /// Annotated catalog, ordered by descending popularity.
    pub movies: Vec<AnnotatedMovie>,

    /// Genre selection and rating threshold.
    pub filters: FilterState,

    /// `movies` after applying `filters`. Recomputed by `apply_filters()`.
    pub visible_movies: Vec<AnnotatedMovie>,

    /// Index into `filters.genres()` of the highlighted checkbox.
    pub genre_cursor: usize,

    /// Index into `visible_movies` of the first card shown.
    pub scroll_offset: usize,

    pub focus: Focus,

    pub input_mode: InputMode,

    /// Text typed into the rating input while in [`InputMode::RatingEntry`].
    pub rating_input: String,

    pub theme: Theme,

    barrier: CatalogBarrier,

    fetch_started: bool,
}

impl AppState {
    /// Creates an empty, loading state.
    #[must_use]
    pub fn new(settings: CatalogSettings, theme: Theme) -> Self {
        Self {
            settings,
            load_state: LoadState::Loading,
            movies: Vec::new(),
            filters: FilterState::default(),
            visible_movies: Vec::new(),
            genre_cursor: 0,
            scroll_offset: 0,
            focus: Focus::default(),
            input_mode: InputMode::default(),
            rating_input: String::new(),
            theme,
            barrier: CatalogBarrier::default(),
            fetch_started: false,
        }
    }

    /// Returns the fetch actions for both resources, once per session.
    ///
    /// Later calls return an empty list.
    pub fn start_fetch(&mut self) -> Vec<Action> {
        if self.fetch_started {
            tracing::debug!("catalog fetch already started");
            return vec![];
        }
        self.fetch_started = true;

        Resource::ALL
            .into_iter()
            .map(|resource| Action::FetchResource {
                resource,
                url: match resource {
                    Resource::Genres => self.settings.genres_url.clone(),
                    Resource::Movies => self.settings.movies_url.clone(),
                },
            })
            .collect()
    }

    /// Feeds one resource response through the join barrier.
    ///
    /// When the response completes the pair, the catalog is joined and
    /// installed. Returns `true` if the catalog was installed.
    ///
    /// # Errors
    ///
    /// Returns status, parse and unknown-genre errors. State is left
    /// unchanged; the caller decides how to surface them.
    pub fn receive_resource(&mut self, resource: Resource, status: u16, body: &[u8]) -> Result<bool> {
        let Some(parts) = self.barrier.accept(resource, status, body)? else {
            return Ok(false);
        };

        let movies = join_catalog(parts.movies, &parts.genres, self.settings.unknown_genre)?;
        self.install_catalog(movies);
        Ok(true)
    }

    /// Installs the joined catalog and builds an all-unselected filter state.
    pub fn install_catalog(&mut self, movies: Vec<AnnotatedMovie>) {
        self.filters = FilterState::from_movies(&movies);
        self.movies = movies;
        self.genre_cursor = 0;
        self.scroll_offset = 0;
        self.load_state = LoadState::Ready;
        self.apply_filters();

        tracing::info!(
            movie_count = self.movies.len(),
            genre_count = self.filters.genres().len(),
            "catalog loaded"
        );
    }

    /// Marks the load as failed with a user-facing message.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "catalog load failed");
        self.load_state = LoadState::Failed(message);
    }

    /// Re-derives `visible_movies` and keeps the scroll offset in range.
    pub fn apply_filters(&mut self) {
        self.visible_movies = filter_movies(&self.movies, &self.filters);
        self.scroll_offset = self
            .scroll_offset
            .min(self.visible_movies.len().saturating_sub(1));
    }

    /// Moves the genre cursor (wrapping) or scrolls the cards, by focus.
    pub fn move_cursor_down(&mut self) {
        match self.focus {
            Focus::Filters => {
                let count = self.filters.genres().len();
                if count > 0 {
                    self.genre_cursor = (self.genre_cursor + 1) % count;
                }
            }
            Focus::Movies => {
                if self.scroll_offset + 1 < self.visible_movies.len() {
                    self.scroll_offset += 1;
                }
            }
        }
    }

    /// Moves the genre cursor (wrapping) or scrolls the cards, by focus.
    pub fn move_cursor_up(&mut self) {
        match self.focus {
            Focus::Filters => {
                let count = self.filters.genres().len();
                if count > 0 {
                    self.genre_cursor = self.genre_cursor.checked_sub(1).unwrap_or(count - 1);
                }
            }
            Focus::Movies => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
        }
    }

    /// Name of the genre under the cursor, if any.
    #[must_use]
    pub fn genre_at_cursor(&self) -> Option<&str> {
        self.filters.genres().get(self.genre_cursor).map(String::as_str)
    }

    /// Toggles the genre under the cursor and re-filters.
    ///
    /// Returns `false` if there is no genre to toggle.
    pub fn toggle_genre_at_cursor(&mut self) -> bool {
        let Some(genre) = self.genre_at_cursor().map(ToString::to_string) else {
            return false;
        };

        self.filters.toggle(&genre);
        tracing::debug!(genre = %genre, selected = self.filters.is_selected(&genre), "genre toggled");
        self.apply_filters();
        true
    }

    /// Moves the minimum rating by `steps` increments of [`RATING_STEP`],
    /// clamped to the rating scale. Returns `true` if the value changed.
    pub fn step_rating(&mut self, steps: i32) -> bool {
        let current = self.filters.min_rating();
        let next = f64::from(steps)
            .mul_add(RATING_STEP, current)
            .clamp(MIN_RATING, MAX_RATING);
        self.set_min_rating(next)
    }

    fn set_min_rating(&mut self, rating: f64) -> bool {
        if (rating - self.filters.min_rating()).abs() < f64::EPSILON {
            return false;
        }
        self.filters.set_min_rating(rating);
        tracing::debug!(min_rating = rating, "minimum rating updated");
        self.apply_filters();
        true
    }

    /// Opens the rating input, pre-filled with the current threshold.
    pub fn begin_rating_entry(&mut self) {
        self.input_mode = InputMode::RatingEntry;
        self.rating_input = format_number(self.filters.min_rating());
    }

    /// Appends a character to the rating input.
    ///
    /// Only digits and a single decimal point are accepted, up to four
    /// characters. Returns `true` if the character was taken.
    pub fn push_rating_char(&mut self, c: char) -> bool {
        let accepted = self.rating_input.len() < MAX_RATING_INPUT_LEN
            && (c.is_ascii_digit() || (c == '.' && !self.rating_input.contains('.')));
        if accepted {
            self.rating_input.push(c);
        }
        accepted
    }

    /// Applies the typed rating and closes the input.
    ///
    /// The value is clamped to the rating scale. Text that does not parse
    /// leaves the threshold unchanged. Returns `true` if the value changed.
    pub fn commit_rating_entry(&mut self) -> bool {
        let typed = std::mem::take(&mut self.rating_input);
        self.input_mode = InputMode::Normal;

        match typed.parse::<f64>() {
            Ok(value) if value.is_finite() => self.set_min_rating(value.clamp(MIN_RATING, MAX_RATING)),
            _ => {
                tracing::debug!(input = %typed, "ignoring unparseable rating");
                false
            }
        }
    }

    /// Closes the rating input without applying it.
    pub fn cancel_rating_entry(&mut self) {
        self.rating_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Clears every genre flag, zeroes the rating and re-filters.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.scroll_offset = 0;
        self.apply_filters();
        tracing::debug!("filters reset");
    }

    /// Computes a renderable UI view model for a pane of `rows` x `cols`.
    ///
    /// # Layout Budget
    ///
    /// Genre checkboxes are packed into as many rows as the width requires.
    /// Whatever height remains after the fixed chrome and those rows is filled
    /// with whole cards, starting at `scroll_offset`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        let empty_state = match &self.load_state {
            LoadState::Loading => Some(EmptyState {
                message: "Loading movies...".to_string(),
                subtitle: "Fetching genres and movies".to_string(),
                is_error: false,
            }),
            LoadState::Failed(message) => Some(EmptyState {
                message: "Could not load movies".to_string(),
                subtitle: message.clone(),
                is_error: true,
            }),
            LoadState::Ready => None,
        };

        let filter_panel = self.compute_filter_panel(cols);

        if empty_state.is_some() {
            return UIViewModel {
                header,
                filter_panel,
                result_count: String::new(),
                cards: vec![],
                no_results_hint: None,
                footer,
                empty_state,
            };
        }

        let card_rows = rows.saturating_sub(FIXED_CHROME_ROWS + filter_panel.genre_rows.len());
        let capacity = card_rows / CARD_HEIGHT;
        let text_width = cols.saturating_sub(CARD_INDENT * 2);

        let cards = self
            .visible_movies
            .iter()
            .skip(self.scroll_offset)
            .take(capacity)
            .map(|movie| self.compute_card(movie, text_width))
            .collect();

        let no_results_hint = if self.visible_movies.is_empty() {
            Some(if self.movies.is_empty() {
                "The catalog has no movies".to_string()
            } else {
                "No movies match the current filters".to_string()
            })
        } else {
            None
        };

        UIViewModel {
            header,
            filter_panel,
            result_count: Self::result_count(self.visible_movies.len()),
            cards,
            no_results_hint,
            footer,
            empty_state: None,
        }
    }

    fn result_count(count: usize) -> String {
        let noun = if count == 1 { "movie" } else { "movies" };
        format!("Showing {count} {noun}")
    }

    fn compute_card(&self, movie: &AnnotatedMovie, width: usize) -> MovieCard {
        let record = &movie.record;
        MovieCard {
            title: truncate(&record.original_title, width),
            overview: truncate(&record.overview, width),
            rating: truncate(&format!("Rating: {}/10", format_number(record.vote_average)), width),
            popularity: truncate(&format!("Popularity: {}", format_number(record.popularity)), width),
            genres: truncate(&format!("Genres: {}", format_genre_list(&movie.genre_names)), width),
            poster_url: truncate(&poster_url(&self.settings.image_base_url, &record.poster_path), width),
        }
    }

    fn compute_filter_panel(&self, cols: usize) -> FilterPanelInfo {
        let is_focused = self.focus == Focus::Filters && self.input_mode == InputMode::Normal;

        let toggles = self
            .filters
            .genres()
            .iter()
            .enumerate()
            .map(|(idx, genre)| {
                let is_selected = self.filters.is_selected(genre);
                GenreToggle {
                    label: format!("[{}] {genre}", if is_selected { 'x' } else { ' ' }),
                    is_selected,
                    is_cursor: is_focused && idx == self.genre_cursor,
                }
            })
            .collect();

        FilterPanelInfo {
            genre_rows: pack_genre_rows(toggles, cols.saturating_sub(2)),
            rating: RatingInfo {
                value: format_number(self.filters.min_rating()),
                editing: (self.input_mode == InputMode::RatingEntry).then(|| self.rating_input.clone()),
            },
            is_focused,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let selected: Vec<&String> = self
            .filters
            .genres()
            .iter()
            .filter(|genre| self.filters.is_selected(genre))
            .collect();

        let mut parts = Vec::new();
        if !selected.is_empty() {
            parts.push(format_genre_list(&selected));
        }
        if self.filters.min_rating() > MIN_RATING {
            parts.push(format!("rating > {}", format_number(self.filters.min_rating())));
        }

        HeaderInfo {
            title: "Now playing".to_string(),
            active_filters: (!parts.is_empty()).then(|| parts.join(" | ")),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.load_state, self.input_mode, self.focus) {
            (LoadState::Loading | LoadState::Failed(_), _, _) => "q: quit",
            (LoadState::Ready, InputMode::RatingEntry, _) => {
                "Type a rating 0-10  Enter: apply  Esc: cancel  Backspace: delete"
            }
            (LoadState::Ready, InputMode::Normal, Focus::Filters) => {
                "j/k: genre  Space: toggle  +/-: rating  r: edit rating  x: reset  Tab: movies  q: quit"
            }
            (LoadState::Ready, InputMode::Normal, Focus::Movies) => {
                "j/k: scroll  +/-: rating  r: edit rating  x: reset  Tab: filters  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Packs checkboxes greedily into rows no wider than `width`.
///
/// A checkbox wider than `width` still gets a row of its own.
fn pack_genre_rows(toggles: Vec<GenreToggle>, width: usize) -> Vec<Vec<GenreToggle>> {
    let mut rows: Vec<Vec<GenreToggle>> = Vec::new();
    let mut row_width = 0;

    for toggle in toggles {
        let toggle_width = display_width(&toggle.label);
        match rows.last_mut() {
            Some(row) if row_width + GENRE_GAP + toggle_width <= width => {
                row_width += GENRE_GAP + toggle_width;
                row.push(toggle);
            }
            _ => {
                row_width = toggle_width;
                rows.push(vec![toggle]);
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieRecord;

    fn annotated(title: &str, rating: f64, genres: &[&str]) -> AnnotatedMovie {
        AnnotatedMovie {
            record: MovieRecord {
                original_title: title.to_string(),
                overview: format!("About {title}"),
                vote_average: rating,
                popularity: 1.0,
                poster_path: format!("/{title}.jpg"),
                genre_ids: vec![],
            },
            genre_names: genres.iter().map(ToString::to_string).collect(),
        }
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());
        state.install_catalog(vec![
            annotated("a", 8.0, &["Action", "Comedy"]),
            annotated("b", 6.0, &["Action"]),
            annotated("c", 4.0, &["Drama"]),
        ]);
        state
    }

    #[test]
    fn start_fetch_runs_once() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        let actions = state.start_fetch();
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action::FetchResource {
            resource: Resource::Genres,
            url: "http://127.0.0.1:8000/genres.json".to_string(),
        }));
        assert!(state.start_fetch().is_empty());
    }

    #[test]
    fn genre_cursor_wraps() {
        let mut state = ready_state();
        assert_eq!(state.genre_at_cursor(), Some("Action"));

        state.move_cursor_up();
        assert_eq!(state.genre_at_cursor(), Some("Drama"));

        state.move_cursor_down();
        state.move_cursor_down();
        assert_eq!(state.genre_at_cursor(), Some("Comedy"));
    }

    #[test]
    fn scrolling_stays_in_range() {
        let mut state = ready_state();
        state.focus = Focus::Movies;

        for _ in 0..5 {
            state.move_cursor_down();
        }
        assert_eq!(state.scroll_offset, 2);

        state.toggle_genre_at_cursor();
        state.filters.toggle("Drama");
        state.apply_filters();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn rating_steps_are_clamped() {
        let mut state = ready_state();

        assert!(!state.step_rating(-1));
        assert!(state.step_rating(1));
        assert!((state.filters.min_rating() - 0.5).abs() < f64::EPSILON);

        for _ in 0..30 {
            state.step_rating(1);
        }
        assert!((state.filters.min_rating() - MAX_RATING).abs() < f64::EPSILON);
        assert!(state.visible_movies.is_empty());
    }

    #[test]
    fn rating_entry_filters_input() {
        let mut state = ready_state();
        state.begin_rating_entry();
        assert_eq!(state.rating_input, "0");

        state.rating_input.clear();
        assert!(state.push_rating_char('5'));
        assert!(state.push_rating_char('.'));
        assert!(!state.push_rating_char('.'));
        assert!(!state.push_rating_char('a'));
        assert!(state.push_rating_char('5'));

        assert!(state.commit_rating_entry());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!((state.filters.min_rating() - 5.5).abs() < f64::EPSILON);
        assert_eq!(state.visible_movies.len(), 2);
    }

    #[test]
    fn rating_entry_clamps_and_rejects() {
        let mut state = ready_state();

        state.begin_rating_entry();
        state.rating_input = "42".to_string();
        state.commit_rating_entry();
        assert!((state.filters.min_rating() - MAX_RATING).abs() < f64::EPSILON);

        state.begin_rating_entry();
        state.rating_input = ".".to_string();
        assert!(!state.commit_rating_entry());
        assert!((state.filters.min_rating() - MAX_RATING).abs() < f64::EPSILON);
    }

    #[test]
    fn packs_genres_by_width() {
        let toggle = |label: &str| GenreToggle {
            label: label.to_string(),
            is_selected: false,
            is_cursor: false,
        };

        let rows = pack_genre_rows(vec![toggle("[ ] Action"), toggle("[ ] Comedy"), toggle("[ ] Drama")], 22);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][0].label, "[ ] Drama");
    }

    #[test]
    fn viewmodel_while_loading_shows_empty_state() {
        let state = AppState::new(CatalogSettings::default(), Theme::default());

        let vm = state.compute_viewmodel(24, 80);

        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "Loading movies...");
        assert!(!empty.is_error);
        assert!(vm.cards.is_empty());
    }

    #[test]
    fn viewmodel_after_failure_shows_error() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());
        state.fail_load("Failed to fetch movies: HTTP 500");

        let empty = state.compute_viewmodel(24, 80).empty_state.unwrap();
        assert!(empty.is_error);
        assert_eq!(empty.subtitle, "Failed to fetch movies: HTTP 500");
    }

    #[test]
    fn viewmodel_formats_cards() {
        let state = ready_state();

        let vm = state.compute_viewmodel(40, 80);

        assert_eq!(vm.result_count, "Showing 3 movies");
        assert_eq!(vm.filter_panel.genre_rows.len(), 1);
        assert!(vm.filter_panel.genre_rows[0][0].is_cursor);
        let card = &vm.cards[0];
        assert_eq!(card.title, "a");
        assert_eq!(card.rating, "Rating: 8/10");
        assert_eq!(card.popularity, "Popularity: 1");
        assert_eq!(card.genres, "Genres: Action and Comedy");
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w500/a.jpg");
    }

    #[test]
    fn viewmodel_fits_whole_cards() {
        let state = ready_state();

        // 8 chrome rows + 1 genre row leaves 13 rows: two cards.
        let vm = state.compute_viewmodel(22, 80);

        assert_eq!(vm.cards.len(), 2);
    }

    #[test]
    fn viewmodel_hints_when_nothing_matches() {
        let mut state = ready_state();
        state.filters.toggle("Drama");
        state.filters.toggle("Comedy");
        state.apply_filters();

        let vm = state.compute_viewmodel(40, 80);

        assert_eq!(vm.result_count, "Showing 0 movies");
        assert_eq!(vm.no_results_hint.as_deref(), Some("No movies match the current filters"));
    }

    #[test]
    fn header_summarizes_active_filters() {
        let mut state = ready_state();
        assert_eq!(state.compute_viewmodel(40, 80).header.active_filters, None);

        state.filters.toggle("Comedy");
        state.filters.toggle("Action");
        state.filters.set_min_rating(6.5);
        state.apply_filters();

        assert_eq!(
            state.compute_viewmodel(40, 80).header.active_filters.as_deref(),
            Some("Action and Comedy | rating > 6.5")
        );
    }

    #[test]
    fn single_result_is_singular() {
        let mut state = ready_state();
        state.filters.toggle("Drama");
        state.apply_filters();

        assert_eq!(state.compute_viewmodel(40, 80).result_count, "Showing 1 movie");
    }
}
