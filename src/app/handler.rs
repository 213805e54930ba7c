//! Event handling and state transition logic.
//!
//! This module turns user input and host responses into state changes and
//! action sequences. It is the only place that decides when the catalog is
//! fetched and when the visible list is recomputed.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `CursorDown`, `CursorUp`, `SwitchFocus`
//! - **Filters**: `ToggleGenre`, `RatingUp`, `RatingDown`, `ResetFilters`
//! - **Rating input**: `EditRating`, `Char`, `Backspace`, `CommitRating`, `CancelInput`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `ResourceLoaded`
//!
//! # Example
//!
//! ```
//! use popcorn::app::state::CatalogSettings;
//! use popcorn::{handle_event, AppState, Event, Theme};
//!
//! let mut state = AppState::new(CatalogSettings::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{Focus, InputMode, LoadState};
use crate::app::{Action, AppState};
use crate::domain::error::{PopcornError, Result};
use crate::fetch::Resource;

/// Events triggered by user input or host responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the genre cursor down (wraps) or scrolls the cards down.
    CursorDown,
    /// Moves the genre cursor up (wraps) or scrolls the cards up.
    CursorUp,
    /// Flips the genre under the cursor.
    ToggleGenre,
    /// Moves focus between the filter panel and the cards.
    SwitchFocus,
    /// Raises the minimum rating by one step.
    RatingUp,
    /// Lowers the minimum rating by one step.
    RatingDown,
    /// Opens the rating input.
    EditRating,
    /// Appends a character to the rating input.
    Char(char),
    /// Removes the last character from the rating input.
    Backspace,
    /// Applies the rating input.
    CommitRating,
    /// Closes the rating input without applying it.
    CancelInput,
    /// Clears all genre flags and zeroes the rating.
    ResetFilters,
    /// Hides the plugin pane.
    CloseFocus,

    /// Web access was granted; the catalog can be fetched.
    PermissionsGranted,
    /// Web access was refused; nothing can be loaded.
    PermissionsDenied,

    /// One catalog resource came back from the host.
    ResourceLoaded {
        resource: Resource,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the pane should be redrawn.
///
/// Filter events are ignored until the catalog is ready. Load errors never
/// escape as `Err`: they move the state to [`LoadState::Failed`] so the user
/// sees them.
///
/// # Errors
///
/// Reserved for failures that leave the state unusable; none of the current
/// events produce one.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsGranted => {
            tracing::debug!("web access granted");
            Ok((false, state.start_fetch()))
        }
        Event::PermissionsDenied => {
            state.fail_load(PopcornError::PermissionDenied.to_string());
            Ok((true, vec![]))
        }
        Event::ResourceLoaded { resource, status, body } => {
            if state.load_state != LoadState::Loading {
                tracing::debug!(resource = %resource, "ignoring response after load finished");
                return Ok((false, vec![]));
            }

            tracing::debug!(resource = %resource, status = status, bytes = body.len(), "resource received");

            match state.receive_resource(*resource, *status, body) {
                Ok(installed) => Ok((installed, vec![])),
                Err(err) => {
                    state.fail_load(err.to_string());
                    Ok((true, vec![]))
                }
            }
        }
        _ if state.load_state != LoadState::Ready => Ok((false, vec![])),
        Event::CursorDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::SwitchFocus => {
            state.focus = state.focus.toggled();
            Ok((true, vec![]))
        }
        Event::ToggleGenre => {
            if state.focus != Focus::Filters {
                return Ok((false, vec![]));
            }
            Ok((state.toggle_genre_at_cursor(), vec![]))
        }
        Event::RatingUp => Ok((state.step_rating(1), vec![])),
        Event::RatingDown => Ok((state.step_rating(-1), vec![])),
        Event::ResetFilters => {
            state.reset_filters();
            Ok((true, vec![]))
        }
        Event::EditRating => {
            state.begin_rating_entry();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::RatingEntry {
                return Ok((false, vec![]));
            }
            Ok((state.push_rating_char(*c), vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::RatingEntry {
                return Ok((false, vec![]));
            }
            Ok((state.rating_input.pop().is_some(), vec![]))
        }
        Event::CommitRating => {
            if state.input_mode != InputMode::RatingEntry {
                return Ok((false, vec![]));
            }
            state.commit_rating_entry();
            Ok((true, vec![]))
        }
        Event::CancelInput => {
            if state.input_mode != InputMode::RatingEntry {
                return Ok((false, vec![]));
            }
            state.cancel_rating_entry();
            Ok((true, vec![]))
        }
    }
}

/// Short event label for spans; keeps response bodies out of traces.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::CursorDown => "CursorDown",
        Event::CursorUp => "CursorUp",
        Event::ToggleGenre => "ToggleGenre",
        Event::SwitchFocus => "SwitchFocus",
        Event::RatingUp => "RatingUp",
        Event::RatingDown => "RatingDown",
        Event::EditRating => "EditRating",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::CommitRating => "CommitRating",
        Event::CancelInput => "CancelInput",
        Event::ResetFilters => "ResetFilters",
        Event::CloseFocus => "CloseFocus",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
        Event::ResourceLoaded { .. } => "ResourceLoaded",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::CatalogSettings;
    use crate::ui::theme::Theme;

    const GENRES: &str = r#"[{"id":1,"name":"Action"},{"id":2,"name":"Comedy"}]"#;
    const MOVIES: &str = r#"[
        {"original_title":"A","overview":"a","vote_average":8,"popularity":10,"poster_path":"/a.jpg","genre_ids":[1]},
        {"original_title":"B","overview":"b","vote_average":4,"popularity":20,"poster_path":"/b.jpg","genre_ids":[2]}
    ]"#;

    fn loaded(resource: Resource, status: u16, body: &str) -> Event {
        Event::ResourceLoaded {
            resource,
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &loaded(Resource::Movies, 200, MOVIES)).unwrap();
        handle_event(&mut state, &loaded(Resource::Genres, 200, GENRES)).unwrap();
        state
    }

    #[test]
    fn permission_grant_fetches_both_resources_once() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert_eq!(actions.len(), 2);

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn permission_denied_fails_load() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        let (redraw, _) = handle_event(&mut state, &Event::PermissionsDenied).unwrap();

        assert!(redraw);
        assert_eq!(
            state.load_state,
            LoadState::Failed("Web access permission denied".to_string())
        );
    }

    #[test]
    fn catalog_installs_only_after_both_responses() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        let (redraw, _) = handle_event(&mut state, &loaded(Resource::Genres, 200, GENRES)).unwrap();
        assert!(!redraw);
        assert_eq!(state.load_state, LoadState::Loading);

        let (redraw, _) = handle_event(&mut state, &loaded(Resource::Movies, 200, MOVIES)).unwrap();
        assert!(redraw);
        assert_eq!(state.load_state, LoadState::Ready);
        assert_eq!(state.visible_movies.len(), 2);
        assert_eq!(state.visible_movies[0].title(), "B");
    }

    #[test]
    fn http_error_fails_load() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        handle_event(&mut state, &loaded(Resource::Movies, 404, "")).unwrap();

        assert_eq!(
            state.load_state,
            LoadState::Failed("Failed to fetch movies: HTTP 404".to_string())
        );

        let (redraw, _) = handle_event(&mut state, &loaded(Resource::Genres, 200, GENRES)).unwrap();
        assert!(!redraw);
    }

    #[test]
    fn malformed_body_fails_load() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        handle_event(&mut state, &loaded(Resource::Genres, 200, "{not json")).unwrap();

        assert!(matches!(state.load_state, LoadState::Failed(_)));
    }

    #[test]
    fn filter_keys_are_ignored_while_loading() {
        let mut state = AppState::new(CatalogSettings::default(), Theme::default());

        let (redraw, actions) = handle_event(&mut state, &Event::RatingUp).unwrap();

        assert!(!redraw);
        assert!(actions.is_empty());
        assert!(state.filters.min_rating().abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_and_reset() {
        let mut state = ready_state();

        handle_event(&mut state, &Event::ToggleGenre).unwrap();
        assert!(state.filters.is_selected("Comedy"));
        assert_eq!(state.visible_movies.len(), 1);

        handle_event(&mut state, &Event::ResetFilters).unwrap();
        assert!(!state.filters.has_genre_filter());
        assert_eq!(state.visible_movies.len(), 2);
    }

    #[test]
    fn rating_input_round_trip() {
        let mut state = ready_state();

        handle_event(&mut state, &Event::EditRating).unwrap();
        assert_eq!(state.input_mode, InputMode::RatingEntry);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Char('5')).unwrap();
        handle_event(&mut state, &Event::CommitRating).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.visible_movies.len(), 1);
        assert_eq!(state.visible_movies[0].title(), "A");
    }

    #[test]
    fn cancel_keeps_previous_rating() {
        let mut state = ready_state();

        handle_event(&mut state, &Event::EditRating).unwrap();
        handle_event(&mut state, &Event::Char('9')).unwrap();
        handle_event(&mut state, &Event::CancelInput).unwrap();

        assert!(state.filters.min_rating().abs() < f64::EPSILON);
        assert_eq!(state.visible_movies.len(), 2);
    }

    #[test]
    fn chars_outside_rating_entry_do_nothing() {
        let mut state = ready_state();

        let (redraw, _) = handle_event(&mut state, &Event::Char('5')).unwrap();

        assert!(!redraw);
        assert!(state.rating_input.is_empty());
    }

    #[test]
    fn switch_focus_changes_cursor_target() {
        let mut state = ready_state();

        handle_event(&mut state, &Event::SwitchFocus).unwrap();
        assert_eq!(state.focus, Focus::Movies);

        handle_event(&mut state, &Event::CursorDown).unwrap();
        assert_eq!(state.scroll_offset, 1);
        assert_eq!(state.genre_cursor, 0);
    }

    #[test]
    fn toggle_needs_filter_focus() {
        let mut state = ready_state();
        state.focus = Focus::Movies;

        let (redraw, _) = handle_event(&mut state, &Event::ToggleGenre).unwrap();

        assert!(!redraw);
        assert!(!state.filters.has_genre_filter());
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = ready_state();

        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();

        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
