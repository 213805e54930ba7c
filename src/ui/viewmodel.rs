//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. Every string in them is display-ready: labels are formatted,
//! long text is truncated to the pane width and genre checkboxes are already
//! packed into rows.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Genre checkboxes and rating input.
    pub filter_panel: FilterPanelInfo,

    /// Result count line, e.g. "Showing 3 movies".
    pub result_count: String,

    /// Cards that fit in the pane, starting at the scroll offset.
    pub cards: Vec<MovieCard>,

    /// Dimmed hint shown in place of cards when nothing is visible.
    pub no_results_hint: Option<String>,

    /// Keybinding hints.
    pub footer: FooterInfo,

    /// Replaces the whole layout while loading or after a failed load.
    pub empty_state: Option<EmptyState>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Summary of active filters, e.g. "Action and Drama | rating > 6.5".
    pub active_filters: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "Space: toggle  x: reset  q: quit").
    pub keybindings: String,
}

/// Filter panel display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelInfo {
    /// Genre checkboxes packed into rows that fit the pane width.
    pub genre_rows: Vec<Vec<GenreToggle>>,

    /// Minimum rating input.
    pub rating: RatingInfo,

    /// Whether the genre cursor is active.
    pub is_focused: bool,
}

/// One genre checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreToggle {
    /// Checkbox and name, e.g. "[x] Action".
    pub label: String,

    pub is_selected: bool,

    /// Whether the genre cursor sits on this checkbox.
    pub is_cursor: bool,
}

/// Minimum rating input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingInfo {
    /// Current threshold, formatted.
    pub value: String,

    /// Text buffer while the input is being edited.
    pub editing: Option<String>,
}

/// Display fields of one movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub title: String,
    pub overview: String,
    /// "Rating: 8/10".
    pub rating: String,
    /// "Popularity: 20".
    pub popularity: String,
    /// "Genres: Action, Comedy and Drama".
    pub genres: String,
    pub poster_url: String,
}

/// Full-pane message shown instead of the normal layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "Loading movies...").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Whether to style the message as an error.
    pub is_error: bool,
}
