//! Input, focus and load state types for the application.
//!
//! These enums decide which keybindings are active and which layout the
//! renderer draws.
//!
//! # State Machine
//!
//! The plugin starts in [`LoadState::Loading`] and moves exactly once to
//! either [`LoadState::Ready`] or [`LoadState::Failed`]. While ready, the user
//! works in one of two input modes:
//! - **Normal**: navigation, toggling genres, stepping the rating
//! - **`RatingEntry`**: typing a minimum rating by hand
//!
//! Focus decides what `j`/`k` move: the genre cursor or the card list.

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Genre checkboxes; `j`/`k` move the genre cursor, Space toggles.
    #[default]
    Filters,

    /// Movie cards; `j`/`k` scroll the list.
    Movies,
}

impl Focus {
    /// Returns the other pane.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Filters => Self::Movies,
            Self::Movies => Self::Filters,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    #[default]
    Normal,

    /// The rating input is open; characters edit its text buffer.
    RatingEntry,
}

/// Progress of the one-time catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Requests issued (or awaiting permission), nothing joined yet.
    #[default]
    Loading,

    /// Catalog joined; filters are live.
    Ready,

    /// Loading stopped; the message is shown to the user.
    Failed(String),
}
