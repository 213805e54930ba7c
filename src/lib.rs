//! Popcorn: a Zellij plugin for browsing now-playing movies.
//!
//! Popcorn fetches a genre list and a movie list over HTTP, joins them, and
//! shows the movies as cards ordered by popularity. A filter panel narrows the
//! list by genre (every checked genre must match) and by a minimum rating.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Actions (web requests, hide)                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │   │ Domain Layer  │
//! │ (ui/)         │   │ (fetch/)      │   │ (domain/)     │
//! │ - Rendering   │   │ - URLs        │   │ - Join        │
//! │ - Theming     │   │ - JSON bodies │   │ - Filters     │
//! │ - Components  │   │ - Barrier     │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Observability                     │
//! │  - Sandbox paths, OpenTelemetry file traces         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/popcorn.wasm" {
//!         base_url "http://127.0.0.1:8000"
//!         genres_url "./genres.json"
//!         movies_url "./movies.json"
//!         image_base_url "https://image.tmdb.org/t/p/w500"
//!         unknown_genre "label"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load`: parse configuration, start tracing, build `AppState`, request
//!    web access and subscribe to events.
//! 2. Permission granted: both resources are requested once.
//! 3. Each web response goes through the join barrier; the second one
//!    triggers the join and the first render of cards.
//! 4. Every filter change re-runs the filter engine and redraws.
//!
//! # Example
//!
//! ```
//! use popcorn::fetch::Resource;
//! use popcorn::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, fetches) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(fetches.len(), 2);
//!
//! let genres = br#"[{"id":28,"name":"Action"}]"#.to_vec();
//! let movies = br#"[{"original_title":"Heat","overview":"","vote_average":8.3,
//!     "popularity":40.0,"poster_path":"/heat.jpg","genre_ids":[28]}]"#.to_vec();
//! handle_event(&mut state, &Event::ResourceLoaded { resource: Resource::Genres, status: 200, body: genres })?;
//! handle_event(&mut state, &Event::ResourceLoaded { resource: Resource::Movies, status: 200, body: movies })?;
//!
//! assert_eq!(state.visible_movies[0].genre_names, vec!["Action"]);
//! # Ok::<(), popcorn::PopcornError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, CatalogSettings, Event, InputMode};
pub use domain::{PopcornError, Result, UnknownGenrePolicy};
pub use ui::Theme;

use fetch::resolve_url;
use std::collections::BTreeMap;

/// Base URL relative resource locations are resolved against.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_GENRES_URL: &str = "./genres.json";

pub const DEFAULT_MOVIES_URL: &str = "./movies.json";

/// Prefix prepended to each movie's `poster_path`.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base for relative `genres_url` / `movies_url` values.
    pub base_url: String,

    /// Genre resource, relative to `base_url` or absolute.
    pub genres_url: String,

    /// Movie resource, relative to `base_url` or absolute.
    pub movies_url: String,

    pub image_base_url: String,

    /// Handling of genre ids missing from the genre list.
    pub unknown_genre: UnknownGenrePolicy,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for traces, e.g. `debug` or `popcorn=trace`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            genres_url: DEFAULT_GENRES_URL.to_string(),
            movies_url: DEFAULT_MOVIES_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            unknown_genre: UnknownGenrePolicy::default(),
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or unrecognized values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use popcorn::{Config, UnknownGenrePolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://films.example".to_string());
    /// map.insert("unknown_genre".to_string(), "fail".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.catalog_settings().genres_url, "https://films.example/genres.json");
    /// assert_eq!(config.unknown_genre, UnknownGenrePolicy::Fail);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            base_url: value("base_url").unwrap_or(defaults.base_url),
            genres_url: value("genres_url").unwrap_or(defaults.genres_url),
            movies_url: value("movies_url").unwrap_or(defaults.movies_url),
            image_base_url: value("image_base_url").unwrap_or(defaults.image_base_url),
            unknown_genre: value("unknown_genre")
                .and_then(|name| UnknownGenrePolicy::from_name(&name))
                .unwrap_or(defaults.unknown_genre),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Resolves resource locations into absolute URLs.
    #[must_use]
    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            genres_url: resolve_url(&self.base_url, &self.genres_url),
            movies_url: resolve_url(&self.base_url, &self.movies_url),
            image_base_url: self.image_base_url.clone(),
            unknown_genre: self.unknown_genre,
        }
    }

    /// Theme from `theme_file`, else `theme_name`, else the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial, loading `AppState` for `config`.
///
/// Does not fetch anything: fetching starts once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let settings = config.catalog_settings();
    tracing::debug!(
        genres_url = %settings.genres_url,
        movies_url = %settings.movies_url,
        unknown_genre = ?settings.unknown_genre,
        "initializing popcorn plugin"
    );

    AppState::new(settings, config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn default_settings_point_at_local_server() {
        let settings = Config::default().catalog_settings();

        assert_eq!(settings.genres_url, "http://127.0.0.1:8000/genres.json");
        assert_eq!(settings.movies_url, "http://127.0.0.1:8000/movies.json");
        assert_eq!(settings, CatalogSettings::default());
    }

    #[test]
    fn absolute_resource_urls_ignore_base() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "http://ignored"),
            ("movies_url", "https://cdn.example/now_playing.json"),
        ]));

        let settings = config.catalog_settings();

        assert_eq!(settings.movies_url, "https://cdn.example/now_playing.json");
        assert_eq!(settings.genres_url, "http://ignored/genres.json");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[("unknown_genre", "explode"), ("trace_level", "  ")]));

        assert_eq!(config.unknown_genre, UnknownGenrePolicy::Label);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn theme_selection() {
        let named = Config::from_zellij(&map(&[("theme", "catppuccin-latte")]));
        assert_eq!(named.load_theme().name, "catppuccin-latte");

        let unknown = Config::from_zellij(&map(&[("theme", "nope")]));
        assert_eq!(unknown.load_theme(), Theme::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = toml::to_string(&Theme::from_name("catppuccin-frappe").unwrap()).unwrap();
        file.write_all(custom.as_bytes()).unwrap();
        let from_file = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", file.path().to_str().unwrap()),
        ]));
        assert_eq!(from_file.load_theme().name, "catppuccin-frappe");
    }

    #[test]
    fn initialize_starts_loading() {
        let state = initialize(&Config::default());

        assert_eq!(state.load_state, app::LoadState::Loading);
        assert!(state.movies.is_empty());
    }
}
