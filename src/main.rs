//! Zellij plugin wrapper and entry point.
//!
//! This is the only module that talks to the Zellij host. It maps host events
//! to library [`Event`]s, runs them through [`handle_event`], and turns the
//! returned [`Action`]s into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the catalog is fetched once granted
//! 3. **Update**: Keys and web responses become library events
//! 4. **Render**: Delegate to the library renderer
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult(Granted)` → `Event::PermissionsGranted`
//! - `PermissionRequestResult(Denied)` → `Event::PermissionsDenied`
//! - `WebRequestResult` tagged with a resource → `Event::ResourceLoaded`
//! - `Key` → navigation, filter or rating input events (see below)
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`/`Ctrl+n`: Next genre, or scroll cards down
//! - `k`/`Up`/`Ctrl+p`: Previous genre, or scroll cards up
//! - `Space`/`Enter`: Toggle genre under the cursor
//! - `Tab`: Switch focus between filters and cards
//! - `+`/`=`, `-`: Raise or lower the minimum rating by 0.5
//! - `r`: Type a minimum rating
//! - `x`: Reset filters
//! - `q`: Close plugin
//!
//! Rating entry:
//! - digits and `.`: Type
//! - `Backspace`: Delete
//! - `Enter`: Apply
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use popcorn::fetch::Resource;
use popcorn::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: popcorn::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: popcorn::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, starts tracing, requests web access and
    /// subscribes to keys, web responses and permission results.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        popcorn::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = popcorn::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles a host event; returns `true` when the pane should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("web access denied");
                Event::PermissionsDenied
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        popcorn::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.input_mode == InputMode::RatingEntry {
            return match key.bare_key {
                BareKey::Enter => Some(Event::CommitRating),
                BareKey::Esc => Some(Event::CancelInput),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Enter | BareKey::Char(' ') => Event::ToggleGenre,
            BareKey::Tab => Event::SwitchFocus,
            BareKey::Char('+' | '=') => Event::RatingUp,
            BareKey::Char('-') => Event::RatingDown,
            BareKey::Char('r') => Event::EditRating,
            BareKey::Char('x') => Event::ResetFilters,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a web response to a library event, dropping responses this plugin
    /// did not request.
    fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(resource) = Resource::from_context(context) else {
            tracing::debug!(status = status, "ignoring untagged web response");
            return None;
        };

        tracing::debug!(resource = %resource, status = status, bytes = body.len(), "web response received");
        Some(Event::ResourceLoaded { resource, status, body })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchResource { resource, url } => {
                tracing::debug!(resource = %resource, url = %url, "requesting resource");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], resource.context());
            }
        }
    }
}
