//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Bookscout library and the Zellij plugin
//! system: maps host events to library events and turns library actions into
//! host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult` and
//!    `PermissionRequestResult`
//! 3. **Update**: Translate events, delegate to `handle_event`, run actions
//! 4. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Normal mode:
//! - `/` or `i`: Edit query
//! - `Tab`: Cycle search field (title, author, ISBN)
//! - `j`/`Down`, `k`/`Up`: Move selection, or scroll details
//! - `Enter`: Show details
//! - `Esc`/`h`/`Left`/`Backspace`: Back to list
//! - `r`: Toggle rating sort
//! - `e`: Toggle e-book filter
//! - `q`: Close plugin
//!
//! Editing mode:
//! - Characters: Type
//! - `Backspace`: Delete, `Ctrl+u`: Clear
//! - `Tab`: Cycle search field
//! - `Enter`: Search
//! - `Esc`: Stop editing

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
use std::collections::BTreeMap;
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
use bookscout::{handle_event, Action, Config, Event, InputMode};

#[cfg(target_arch = "wasm32")]
register_plugin!(State);

/// Host imports only resolve inside Zellij.
#[cfg(not(target_arch = "wasm32"))]
fn main() {}

/// Plugin state wrapper.
#[cfg(target_arch = "wasm32")]
struct State {
    /// Core application state from library layer.
    app: bookscout::AppState,

    /// Endpoint search URLs are built against.
    endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: bookscout::initialize(&default_config),
            endpoint: default_config.endpoint,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests `WebAccess` and
    /// subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookscout::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            endpoint = %config.endpoint,
            default_field = %config.default_field,
            theme = ?config.theme_name,
            "parsed configuration"
        );
        self.app = bookscout::initialize(&config);
        self.endpoint.clone_from(&config.endpoint);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        )
        .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status = status, body_len = body.len(), "web request result");
                Event::SearchResponse { status, body, context }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Self::handle_permission_result(permissions);
                return false;
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
                    self.execute_action(&a);
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
        bookscout::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_arch = "wasm32")]
impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') if self.app.input_mode == InputMode::Editing => {
                    Some(Event::ClearQuery)
                }
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Editing => Self::map_editing_key(key),
            InputMode::Normal => Self::map_normal_key(key),
        }
    }

    fn map_editing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::ExitEditing,
            BareKey::Tab => Event::CycleField,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('/' | 'i') => Event::FocusSearch,
            BareKey::Tab => Event::CycleField,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter | BareKey::Right | BareKey::Char('l') => Event::SelectBook,
            BareKey::Esc | BareKey::Left | BareKey::Backspace | BareKey::Char('h') => Event::Back,
            BareKey::Char('r') => Event::ToggleSort,
            BareKey::Char('e') => Event::ToggleEbookFilter,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn handle_permission_result(permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => tracing::debug!("web access granted"),
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - searches will return no results");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchBooks(request) => {
                let url = request.url(&self.endpoint);
                tracing::debug!(request_id = request.id, url = %url, "issuing web request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], request.context());
            }
        }
    }
}
