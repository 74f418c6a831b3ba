//! Bookscout: a Zellij plugin for searching book metadata.
//!
//! Bookscout provides:
//! - Search by title, author or ISBN against the Google Books volumes API
//! - A result list with ratings and e-book availability
//! - Client-side rating sort and e-book filter, without re-querying
//! - A detail view for a single book

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, hide_self              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, Browsing/Inspecting              │
//! │  - Sort/filter derivation, view model computation   │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────────────┐   ┌─────────────────────────┐
//! │ Fetch Layer (fetch/)  │   │ UI Layer (ui/)          │
//! │ - Request/URL/context │   │ - Rendering, theming    │
//! │ - Volume normalization│   │ - Components            │
//! └───────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Infrastructure, Observability    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Book record, search field, errors
//! - [`fetch`]: Search requests and response normalization
//! - [`infrastructure`]: Sandbox path helpers
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookscout.wasm" {
//!         default_field "author"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use bookscout::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config::from_zellij(&BTreeMap::new());
//! let mut state = initialize(&config);
//!
//! handle_event(&mut state, &Event::FocusSearch)?;
//! for c in "Dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! let Action::FetchBooks(request) = &actions[0] else { unreachable!() };
//! assert_eq!(
//!     request.url(&config.endpoint),
//!     "https://www.googleapis.com/books/v1/volumes?q=title:Dune&maxResults=10"
//! );
//! # Ok::<(), bookscout::BookscoutError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewState};
pub use domain::{Book, BookscoutError, Result, SearchField};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/bookscout.wasm" {
///     endpoint "https://www.googleapis.com/books/v1/volumes"
///     default_field "isbn"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/bookscout/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Volumes endpoint the search query is appended to.
    pub endpoint: String,

    /// Field selected when the plugin starts.
    pub default_field: SearchField,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is the sandbox host mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: fetch::DEFAULT_ENDPOINT.to_string(),
            default_field: SearchField::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional. Blank values count as unset; an unknown
    /// `default_field` is logged and ignored.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookscout::{Config, SearchField};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_field".to_string(), "Author".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_field, SearchField::Author);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let endpoint = value("endpoint")
            .map(|e| e.trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| fetch::DEFAULT_ENDPOINT.to_string());

        let default_field = value("default_field").map_or_else(SearchField::default, |raw| {
            raw.parse().unwrap_or_else(|e: BookscoutError| {
                tracing::warn!(value = %raw, error = %e, "ignoring default_field");
                SearchField::default()
            })
        });

        Self {
            endpoint,
            default_field,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Each failure is logged and falls through to the next.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::resolve_host_path(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(
                    theme_file = %path.display(),
                    error = %e,
                    "failed to load theme from file"
                ),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme"),
            }
        }

        Theme::default()
    }
}

/// Creates the initial application state from configuration.
///
/// Does not install tracing; the plugin shim calls
/// [`observability::init_tracing`] first so this function's logging is
/// captured.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        endpoint = %config.endpoint,
        default_field = %config.default_field,
        "initializing bookscout plugin"
    );

    let mut state = AppState::new(config.load_theme());
    state.field = config.default_field;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "http://localhost:8080/volumes/"),
            ("default_field", "isbn"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.endpoint, "http://localhost:8080/volumes");
        assert_eq!(config.default_field, SearchField::Isbn);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_or_blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "  "),
            ("default_field", "publisher"),
            ("theme", ""),
        ]));

        assert_eq!(config.endpoint, fetch::DEFAULT_ENDPOINT);
        assert_eq!(config.default_field, SearchField::Title);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn theme_resolution_falls_through() {
        let config = Config {
            theme_file: Some("/nonexistent/bookscout.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");

        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_applies_default_field() {
        let config = Config {
            default_field: SearchField::Author,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.field, SearchField::Author);
        assert!(state.results.is_empty());
    }
}
