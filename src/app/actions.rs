//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler stays pure: it mutates [`AppState`](crate::app::AppState)
//! and returns a `Vec<Action>` describing what the host should do. The plugin
//! shim in `main.rs` is the only place that turns these into Zellij calls.
//!
//! # Example
//!
//! ```rust
//! use bookscout::app::Action;
//! use bookscout::domain::SearchField;
//! use bookscout::fetch::SearchRequest;
//!
//! let request = SearchRequest::new(1, "Dune", SearchField::Title)?;
//! let actions = vec![Action::FetchBooks(request)];
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), bookscout::BookscoutError>(())
//! ```

use crate::fetch::SearchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one outbound search request.
    ///
    /// The response comes back later as
    /// [`Event::SearchResponse`](crate::app::Event::SearchResponse).
    FetchBooks(SearchRequest),
}
