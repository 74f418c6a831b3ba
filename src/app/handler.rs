//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point that changes [`AppState`]. It
//! returns whether a re-render is needed and the side effects the plugin shim
//! should run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SelectBook`, `Back`
//! - **Query editing**: `FocusSearch`, `ExitEditing`, `Char`, `Backspace`,
//!   `ClearQuery`, `CycleField`, `Submit`
//! - **Derived views**: `ToggleSort`, `ToggleEbookFilter`
//! - **Network**: `SearchResponse`
//!
//! # Example
//!
//! ```rust
//! use bookscout::app::{handle_event, Action, AppState, Event};
//! use bookscout::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! handle_event(&mut state, &Event::FocusSearch)?;
//! for c in "Dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions[..], [Action::FetchBooks(_)]));
//! # Ok::<(), bookscout::BookscoutError>(())
//! ```

use std::collections::BTreeMap;

use super::modes::{InputMode, ViewState};
use crate::app::{Action, AppState};
use crate::domain::{BookscoutError, Result};
use crate::fetch::{books_from_response, SearchRequest, TraceContext};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Events triggered by user input or completed web requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top), or
    /// scrolls the detail fields while Inspecting.
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom), or
    /// scrolls the detail fields while Inspecting.
    KeyUp,
    /// Opens the detail view for the highlighted record.
    SelectBook,
    /// Returns from the detail view to the list.
    Back,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Starts editing the query.
    FocusSearch,
    /// Stops editing; the query text is kept.
    ExitEditing,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Empties the query.
    ClearQuery,
    /// Switches to the next search field.
    CycleField,
    /// Submits the query as a new search.
    Submit,

    /// Flips rating order of the visible list.
    ToggleSort,
    /// Flips the e-book-only filter.
    ToggleEbookFilter,

    /// A web request finished.
    ///
    /// Carries the context map given to `web_request`, which identifies the
    /// search it answers. Responses without our marker are ignored.
    SearchResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions may be empty when the event has no
/// side effects.
///
/// # Errors
///
/// Currently every event is handled; the `Result` keeps the shim's error path
/// in place for state methods that can fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::KeyDown => {
            if state.view_state == ViewState::Inspecting {
                return Ok((state.scroll_detail_down(), vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.view_state == ViewState::Inspecting {
                return Ok((state.scroll_detail_up(), vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::SelectBook => {
            if !state.inspect_selected() {
                tracing::debug!(view_state = ?state.view_state, "nothing to inspect");
                return Ok((false, vec![]));
            }

            if let Some(book) = &state.inspected {
                tracing::debug!(title = %book.title, isbn = %book.isbn, "inspecting book");
            }
            Ok((true, vec![]))
        }
        Event::Back => Ok((state.back_to_list(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::FocusSearch => {
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::ExitEditing => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, char = %c, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            Ok((state.query.pop().is_some(), vec![]))
        }
        Event::ClearQuery => {
            if state.input_mode != InputMode::Editing || state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.query.clear();
            Ok((true, vec![]))
        }
        Event::CycleField => {
            state.field = state.field.next();
            tracing::debug!(field = %state.field, "search field changed");
            Ok((true, vec![]))
        }
        Event::Submit => match state.begin_search() {
            Ok(request) => {
                tracing::info!(
                    request_id = request.id,
                    query = %request.query,
                    field = %request.field,
                    "submitting search"
                );
                state.input_mode = InputMode::Normal;
                Ok((true, vec![Action::FetchBooks(request)]))
            }
            Err(BookscoutError::EmptyQuery) => {
                tracing::debug!("ignoring empty search");
                Ok((false, vec![]))
            }
            Err(e) => Err(e),
        },

        Event::ToggleSort => {
            state.toggle_sort();
            tracing::debug!(sort_by_rating = state.sort_by_rating, "rating sort toggled");
            Ok((true, vec![]))
        }
        Event::ToggleEbookFilter => {
            state.toggle_ebook_filter();
            tracing::debug!(ebook_only = state.ebook_only, "e-book filter toggled");
            Ok((true, vec![]))
        }

        Event::SearchResponse { status, body, context } => {
            let Some(request) = SearchRequest::from_context(context) else {
                tracing::debug!(status = status, "ignoring unrelated web response");
                return Ok((false, vec![]));
            };

            let response_span = tracing::info_span!(
                "search_response",
                request_id = request.id,
                query = %request.query,
                field = %request.field,
                status = status,
                body_len = body.len()
            );
            // Parent the response span to the span that submitted the search.
            if let Some(cx) = request.trace_context.as_ref().and_then(TraceContext::remote_context) {
                response_span.set_parent(cx);
            }
            let _entered = response_span.entered();

            let books = books_from_response(*status, body);
            tracing::info!(book_count = books.len(), "search completed");

            state.apply_search_results(Some(request), books);
            Ok((true, vec![]))
        }
    }
}

/// Short event name for span fields; avoids dumping response bodies.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::SelectBook => "SelectBook",
        Event::Back => "Back",
        Event::CloseFocus => "CloseFocus",
        Event::FocusSearch => "FocusSearch",
        Event::ExitEditing => "ExitEditing",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ClearQuery => "ClearQuery",
        Event::CycleField => "CycleField",
        Event::Submit => "Submit",
        Event::ToggleSort => "ToggleSort",
        Event::ToggleEbookFilter => "ToggleEbookFilter",
        Event::SearchResponse { .. } => "SearchResponse",
    }
}
