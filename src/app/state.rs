//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of the retained result set. It separates
//! core data (the records from the latest completed search) from derived state
//! (the visible, possibly sorted and filtered sequence and the selection) so
//! that every derived view can be recomputed from scratch at any time.
//!
//! # State Components
//!
//! - **Results**: Records from the latest completed search, in upstream order
//! - **Visible**: `results` after the sort and e-book toggles
//! - **Selection**: Cursor position within `visible`
//! - **View State**: Browsing (list) or Inspecting (detail)
//! - **Input Mode**: Whether keys edit the query
//! - **Query / Field**: The search bar contents
//!
//! # Example
//!
//! ```rust
//! use bookscout::app::AppState;
//! use bookscout::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! ```

use std::rc::Rc;

use fuzzy_matcher::skim::SkimMatcherV2;

use super::modes::{InputMode, ViewState};
use super::results::derive_visible;
use crate::domain::{Book, Result, SearchField};
use crate::fetch::SearchRequest;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    title_column_width, DetailLine, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
    SearchBarInfo, UIViewModel, ViewBody, AUTHOR_COLUMN_WIDTH, NO_BOOKS_MESSAGE,
};

/// Rows taken by header, borders, search bar, column headings and footer.
const LIST_CHROME_ROWS: usize = 9;

/// Rows taken by everything except the detail body.
const DETAIL_CHROME_ROWS: usize = 8;

/// Heading plus the spacer under it.
const DETAIL_HEADING_ROWS: usize = 2;

/// Labelled fields in the detail view.
const DETAIL_FIELD_COUNT: usize = 7;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Records from the latest completed search, in upstream order.
    ///
    /// Replaced wholesale when a response arrives; never reordered in place.
    pub results: Vec<Rc<Book>>,

    /// `results` after the sort and filter toggles. Recomputed by
    /// `refresh_visible()`.
    pub visible: Vec<Rc<Book>>,

    /// Zero-based index into `visible`.
    pub selected_index: usize,

    /// Record shown while Inspecting.
    pub inspected: Option<Rc<Book>>,

    /// First detail field shown when the pane is too short for all of them.
    pub detail_scroll: usize,

    pub view_state: ViewState,
    pub input_mode: InputMode,

    /// Query text as typed.
    pub query: String,

    /// Field the next search targets.
    pub field: SearchField,

    /// Order `visible` by rating, highest first.
    pub sort_by_rating: bool,

    /// Keep only records with e-book access in `visible`.
    pub ebook_only: bool,

    /// Request whose response produced `results`, if any.
    pub last_search: Option<SearchRequest>,

    /// Searches submitted whose responses have not arrived yet.
    pub in_flight: usize,

    /// Number given to the most recently submitted request.
    pub latest_request_id: u64,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state: no results, Browsing, Normal input, title search.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            results: vec![],
            visible: vec![],
            selected_index: 0,
            inspected: None,
            detail_scroll: 0,
            view_state: ViewState::Browsing,
            input_mode: InputMode::Normal,
            query: String::new(),
            field: SearchField::default(),
            sort_by_rating: false,
            ebook_only: false,
            last_search: None,
            in_flight: 0,
            latest_request_id: 0,
            theme,
        }
    }

    /// Validates the typed query and describes the request to issue.
    ///
    /// On success the request counter advances and the request counts as in
    /// flight. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`BookscoutError::EmptyQuery`](crate::BookscoutError::EmptyQuery)
    /// for an empty or whitespace-only query.
    pub fn begin_search(&mut self) -> Result<SearchRequest> {
        let request = SearchRequest::new(self.latest_request_id + 1, &self.query, self.field)?;
        self.latest_request_id = request.id;
        self.in_flight += 1;
        Ok(request)
    }

    /// Replaces the retained result set with a completed search's records.
    ///
    /// Responses are applied in arrival order without fencing, so a slow
    /// response to an older request replaces the results of a newer one.
    pub fn apply_search_results(&mut self, request: Option<SearchRequest>, books: Vec<Book>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if let Some(req) = &request {
            if req.id < self.latest_request_id {
                tracing::debug!(
                    request_id = req.id,
                    latest_request_id = self.latest_request_id,
                    query = %req.query,
                    "older response replacing results of a newer search"
                );
            }
        }

        self.results = books.into_iter().map(Rc::new).collect();
        self.last_search = request;
        self.selected_index = 0;
        self.show_list();
        self.refresh_visible();
    }

    /// Recomputes `visible` from `results` and the active toggles, clamping
    /// the selection.
    pub fn refresh_visible(&mut self) {
        let _span = tracing::debug_span!(
            "refresh_visible",
            total_results = self.results.len(),
            sort_by_rating = self.sort_by_rating,
            ebook_only = self.ebook_only
        )
        .entered();

        self.visible = derive_visible(&self.results, self.sort_by_rating, self.ebook_only);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::debug!(visible_count = self.visible.len(), "visible results recomputed");
    }

    /// Flips rating order and returns to the list.
    pub fn toggle_sort(&mut self) {
        self.sort_by_rating = !self.sort_by_rating;
        self.selected_index = 0;
        self.show_list();
        self.refresh_visible();
    }

    /// Flips the e-book filter and returns to the list.
    pub fn toggle_ebook_filter(&mut self) {
        self.ebook_only = !self.ebook_only;
        self.selected_index = 0;
        self.show_list();
        self.refresh_visible();
    }

    /// Opens the highlighted record. Only valid while Browsing.
    ///
    /// Returns `false` if nothing changed.
    pub fn inspect_selected(&mut self) -> bool {
        if self.view_state != ViewState::Browsing {
            return false;
        }

        let Some(book) = self.selected_book().cloned() else {
            return false;
        };

        self.inspected = Some(book);
        self.detail_scroll = 0;
        self.view_state = ViewState::Inspecting;
        true
    }

    /// Scrolls the detail fields down by one. Returns `false` at the last
    /// field or while Browsing.
    pub fn scroll_detail_down(&mut self) -> bool {
        if self.view_state != ViewState::Inspecting || self.detail_scroll + 1 >= DETAIL_FIELD_COUNT {
            return false;
        }
        self.detail_scroll += 1;
        true
    }

    /// Scrolls the detail fields up by one. Returns `false` at the top or
    /// while Browsing.
    pub fn scroll_detail_up(&mut self) -> bool {
        if self.view_state != ViewState::Inspecting || self.detail_scroll == 0 {
            return false;
        }
        self.detail_scroll -= 1;
        true
    }

    /// Returns from detail to list. Returns `false` if already Browsing.
    pub fn back_to_list(&mut self) -> bool {
        if self.view_state == ViewState::Browsing {
            return false;
        }
        self.show_list();
        true
    }

    fn show_list(&mut self) {
        self.view_state = ViewState::Browsing;
        self.inspected = None;
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Highlighted record in the visible list, if any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Rc<Book>> {
        self.visible.get(self.selected_index)
    }

    /// Computes a renderable view model from current state and pane size.
    ///
    /// The body is the detail view while Inspecting, otherwise the list, or the
    /// placeholder when the visible list is empty.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match (&self.view_state, &self.inspected) {
            (ViewState::Inspecting, Some(book)) => ViewBody::Detail(self.compute_detail(book, rows)),
            _ if self.visible.is_empty() => ViewBody::Placeholder(self.compute_empty_state()),
            _ => self.compute_list(rows, cols),
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body,
            footer: self.compute_footer(),
        }
    }

    /// Windows the visible list around the selection.
    fn compute_list(&self, rows: usize, cols: usize) -> ViewBody {
        let available_rows = rows.saturating_sub(LIST_CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.visible.len());

        if visible_end - visible_start < available_rows && self.visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = title_column_width(cols);
        let matcher = self.highlight_query().map(|q| (SkimMatcherV2::default(), q));

        let items = self.visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                let title = truncate(&book.title, title_width);
                let highlight_ranges = matcher.as_ref().map_or_else(Vec::new, |(m, query)| {
                    // Matches never reach into the `...` suffix.
                    let limit = if title == book.title {
                        title.chars().count()
                    } else {
                        title.chars().count().saturating_sub(3)
                    };
                    compute_highlight_ranges(m, &book.title, query)
                        .into_iter()
                        .filter(|&(start, _)| start < limit)
                        .map(|(start, end)| (start, end.min(limit)))
                        .collect()
                });

                DisplayItem {
                    title,
                    author: truncate(&book.author_name, AUTHOR_COLUMN_WIDTH - 2),
                    rating: book.rating_label(),
                    is_ebook: book.is_ebook(),
                    is_selected: visible_start + offset == self.selected_index,
                    highlight_ranges,
                }
            })
            .collect();

        ViewBody::List {
            items,
            selected_index: self.selected_index - visible_start,
        }
    }

    /// Query to highlight in titles: the one that produced the shown results,
    /// and only for title searches.
    fn highlight_query(&self) -> Option<&str> {
        self.last_search
            .as_ref()
            .filter(|req| req.field == SearchField::Title)
            .map(|req| req.query.as_str())
    }

    /// Fits the detail fields into the body rows, scrolling by
    /// `detail_scroll` when they do not all fit.
    fn compute_detail(&self, book: &Book, rows: usize) -> DetailView {
        let lines = detail_lines(book);
        let available = rows.saturating_sub(DETAIL_CHROME_ROWS).max(1);

        if available >= lines.len() + DETAIL_HEADING_ROWS {
            return DetailView {
                heading: Some(book.title.clone()),
                lines,
                hidden_above: 0,
                hidden_below: 0,
            };
        }

        let offset = self.detail_scroll.min(lines.len().saturating_sub(available));
        let hidden_below = lines.len().saturating_sub(offset + available);

        DetailView {
            heading: None,
            lines: lines.into_iter().skip(offset).take(available).collect(),
            hidden_above: offset,
            hidden_below,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let subtitle = if self.in_flight > 0 {
            "Searching..."
        } else if self.last_search.is_none() {
            "Press / to search by title, author or ISBN"
        } else if self.ebook_only && !self.results.is_empty() {
            "No e-books in these results. Press e to show all"
        } else {
            "Try another query"
        };

        EmptyState {
            message: NO_BOOKS_MESSAGE.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.last_search {
            Some(req) => format!(" Bookscout: {}:{} ({}) ", req.field, req.query, self.visible.len()),
            None => " Bookscout ".to_string(),
        };

        let mut flags = vec![];
        if self.sort_by_rating {
            flags.push("sorted by rating");
        }
        if self.ebook_only {
            flags.push("e-books only");
        }
        if self.in_flight > 0 {
            flags.push("searching...");
        }

        HeaderInfo {
            title,
            status: flags.join("  |  "),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_state) {
            (InputMode::Editing, _) => {
                "Enter: search  Tab: field  Ctrl+u: clear  ESC: done"
            }
            (InputMode::Normal, ViewState::Browsing) => {
                "/: search  j/k: navigate  Enter: details  r: sort  e: e-books  Tab: field  q: quit"
            }
            (InputMode::Normal, ViewState::Inspecting) => {
                "ESC/h: back  j/k: scroll  /: search  r: sort  e: e-books  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.query.clone(),
            field_label: self.field.label().to_string(),
            is_editing: self.input_mode == InputMode::Editing,
        }
    }
}

fn detail_lines(book: &Book) -> Vec<DetailLine> {
    vec![
        DetailLine { label: "Title", value: book.title.clone() },
        DetailLine { label: "Author", value: book.author_name.clone() },
        DetailLine { label: "Cover", value: book.cover_label().to_string() },
        DetailLine { label: "Published", value: book.first_publish_year.clone() },
        DetailLine { label: "Rating", value: book.rating_label() },
        DetailLine { label: "E-book", value: book.ebook_available.clone() },
        DetailLine { label: "ISBN", value: book.isbn.clone() },
    ]
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Coalesces fuzzy match positions into contiguous `(start, end)` ranges.
fn compute_highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EBOOK_AVAILABLE, EBOOK_UNAVAILABLE, UNKNOWN};

    fn book(title: &str, rating_value: f64, ebook: bool) -> Book {
        Book {
            title: title.to_string(),
            author_name: "Someone".to_string(),
            isbn: UNKNOWN.to_string(),
            cover_image_url: String::new(),
            ebook_available: if ebook { EBOOK_AVAILABLE } else { EBOOK_UNAVAILABLE }.to_string(),
            first_publish_year: UNKNOWN.to_string(),
            rating_value,
        }
    }

    fn state_with(books: Vec<Book>) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.apply_search_results(None, books);
        state
    }

    fn list_titles(vm: &UIViewModel) -> Vec<String> {
        match &vm.body {
            ViewBody::List { items, .. } => items.iter().map(|i| i.title.clone()).collect(),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn empty_results_render_placeholder_only() {
        let state = state_with(vec![]);

        match state.compute_viewmodel(24, 80).body {
            ViewBody::Placeholder(empty) => assert_eq!(empty.message, "No books available."),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn startup_state_is_placeholder() {
        let state = AppState::new(Theme::default());
        assert!(matches!(state.compute_viewmodel(24, 80).body, ViewBody::Placeholder(_)));
    }

    #[test]
    fn begin_search_rejects_blank_query_without_side_effects() {
        let mut state = AppState::new(Theme::default());
        state.query = "   ".to_string();

        assert!(state.begin_search().is_err());
        assert_eq!(state.in_flight, 0);
        assert_eq!(state.latest_request_id, 0);
    }

    #[test]
    fn begin_search_numbers_requests() {
        let mut state = AppState::new(Theme::default());
        state.query = "Dune".to_string();

        assert_eq!(state.begin_search().unwrap().id, 1);
        assert_eq!(state.begin_search().unwrap().id, 2);
        assert_eq!(state.in_flight, 2);
    }

    #[test]
    fn late_response_still_replaces_results() {
        let mut state = AppState::new(Theme::default());
        state.query = "first".to_string();
        let first = state.begin_search().unwrap();
        state.query = "second".to_string();
        let second = state.begin_search().unwrap();

        state.apply_search_results(Some(second), vec![book("newer", 1.0, false)]);
        state.apply_search_results(Some(first), vec![book("older", 1.0, false)]);

        assert_eq!(state.results[0].title, "older");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn inspect_requires_browsing_and_a_selection() {
        let mut empty = state_with(vec![]);
        assert!(!empty.inspect_selected());

        let mut state = state_with(vec![book("a", 1.0, false), book("b", 2.0, false)]);
        state.move_selection_down();
        assert!(state.inspect_selected());
        assert_eq!(state.view_state, ViewState::Inspecting);
        assert_eq!(state.inspected.as_ref().unwrap().title, "b");

        assert!(!state.inspect_selected());
        assert!(state.back_to_list());
        assert!(!state.back_to_list());
    }

    #[test]
    fn toggles_return_to_browsing() {
        let mut state = state_with(vec![book("a", 1.0, true)]);
        state.inspect_selected();

        state.toggle_sort();
        assert_eq!(state.view_state, ViewState::Browsing);
        assert!(state.inspected.is_none());

        state.inspect_selected();
        state.toggle_ebook_filter();
        assert_eq!(state.view_state, ViewState::Browsing);
    }

    #[test]
    fn filtering_everything_out_shows_placeholder_hint() {
        let mut state = state_with(vec![book("paper", 1.0, false)]);
        state.last_search = Some(SearchRequest::new(1, "paper", SearchField::Title).unwrap());
        state.toggle_ebook_filter();

        match state.compute_viewmodel(24, 80).body {
            ViewBody::Placeholder(empty) => {
                assert_eq!(empty.message, NO_BOOKS_MESSAGE);
                assert!(empty.subtitle.contains("e-books"));
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn list_windows_around_selection() {
        let books = (0..10).map(|i| book(&format!("book {i}"), 0.0, false)).collect();
        let mut state = state_with(books);
        for _ in 0..8 {
            state.move_selection_down();
        }

        // 14 rows leave 5 for the list.
        let vm = state.compute_viewmodel(14, 80);
        assert_eq!(list_titles(&vm), vec!["book 5", "book 6", "book 7", "book 8", "book 9"]);
        match vm.body {
            ViewBody::List { selected_index, items } => {
                assert_eq!(selected_index, 3);
                assert!(items[3].is_selected);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn long_titles_are_truncated_by_characters() {
        let state = state_with(vec![book(&"é".repeat(200), 0.0, false)]);
        let vm = state.compute_viewmodel(24, 60);

        let title = &list_titles(&vm)[0];
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), title_column_width(60));
    }

    #[test]
    fn title_matches_are_highlighted_for_title_searches() {
        let mut state = state_with(vec![book("Dune Messiah", 4.0, false)]);
        state.last_search = Some(SearchRequest::new(1, "dune", SearchField::Title).unwrap());

        match state.compute_viewmodel(24, 80).body {
            ViewBody::List { items, .. } => assert_eq!(items[0].highlight_ranges, vec![(0, 4)]),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn highlights_stop_before_truncation_marker() {
        let mut state = state_with(vec![book("abcdefghijklmnopqrstuvwxyz", 0.0, false)]);
        state.last_search = Some(SearchRequest::new(1, "mno", SearchField::Title).unwrap());

        match state.compute_viewmodel(24, 60).body {
            ViewBody::List { items, .. } => {
                assert_eq!(items[0].title, "abcdefghijkl...");
                assert!(items[0].highlight_ranges.is_empty());
            }
            other => panic!("expected list, got {other:?}"),
        }

        state.last_search = Some(SearchRequest::new(2, "jklm", SearchField::Title).unwrap());
        match state.compute_viewmodel(24, 60).body {
            ViewBody::List { items, .. } => assert_eq!(items[0].highlight_ranges, vec![(9, 12)]),
            other => panic!("expected list, got {other:?}"),
        }
    }

    fn detail_labels(vm: &UIViewModel) -> Vec<&'static str> {
        match &vm.body {
            ViewBody::Detail(detail) => detail.lines.iter().map(|l| l.label).collect(),
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn tall_pane_shows_heading_and_every_field() {
        let mut state = state_with(vec![book("Dune", 4.5, true)]);
        state.inspect_selected();

        match state.compute_viewmodel(24, 80).body {
            ViewBody::Detail(detail) => {
                assert_eq!(detail.heading.as_deref(), Some("Dune"));
                assert_eq!(detail.lines.len(), 7);
                assert_eq!((detail.hidden_above, detail.hidden_below), (0, 0));
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn short_pane_drops_heading_to_fit_every_field() {
        let mut state = state_with(vec![book("Dune", 4.5, true)]);
        state.inspect_selected();

        let vm = state.compute_viewmodel(15, 80);
        assert_eq!(
            detail_labels(&vm),
            vec!["Title", "Author", "Cover", "Published", "Rating", "E-book", "ISBN"]
        );
        let ViewBody::Detail(detail) = vm.body else { unreachable!() };
        assert_eq!(detail.heading, None);
    }

    #[test]
    fn tiny_pane_scrolls_detail_fields() {
        let mut state = state_with(vec![book("Dune", 4.5, true)]);
        state.inspect_selected();

        assert_eq!(detail_labels(&state.compute_viewmodel(11, 80)), vec!["Title", "Author", "Cover"]);

        for _ in 0..10 {
            state.scroll_detail_down();
        }
        assert_eq!(state.detail_scroll, 6);
        let vm = state.compute_viewmodel(11, 80);
        assert_eq!(detail_labels(&vm), vec!["Rating", "E-book", "ISBN"]);
        let ViewBody::Detail(detail) = vm.body else { unreachable!() };
        assert_eq!((detail.hidden_above, detail.hidden_below), (4, 0));

        assert!(state.scroll_detail_up());
        assert_eq!(state.detail_scroll, 5);

        state.back_to_list();
        assert!(!state.scroll_detail_down());
        state.inspect_selected();
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn header_reflects_toggles() {
        let mut state = state_with(vec![book("a", 1.0, true)]);
        state.toggle_sort();
        state.toggle_ebook_filter();

        let header = state.compute_viewmodel(24, 80).header;
        assert!(header.status.contains("sorted by rating"));
        assert!(header.status.contains("e-books only"));
    }
}
