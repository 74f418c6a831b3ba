//! View model types representing renderable UI state.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel) and
//! consumed by the renderer. They hold display-ready strings only, which is
//! what makes list/detail behavior testable without a terminal.
//!
//! The body is an enum so list and detail can never be visible together.

/// Literal placeholder row for an empty result list.
pub const NO_BOOKS_MESSAGE: &str = "No books available.";

/// Fixed column widths of the result table, gaps included.
pub const AUTHOR_COLUMN_WIDTH: usize = 28;
pub const RATING_COLUMN_WIDTH: usize = 8;
pub const EBOOK_COLUMN_WIDTH: usize = 7;
const TITLE_GAP: usize = 2;
const MIN_TITLE_WIDTH: usize = 12;

/// Width left for titles after the fixed columns.
#[must_use]
pub const fn title_column_width(cols: usize) -> usize {
    let width = cols.saturating_sub(
        AUTHOR_COLUMN_WIDTH + RATING_COLUMN_WIDTH + EBOOK_COLUMN_WIDTH + TITLE_GAP,
    );
    if width < MIN_TITLE_WIDTH {
        MIN_TITLE_WIDTH
    } else {
        width
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: ViewBody,
    pub footer: FooterInfo,
}

/// The one body that is visible.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Non-empty result list, windowed to the pane height.
    List {
        items: Vec<DisplayItem>,
        /// Index of the highlighted row within `items`.
        selected_index: usize,
    },

    /// Empty result list.
    Placeholder(EmptyState),

    /// Details of a single record.
    Detail(DetailView),
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, truncated to the column width.
    pub title: String,
    /// Author display string, truncated to the column width.
    pub author: String,
    pub rating: String,
    pub is_ebook: bool,
    pub is_selected: bool,

    /// Character ranges of `title` to highlight as query matches.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail view of one record, fitted to the pane height.
///
/// When every field fits with room to spare, the title is repeated as a
/// heading. Otherwise the heading is dropped and `lines` is the scrolled
/// window of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub heading: Option<String>,
    /// Labelled fields in display order.
    pub lines: Vec<DetailLine>,
    /// Fields scrolled off above `lines`.
    pub hidden_above: usize,
    /// Fields cut off below `lines`.
    pub hidden_below: usize,
}

/// A `label: value` row in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// Header bar: title plus a status line describing active toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub status: String,
}

/// Footer keybinding hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Always [`NO_BOOKS_MESSAGE`].
    pub message: String,
    /// Secondary hint line.
    pub subtitle: String,
}

/// Search bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Query text as currently typed.
    pub query: String,
    /// Label of the selected search field (`Title`, `Author`, `ISBN`).
    pub field_label: String,
    /// Whether keys currently edit the query.
    pub is_editing: bool,
}
