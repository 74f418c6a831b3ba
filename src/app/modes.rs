//! View and input mode state types for the application.
//!
//! Two independent axes:
//!
//! - [`ViewState`] decides which body is on screen: the result list
//!   (**Browsing**) or one record's details (**Inspecting**). Exactly one is
//!   visible at a time.
//! - [`InputMode`] decides how keys are read: as commands (**Normal**) or as
//!   text typed into the search bar (**Editing**).
//!
//! # Transitions
//!
//! ```text
//!              SelectBook (non-empty list)
//!   Browsing ───────────────────────────────▶ Inspecting
//!      ▲                                         │
//!      └── Back | SearchResponse | ToggleSort ───┘
//!                | ToggleEbookFilter
//! ```

/// Which body the plugin shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Result list is visible; selection keys move the cursor.
    #[default]
    Browsing,

    /// Detail view of a single record is visible.
    Inspecting,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands: navigate, select, sort, filter, quit.
    #[default]
    Normal,

    /// Keys edit the search query; Enter submits, Esc returns to Normal.
    Editing,
}
