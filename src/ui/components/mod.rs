//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with the status of sort and filter toggles
//! - [`search`]: Search input box with the selected field
//! - [`table`]: Result list with TITLE, AUTHOR, RATING and E-BOOK columns
//! - [`detail`]: Labelled fields of a single book
//! - [`empty`]: Placeholder for an empty result list
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Body: table headers + rows | placeholder | detail]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;

pub use detail::render_detail;
pub use empty::render_empty_state;
pub use table::render_list;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use search::render_search_bar;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws everything except the body and returns the first body row.
///
/// Reserves 8 lines: blank, header, two borders, the 3-line search bar and
/// the footer on the last row.
pub fn render_chrome(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.max(current_row + 1);
    render_border(footer_row - 1, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    current_row
}
