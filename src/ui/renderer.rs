//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI Output
//! ```
//!
//! The chrome (header, search bar, footer) is always drawn; the body between
//! them is the list, the placeholder, or the detail view.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{UIViewModel, ViewBody};

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let body_row = components::render_chrome(vm, theme, cols, rows);

    match &vm.body {
        ViewBody::List { items, .. } => components::render_list(body_row, items, theme, cols),
        ViewBody::Placeholder(empty) => components::render_empty_state(body_row, empty, theme, cols),
        ViewBody::Detail(detail) => components::render_detail(body_row, detail, theme, cols, rows),
    }
}
