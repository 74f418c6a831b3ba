//! Detail view component renderer.

use crate::ui::helpers::{pad_to, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

/// Width of the label column, colon included.
const LABEL_WIDTH: usize = 12;
const INDENT: usize = 3;

/// Renders the optional heading, then one `Label: value` line per field.
/// Arrows at the right edge mark fields scrolled out of view. Values are cut
/// at the pane edge.
pub fn render_detail(row: usize, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let last_row = rows.saturating_sub(2);
    let value_width = cols.saturating_sub(INDENT + LABEL_WIDTH + 2);

    let mut current_row = row;
    if let Some(heading) = &detail.heading {
        position_cursor(current_row + 1, INDENT + 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("{}", heading.chars().take(cols.saturating_sub(INDENT)).collect::<String>());
        print!("{}", Theme::reset());
        current_row += 3;
    }

    let first_row = current_row;
    for line in &detail.lines {
        if current_row > last_row {
            break;
        }

        position_cursor(current_row, INDENT + 1);
        print!("{}", Theme::fg(&theme.colors.detail_label_fg));
        print!("{}", pad_to(&format!("{}:", line.label), LABEL_WIDTH));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", line.value.chars().take(value_width).collect::<String>());
        print!("{}", Theme::reset());

        current_row += 1;
    }

    if detail.hidden_above > 0 {
        render_marker(first_row, "↑", theme, cols);
    }
    if detail.hidden_below > 0 && current_row > first_row {
        render_marker(current_row - 1, "↓", theme, cols);
    }
}

fn render_marker(row: usize, marker: &str, theme: &Theme, cols: usize) {
    position_cursor(row, cols.max(1));
    print!("{}{marker}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
}
