//! Table component renderer.
//!
//! Renders the visible books as a four-column table. Rows are padded to the
//! full pane width so the selection background spans the whole line.

use crate::ui::helpers::{self, char_len, pad_to, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    title_column_width, DisplayItem, AUTHOR_COLUMN_WIDTH, EBOOK_COLUMN_WIDTH, RATING_COLUMN_WIDTH,
};

/// Renders column headings followed by one row per item.
pub fn render_list(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) {
    let title_width = title_column_width(cols);
    let mut current_row = render_table_headers(row, theme, title_width);

    for item in items {
        current_row = render_table_row(current_row, item, theme, cols, title_width);
    }
}

fn render_table_headers(row: usize, theme: &Theme, title_width: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<tw$}  {:<aw$}{:<rw$}{:<ew$}",
        "TITLE",
        "AUTHOR",
        "RATING",
        "E-BOOK",
        tw = title_width,
        aw = AUTHOR_COLUMN_WIDTH,
        rw = RATING_COLUMN_WIDTH,
        ew = EBOOK_COLUMN_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Styling precedence: selection colors, then match highlights, then the
/// per-column colors.
fn render_table_row(
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    cols: usize,
    title_width: usize,
) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    helpers::render_highlighted_text(
        &item.title,
        &item.highlight_ranges,
        theme,
        item.is_selected,
        &base,
    );
    print!("{}", " ".repeat(title_width.saturating_sub(char_len(&item.title)) + 2));

    print!("{}", pad_to(&item.author, AUTHOR_COLUMN_WIDTH));

    column(&pad_to(&item.rating, RATING_COLUMN_WIDTH), &theme.colors.rating_fg, item.is_selected, &base);

    let ebook = if item.is_ebook { "yes" } else { "no" };
    column(&pad_to(ebook, EBOOK_COLUMN_WIDTH), &theme.colors.ebook_fg, item.is_selected, &base);

    let line_len = title_width + 2 + AUTHOR_COLUMN_WIDTH + RATING_COLUMN_WIDTH + EBOOK_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Prints a cell in `color`, or in the selection colors on the selected row.
fn column(text: &str, color: &str, is_selected: bool, base: &str) {
    if is_selected {
        print!("{text}");
    } else {
        print!("{}{text}{base}", Theme::fg(color));
    }
}
