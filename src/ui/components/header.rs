//! Header component renderer.

use crate::ui::helpers::{center_padding, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title, with the toggle status right-aligned when it
/// fits, and returns the next row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = char_len(&header.title);
    let padding = center_padding(title_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", Theme::reset());

    let used = padding + title_len;
    let status_len = char_len(&header.status);
    let remaining = cols.saturating_sub(used);

    if status_len > 0 && status_len + 2 <= remaining {
        print!("{}", " ".repeat(remaining - status_len - 1));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", header.status);
        print!(" {}", Theme::reset());
    } else {
        print!("{}", " ".repeat(remaining));
    }

    row + 1
}
