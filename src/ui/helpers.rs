//! Shared rendering utilities.
//!
//! All widths here are in characters, never bytes, so titles with accents or
//! CJK text pad and highlight correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in characters.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// `text` followed by spaces up to `width` characters.
#[must_use]
pub fn pad_to(text: &str, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(char_len(text))))
}

/// Left padding that centers `text_len` characters in `cols`.
#[must_use]
pub const fn center_padding(text_len: usize, cols: usize) -> usize {
    cols.saturating_sub(text_len) / 2
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting is
/// skipped on the selected row so it does not fight the selection colors.
/// After each highlighted section `restore` is printed to return to the row's
/// base style.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    print!("{}", split_highlights(text, ranges, |section| {
        format!(
            "{}{}{section}{}{restore}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
        )
    }));
}

/// Rebuilds `text`, passing each highlighted section through `style`.
fn split_highlights(text: &str, ranges: &[(usize, usize)], style: impl Fn(&str) -> String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);
        let section: String = chars[start..end].iter().collect();
        out.push_str(&style(&section));
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
