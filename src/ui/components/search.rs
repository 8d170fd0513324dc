//! Search bar component renderer.
//!
//! Renders the query input as a bordered box. The border takes the accent
//! color while the field has focus.

use crate::ui::helpers::{clip, position_cursor, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PLACEHOLDER: &str = "Search movies...";

/// Renders the 3-line search box starting at `row`.
///
/// Returns the next available row.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: matrix▏  │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };

    position_cursor(frame, row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.push(Theme::reset());

    let (text, text_color) = if search.query.is_empty() && !search.is_focused {
        (format!(" Search: {PLACEHOLDER}"), &theme.colors.text_dim)
    } else if search.is_focused {
        (format!(" Search: {}▏", search.query), &theme.colors.text_normal)
    } else {
        (format!(" Search: {}", search.query), &theme.colors.text_normal)
    };
    let text = clip(&text, inner_width);

    position_cursor(frame, row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push("│");
    frame.push(&Theme::fg(text_color));
    frame.push(&text);
    frame.pad(inner_width.saturating_sub(text_width(&text)));
    frame.push(&border);
    frame.push("│");
    frame.push(Theme::reset());

    position_cursor(frame, row + 2, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.push(&border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.push(Theme::reset());

    row + 3
}
