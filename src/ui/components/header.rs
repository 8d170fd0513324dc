//! Header component renderer.
//!
//! Renders the title bar: the logo on the left and the result count on the
//! right, on the theme's header colors.

use crate::ui::helpers::{position_cursor, text_width, write_line, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` across the full width.
///
/// Returns the next available row.
///
/// # Layout
///
/// ```text
///  🍿 usePopcorn                                      Found 10 results
/// ```
///
/// The count is dropped when both do not fit.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = text_width(&header.title);
    let count_len = text_width(&header.result_count);

    position_cursor(frame, row, 1);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.push(&Theme::bg(bg));
    }

    if title_len + count_len + 1 < cols {
        frame.push(&header.title);
        frame.pad(cols - title_len - count_len - 1);
        frame.push(&header.result_count);
        frame.pad(1);
    } else {
        write_line(frame, &header.title, cols);
    }

    frame.push(Theme::reset());
    row + 1
}
