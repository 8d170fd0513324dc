//! Footer component renderer.

use crate::ui::helpers::{clip, position_cursor, text_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row`, centered and dimmed.
///
/// A notice, when present, replaces the keybinding hints and is drawn in the
/// error color. Text wider than the terminal is truncated.
///
/// Returns the next available row.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match &footer.notice {
        Some(notice) => (clip(notice, cols), &theme.colors.error_fg),
        None => (clip(&footer.keybindings, cols), &theme.colors.text_dim),
    };

    let text_len = text_width(&text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(frame, row, 1);
    frame.push(&Theme::fg(color));
    frame.pad(padding);
    frame.push(&text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.push(Theme::reset());
    row + 1
}
