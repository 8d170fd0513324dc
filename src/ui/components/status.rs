//! Loader and inline error renderers shared by both panels.

use crate::ui::helpers::{position_cursor, wrap, Frame, Rect};
use crate::ui::theme::Theme;

const LOADING: &str = "Loading...";

/// Renders the loading indicator on the first line of `area`.
pub fn render_loader(frame: &mut Frame, area: Rect, theme: &Theme) {
    render_centered(frame, area, &[LOADING.to_string()], &Theme::fg(&theme.colors.text_dim));
}

/// Renders an inline error, wrapped to the width of `area`.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = wrap(&format!("⛔ {message}"), area.width.saturating_sub(2));
    render_centered(frame, area, &lines, &Theme::fg(&theme.colors.error_fg));
}

fn render_centered(frame: &mut Frame, area: Rect, lines: &[String], color: &str) {
    for (offset, line) in lines.iter().take(area.height).enumerate() {
        let len = line.chars().count().min(area.width);
        let padding = area.width.saturating_sub(len) / 2;
        position_cursor(frame, area.row + offset, area.col + padding);
        frame.push(color);
        frame.push(&line.chars().take(area.width).collect::<String>());
        frame.push(Theme::reset());
    }
}
