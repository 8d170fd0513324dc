//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into a [`Frame`] and, for the
//! full-width ones, returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Logo and result count
//! - [`search`]: Query input box
//! - [`results`]: Search results (left panel)
//! - [`detail`]: Open movie with the rating control (right panel)
//! - [`watched`]: Watched summary and list (right panel)
//! - [`status`]: Loader and inline error
//! - [`footer`]: Keybinding hints or the current notice
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Results title]  │ [Watched / Movie title]
//! [Results body]   │ [Right body]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod footer;
mod header;
mod results;
mod search;
mod status;
mod watched;

use crate::ui::helpers::{position_cursor, write_line, Frame, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RightBody, UIViewModel};

use detail::render_detail;
use footer::render_footer;
use header::render_header;
use results::render_results;
use search::render_search_bar;
use watched::render_watched;

/// Renders a horizontal border line at `row`.
///
/// Returns the next available row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(frame, row, 1);
    frame.push(&Theme::fg(color));
    frame.push(&"─".repeat(cols));
    frame.push(Theme::reset());
    row + 1
}

/// Panel title with its collapse marker, e.g. ` Results [-]`.
fn render_panel_title(frame: &mut Frame, row: usize, col: usize, width: usize, title: &str, open: bool, theme: &Theme) {
    let marker = if open { "[-]" } else { "[+]" };
    position_cursor(frame, row, col);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.accent_fg));
    write_line(frame, &format!(" {title} {marker}"), width);
    frame.push(Theme::reset());
}

fn render_separator(frame: &mut Frame, row: usize, col: usize, height: usize, theme: &Theme) {
    frame.push(&Theme::fg(&theme.colors.border));
    for offset in 0..height {
        position_cursor(frame, row + offset, col);
        frame.push("│");
    }
    frame.push(Theme::reset());
}

/// Renders the full screen for `vm`.
///
/// # Line Accounting
///
/// Reserves 8 lines for chrome (header, 2 borders, search bar [3 lines],
/// panel titles, footer). The panels share the remaining rows, split at the
/// middle column.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let body_row = current_row + 1;
    let body_height = border_row.saturating_sub(body_row);

    let left_width = cols / 2;
    let left = Rect { row: body_row, col: 1, width: left_width.saturating_sub(1), height: body_height };
    let right = Rect {
        row: body_row,
        col: left_width + 2,
        width: cols.saturating_sub(left_width + 1),
        height: body_height,
    };

    let right_title = match &vm.right.body {
        RightBody::Detail(_) => "Movie",
        RightBody::Watched { .. } => "Watched",
    };
    render_panel_title(frame, current_row, left.col, left.width, "Results", vm.left.open, theme);
    render_panel_title(frame, current_row, right.col, right.width, right_title, vm.right.open, theme);
    render_separator(frame, current_row, left_width + 1, body_height + 1, theme);

    if vm.left.open {
        render_results(frame, left, &vm.left.body, theme);
    }
    if vm.right.open {
        match &vm.right.body {
            RightBody::Detail(body) => render_detail(frame, right, body, theme),
            RightBody::Watched { summary, list } => render_watched(frame, right, summary, list, theme),
        }
    }

    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
