//! Results list renderer for the left panel.

use crate::ui::components::status::{render_error, render_loader};
use crate::ui::helpers::{self, clip, position_cursor, text_width, Frame, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListView, ResultItem, ResultsBody};

/// Width reserved on the right for the release year.
const YEAR_WIDTH: usize = 6;

/// Renders the left panel body into `area`.
pub fn render_results(frame: &mut Frame, area: Rect, body: &ResultsBody, theme: &Theme) {
    match body {
        ResultsBody::Loading => render_loader(frame, area, theme),
        ResultsBody::Error(message) => render_error(frame, area, message, theme),
        ResultsBody::List(list) => render_result_rows(frame, area, list, theme),
    }
}

fn render_result_rows(frame: &mut Frame, area: Rect, list: &ListView<ResultItem>, theme: &Theme) {
    for (offset, item) in list.items.iter().take(area.height).enumerate() {
        render_result_row(frame, area.row + offset, area, item, list.is_active, theme);
    }
}

/// One result line.
///
/// ```text
/// ▸ The Matrix                                 1999
/// ```
///
/// The marker flags the movie shown in the detail view. Selection colors are
/// only drawn while the list is active.
fn render_result_row(frame: &mut Frame, row: usize, area: Rect, item: &ResultItem, is_active: bool, theme: &Theme) {
    let highlighted = item.is_selected && is_active;
    let title_width = area.width.saturating_sub(YEAR_WIDTH + 2);
    let title = clip(&item.title, title_width);

    position_cursor(frame, row, area.col);
    if highlighted {
        frame.push(&Theme::fg(&theme.colors.selection_fg));
        frame.push(&Theme::bg(&theme.colors.selection_bg));
    } else {
        frame.push(&Theme::fg(&theme.colors.text_normal));
    }

    if item.is_open {
        frame.push(&Theme::fg(&theme.colors.accent_fg));
        frame.push("▸ ");
        frame.push(&Theme::fg(if highlighted {
            &theme.colors.selection_fg
        } else {
            &theme.colors.text_normal
        }));
    } else {
        frame.pad(2);
    }

    helpers::render_highlighted_text(frame, &title, &item.highlight_ranges, theme, highlighted);
    frame.pad(title_width.saturating_sub(text_width(&title)));

    if !highlighted {
        frame.push(&Theme::fg(&theme.colors.text_dim));
    }
    let year = clip(&item.year, YEAR_WIDTH);
    frame.pad(YEAR_WIDTH.saturating_sub(text_width(&year)));
    frame.push(&year);
    frame.push(Theme::reset());
}
