//! Watched summary and list renderer for the right panel.

use crate::ui::helpers::{clip, position_cursor, write_line, Frame, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListView, SummaryView, WatchedItem};

/// Rows taken by the summary block, separator included.
pub const SUMMARY_HEIGHT: usize = 3;

/// Renders the summary followed by as many watched entries as fit.
pub fn render_watched(frame: &mut Frame, area: Rect, summary: &SummaryView, list: &ListView<WatchedItem>, theme: &Theme) {
    if area.height < SUMMARY_HEIGHT {
        return;
    }

    position_cursor(frame, area.row, area.col);
    frame.push(Theme::bold());
    frame.push(&Theme::fg(&theme.colors.header_fg));
    write_line(frame, "MOVIES YOU WATCHED", area.width);
    frame.push(Theme::reset());

    position_cursor(frame, area.row + 1, area.col);
    frame.push(&Theme::fg(&theme.colors.star_fg));
    write_line(
        frame,
        &format!(
            "#️⃣ {}  ⭐ {}  🌟 {}  ⏳ {}",
            summary.count, summary.avg_catalog_rating, summary.avg_user_rating, summary.avg_runtime
        ),
        area.width,
    );
    frame.push(Theme::reset());

    position_cursor(frame, area.row + 2, area.col);
    frame.push(&Theme::fg(&theme.colors.border));
    frame.push(&"─".repeat(area.width));
    frame.push(Theme::reset());

    let rows = area.height - SUMMARY_HEIGHT;
    for (offset, item) in list.items.iter().take(rows).enumerate() {
        render_watched_row(frame, area.row + SUMMARY_HEIGHT + offset, area, item, list.is_active, theme);
    }
}

/// ```text
/// Inception                     ⭐ 8.8  🌟 9  ⏳ 148 min
/// ```
fn render_watched_row(frame: &mut Frame, row: usize, area: Rect, item: &WatchedItem, is_active: bool, theme: &Theme) {
    let stats = format!("⭐ {}  🌟 {}  ⏳ {}", item.catalog_rating, item.user_rating, item.runtime);
    let stats_width = stats.chars().count() + 1;
    let title_width = area.width.saturating_sub(stats_width);

    position_cursor(frame, row, area.col);
    if item.is_selected && is_active {
        frame.push(&Theme::fg(&theme.colors.selection_fg));
        frame.push(&Theme::bg(&theme.colors.selection_bg));
    } else {
        frame.push(&Theme::fg(&theme.colors.text_normal));
    }
    write_line(frame, &clip(&item.title, title_width), title_width);
    frame.pad(1);
    frame.push(&clip(&stats, area.width.saturating_sub(title_width + 1)));
    frame.push(Theme::reset());
}
