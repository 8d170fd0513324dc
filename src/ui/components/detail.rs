//! Movie detail renderer for the right panel.
//!
//! Lays out the header block (title, release, runtime, genre, rating), the
//! rating control and then the plot and credits, wrapped to the panel.

use crate::ui::components::status::{render_error, render_loader};
use crate::ui::helpers::{position_cursor, wrap, write_line, Frame, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailBody, DetailView, RatingControl, StarsView};

/// Renders the detail body into `area`.
pub fn render_detail(frame: &mut Frame, area: Rect, body: &DetailBody, theme: &Theme) {
    match body {
        DetailBody::Loading => render_loader(frame, area, theme),
        DetailBody::Error(message) => render_error(frame, area, message, theme),
        DetailBody::Loaded(view) => render_loaded(frame, area, view, theme),
    }
}

fn render_loaded(frame: &mut Frame, area: Rect, view: &DetailView, theme: &Theme) {
    let mut lines = LineWriter { frame, area, row: area.row };
    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);

    lines.styled(&format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)), &view.title);
    lines.styled(&dim, &format!("{} • {}", view.released, view.runtime));
    lines.styled(&dim, &view.genre);

    let marker = if view.is_top_rated { "  🔥 Top rated" } else { "" };
    lines.styled(&Theme::fg(&theme.colors.star_fg), &format!("⭐ {} IMDb rating{marker}", view.rating));
    lines.blank();

    match &view.rating_control {
        RatingControl::Rated(rating) => {
            lines.styled(&Theme::fg(&theme.colors.accent_fg), &format!("You rated this movie {rating} ⭐"));
        }
        RatingControl::Input { stars, can_add } => {
            lines.stars(stars, theme);
            if *can_add {
                lines.styled(&Theme::fg(&theme.colors.accent_fg), "a: + Add to list");
            }
        }
    }
    lines.blank();

    for line in wrap(&view.plot, area.width) {
        lines.styled(&format!("{}{normal}", Theme::italic()), &line);
    }
    for line in wrap(&format!("Starring {}", view.actors), area.width) {
        lines.styled(&normal, &line);
    }
    lines.styled(&dim, &format!("Directed by {}", view.director));
}

/// Writes successive lines into an area, dropping whatever overflows it.
struct LineWriter<'a> {
    frame: &'a mut Frame,
    area: Rect,
    row: usize,
}

impl LineWriter<'_> {
    fn styled(&mut self, style: &str, text: &str) {
        if self.row >= self.area.bottom() {
            return;
        }
        position_cursor(self.frame, self.row, self.area.col);
        self.frame.push(style);
        write_line(self.frame, text, self.area.width);
        self.frame.push(Theme::reset());
        self.row += 1;
    }

    fn blank(&mut self) {
        self.row += 1;
    }

    fn stars(&mut self, stars: &StarsView, theme: &Theme) {
        if self.row >= self.area.bottom() {
            return;
        }
        position_cursor(self.frame, self.row, self.area.col);
        let width = self.area.width;
        let shown = stars.filled.len().min(width);
        for &filled in &stars.filled[..shown] {
            if filled {
                self.frame.push(&Theme::fg(&theme.colors.star_fg));
                self.frame.push("★");
            } else {
                self.frame.push(&Theme::fg(&theme.colors.text_dim));
                self.frame.push("☆");
            }
        }
        self.frame.push(&Theme::fg(&theme.colors.star_fg));
        write_line(self.frame, &format!(" {}", stars.label), width - shown);
        self.frame.push(Theme::reset());
        self.row += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_row_is_clipped_to_panel_width() {
        let view = DetailView {
            title: "Heat".to_string(),
            released: "15 Dec 1995".to_string(),
            runtime: "170 min".to_string(),
            genre: "Crime".to_string(),
            rating: "8.3".to_string(),
            is_top_rated: true,
            plot: String::new(),
            actors: String::new(),
            director: String::new(),
            rating_control: RatingControl::Input {
                stars: StarsView {
                    filled: vec![true; 255],
                    label: "Masterpiece".to_string(),
                },
                can_add: false,
            },
        };
        let area = Rect {
            row: 1,
            col: 1,
            width: 8,
            height: 20,
        };

        let mut frame = Frame::new();
        render_detail(&mut frame, area, &DetailBody::Loaded(Box::new(view)), &Theme::default());

        let stars = frame.as_str().chars().filter(|c| matches!(c, '★' | '☆')).count();
        assert_eq!(stars, 8);
        assert!(!frame.as_str().contains("Masterpiece"));
    }
}
