//! Shared rendering utilities.
//!
//! Components write ANSI output into a [`Frame`] rather than straight to
//! stdout, so a whole screen can be assembled, inspected in tests, and printed
//! in one go. Positions are 1-indexed terminal cells.

use crate::ui::theme::Theme;

/// Output buffer for one rendered screen.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends `n` spaces.
    pub fn pad(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(' ').take(n));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// A rectangular screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// First row past the region.
    #[must_use]
    pub const fn bottom(&self) -> usize {
        self.row + self.height
    }
}

/// Moves the cursor with `ESC[{row};{col}H`.
pub fn position_cursor(frame: &mut Frame, row: usize, col: usize) {
    frame.push(&format!("\u{1b}[{row};{col}H"));
}

/// Display width in terminal cells, counting one per character.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Keeps the first `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Writes `text` clipped to `width` and pads the rest of the line.
pub fn write_line(frame: &mut Frame, text: &str, width: usize) {
    let clipped = clip(text, width);
    let used = text_width(&clipped);
    frame.push(&clipped);
    frame.pad(width.saturating_sub(used));
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while text_width(&word) > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let head = clip(&word, width);
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if line.is_empty() {
            line = word;
        } else if text_width(&line) + 1 + text_width(&word) <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Writes `text` with the character ranges in `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. When
/// `is_selected` is set the selection colors win and no highlight is drawn.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            frame.push(&chars[current_pos..start].iter().collect::<String>());
        }

        frame.push(&Theme::fg(&theme.colors.match_highlight_fg));
        frame.push(&Theme::bg(&theme.colors.match_highlight_bg));
        frame.push(&chars[start..end].iter().collect::<String>());
        frame.push(Theme::reset());
        frame.push(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        frame.push(&chars[current_pos..].iter().collect::<String>());
    }
}
