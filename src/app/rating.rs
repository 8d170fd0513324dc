//! Star rating input.
//!
//! Holds a committed rating and a hover preview, both in `0..=max`. Unit `i`
//! (1-based) is drawn filled when the effective value (preview if set, else
//! the committed rating) is at least `i`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingState {
    max: u8,
    rating: u8,
    preview: u8,
    default_rating: u8,
    messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingMsg {
    /// Preview `n` units without committing.
    Hover(u8),
    /// Drop the preview; the committed rating shows again.
    Leave,
    Commit(u8),
    /// Hover one unit above the shown value.
    PreviewUp,
    /// Hover one unit below the shown value.
    PreviewDown,
    /// Commit whatever the preview shows.
    CommitPreview,
    /// Back to the default rating with no preview.
    Reset,
}

impl Default for RatingState {
    fn default() -> Self {
        Self::new(10, 0, Vec::new())
    }
}

impl RatingState {
    /// `default_rating` is clamped to `0..=max`. `messages` are used as labels
    /// only when there is exactly one per unit.
    #[must_use]
    pub fn new(max: u8, default_rating: u8, messages: Vec<String>) -> Self {
        let max = max.max(1);
        let default_rating = default_rating.min(max);
        Self {
            max,
            rating: default_rating,
            preview: 0,
            default_rating,
            messages,
        }
    }

    #[must_use]
    pub fn reduce(mut self, msg: RatingMsg) -> Self {
        match msg {
            RatingMsg::Hover(n) => self.preview = n.min(self.max),
            RatingMsg::Leave => self.preview = 0,
            RatingMsg::Commit(n) => {
                self.rating = n.min(self.max);
                self.preview = 0;
            }
            RatingMsg::PreviewUp => {
                let target = self.effective().saturating_add(1);
                return self.reduce(RatingMsg::Hover(target));
            }
            RatingMsg::PreviewDown => {
                let target = self.effective().saturating_sub(1);
                return self.reduce(RatingMsg::Hover(target));
            }
            RatingMsg::CommitPreview => {
                if self.preview > 0 {
                    self.rating = self.preview;
                    self.preview = 0;
                }
            }
            RatingMsg::Reset => {
                self.rating = self.default_rating;
                self.preview = 0;
            }
        }
        self
    }

    #[must_use]
    pub const fn max(&self) -> u8 {
        self.max
    }

    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    #[must_use]
    pub const fn preview(&self) -> u8 {
        self.preview
    }

    const fn effective(&self) -> u8 {
        if self.preview > 0 {
            self.preview
        } else {
            self.rating
        }
    }

    /// Whether unit `i` (1-based) is drawn filled.
    #[must_use]
    pub const fn is_filled(&self, i: u8) -> bool {
        self.effective() >= i
    }

    /// Text next to the stars; empty when nothing is rated or previewed.
    #[must_use]
    pub fn label(&self) -> String {
        let value = self.effective();
        if value == 0 {
            return String::new();
        }
        if self.messages.len() == usize::from(self.max) {
            if let Some(message) = self.messages.get(usize::from(value) - 1) {
                return message.clone();
            }
        }
        value.to_string()
    }
}
