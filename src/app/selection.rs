//! Which movie, if any, is open in the detail view.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Closed,
    Open(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMsg {
    /// Toggle: opens `id`, or closes it if it is already open.
    Select(String),
    Close,
}

impl Selection {
    #[must_use]
    pub fn reduce(self, msg: SelectionMsg) -> Self {
        match (self, msg) {
            (Self::Open(current), SelectionMsg::Select(id)) if current == id => Self::Closed,
            (_, SelectionMsg::Select(id)) => Self::Open(id),
            (_, SelectionMsg::Close) => Self::Closed,
        }
    }

    #[must_use]
    pub fn open_id(&self) -> Option<&str> {
        match self {
            Self::Open(id) => Some(id),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}
