use serde::Serialize;

pub const OPEN_LABEL: &str = "Open";
pub const CLOSED_LABEL: &str = "Closed";

/// What the display layer needs to show the hours line of a cafe.
///
/// `is_open` is exposed separately so the caller can pick colours without
/// matching on label text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub status_label: String,
    pub time_label: String,
    pub is_open: bool,
}

impl StatusDisplay {
    pub fn open(closing: &str) -> Self {
        Self {
            status_label: OPEN_LABEL.to_string(),
            time_label: format!("Closes at {}", closing),
            is_open: true,
        }
    }

    pub fn closed(opening: &str) -> Self {
        Self {
            status_label: CLOSED_LABEL.to_string(),
            time_label: format!("Opens at {}", opening),
            is_open: false,
        }
    }

    /// `<Status> <Time>`, e.g. "Open Closes at 5:00 PM".
    pub fn headline(&self) -> String {
        format!("{} {}", self.status_label, self.time_label)
    }
}
