pub mod cafe;
pub mod config;
pub mod error;
pub mod presentation;
pub mod server;
pub mod status;
pub mod timing;

/// Opening hours in the data file, 24 hour clock.
pub const HM_FORMAT: &str = "%H:%M";
/// Opening hours as displayed, e.g. "9:00 AM".
pub const DISPLAY_TIME_FORMAT: &str = "%-I:%M %p";
/// Local wall clock readings passed to the API, e.g. `2024-05-13T10:00:00`.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
