use thiserror::Error;

/// Failures of the open/closed computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The weekly schedule does not hold one entry per weekday, or the
    /// weekday index falls outside of it.
    #[error("invalid schedule: {entries} entries, weekday index {index}")]
    InvalidSchedule { entries: usize, index: usize },
    /// The current moment could not be turned into a weekday and a time of day.
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),
    #[error("could not parse time '{0}'")]
    UnparseableTime(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("could not read cafe data: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not deserialize cafe data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cafe '{name}' has rating {rating}, expected 0 to 5")]
    InvalidRating { name: String, rating: u8 },
    #[error("cafe '{name}' has {entries} opening hour entries, expected 7")]
    InvalidSchedule { name: String, entries: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not deserialize config: {0}")]
    Json(#[from] serde_json::Error),
}
