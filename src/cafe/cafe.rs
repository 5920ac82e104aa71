use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
    error::StatusError,
    timing::schedule::{Opening, Schedule},
};

pub const MAX_RATING: u8 = 5;

/// A single cafe as provided by the data file. Never mutated after loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    pub name: String,
    pub address: String,
    pub description: String,
    pub rating: u8,
    #[serde(default)]
    pub images: Vec<String>,
    pub opening_hours: Schedule,
}

impl Cafe {
    /// Open or closed at `now`, read on the wall clock of `now`'s timezone.
    pub fn status_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Opening, StatusError> {
        self.opening_hours.status_at(now.naive_local())
    }

    pub fn is_open<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<bool, StatusError> {
        Ok(self.status_at(now)?.is_open())
    }
}
