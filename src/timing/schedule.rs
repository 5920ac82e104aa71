use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::StatusError;

use super::daily::Daily;

pub const DAYS_IN_WEEK: usize = 7;

/// Outcome of looking a moment up in a `Schedule`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opening {
    Open { closes: NaiveTime },
    Closed { opens: NaiveTime },
}

impl Opening {
    pub fn is_open(&self) -> bool {
        matches!(self, Opening::Open { .. })
    }
}

/// A week of opening hours, Sunday first.
///
/// Weekday indices follow the calendar convention Sunday=1 ... Saturday=7.
/// The entries are not checked on construction so that a malformed schedule
/// coming from the data file surfaces as an error at lookup time instead of
/// a panic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    timings: Vec<Daily>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            timings: Vec::with_capacity(DAYS_IN_WEEK),
        }
    }

    pub fn from_timings(timings: Vec<Daily>) -> Self {
        Self { timings }
    }

    /// Same hours every day of the week.
    pub fn every_day(daily: Daily) -> Self {
        Self {
            timings: vec![daily; DAYS_IN_WEEK],
        }
    }

    pub fn add_timing(&mut self, timing: Daily) -> Result<(), StatusError> {
        if self.timings.len() >= DAYS_IN_WEEK {
            return Err(self.invalid(self.timings.len() + 1));
        }
        self.timings.push(timing);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.timings.len() == DAYS_IN_WEEK
    }

    /// 1 based weekday index, Sunday=1.
    pub fn weekday_index(weekday: Weekday) -> usize {
        weekday.num_days_from_sunday() as usize + 1
    }

    /// Entry for a 1 based weekday index.
    pub fn entry(&self, index: usize) -> Result<&Daily, StatusError> {
        if !self.is_complete() || !(1..=DAYS_IN_WEEK).contains(&index) {
            return Err(self.invalid(index));
        }
        Ok(&self.timings[index - 1])
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Result<&Daily, StatusError> {
        self.entry(Self::weekday_index(weekday))
    }

    /// Whether the cafe is open at `timestamp` and the time that ends that state.
    ///
    /// Hours that run past midnight are taken from the previous day's entry,
    /// so a Monday 18:00 to 02:00 shift still covers Tuesday 01:00. When
    /// closed, the reported opening time is always today's.
    pub fn status_at(&self, timestamp: NaiveDateTime) -> Result<Opening, StatusError> {
        let weekday = timestamp.weekday();
        let time = timestamp.time();
        let today = self.for_weekday(weekday)?;
        let yesterday = self.for_weekday(weekday.pred())?;

        if yesterday.carries_over(time) {
            return Ok(Opening::Open {
                closes: yesterday.closing(),
            });
        }
        if today.contains(time) {
            return Ok(Opening::Open {
                closes: today.closing(),
            });
        }
        Ok(Opening::Closed {
            opens: today.opening(),
        })
    }

    pub fn is_open(&self, timestamp: NaiveDateTime) -> Result<bool, StatusError> {
        Ok(self.status_at(timestamp)?.is_open())
    }

    fn invalid(&self, index: usize) -> StatusError {
        StatusError::InvalidSchedule {
            entries: self.timings.len(),
            index,
        }
    }
}
