use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::HM_FORMAT;

/// Opening hours for a single weekday.
///
/// Stored in the data file as a pair of 24 hour `HH:MM` strings,
/// e.g. `["07:30", "16:00"]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct Daily {
    opening: NaiveTime,
    closing: NaiveTime,
}

impl Daily {
    /// Convenience constructor from whole hours and minutes.
    /// Returns `None` for values outside of a day.
    pub fn from_hm(opening: (u32, u32), closing: (u32, u32)) -> Option<Self> {
        Some(Self {
            opening: NaiveTime::from_hms_opt(opening.0, opening.1, 0)?,
            closing: NaiveTime::from_hms_opt(closing.0, closing.1, 0)?,
        })
    }

    pub fn opening(&self) -> NaiveTime {
        self.opening
    }

    pub fn closing(&self) -> NaiveTime {
        self.closing
    }

    /// Closing time earlier than the opening time, the hours run past midnight
    /// into the following day.
    pub fn wraps(&self) -> bool {
        self.closing < self.opening
    }

    /// Same day part of the hours, `opening <= time < closing`.
    ///
    /// For hours that wrap, only `time >= opening` belongs to this day; the
    /// early morning part is checked against the next day with `carries_over`.
    /// Equal times mean the cafe does not open that day.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps() {
            time >= self.opening
        } else {
            self.opening <= time && time < self.closing
        }
    }

    /// Whether `time` on the following day is still inside these hours.
    pub fn carries_over(&self, time: NaiveTime) -> bool {
        self.wraps() && time < self.closing
    }
}

impl TryFrom<(String, String)> for Daily {
    type Error = String;

    fn try_from((opening, closing): (String, String)) -> Result<Self, Self::Error> {
        let parse = |text: &str| {
            NaiveTime::parse_from_str(text.trim(), HM_FORMAT)
                .map_err(|err| format!("Invalid time '{}'. {}", text, err))
        };
        Ok(Self {
            opening: parse(&opening)?,
            closing: parse(&closing)?,
        })
    }
}

impl From<Daily> for (String, String) {
    fn from(daily: Daily) -> Self {
        (
            daily.opening.format(HM_FORMAT).to_string(),
            daily.closing.format(HM_FORMAT).to_string(),
        )
    }
}
