use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::StatusError;

/// Source of the current moment.
pub trait Clock {
    fn now_utc(&self) -> Result<DateTime<Utc>, StatusError>;

    /// The current moment in a region's timezone.
    fn now_in(&self, timezone: Tz) -> Result<DateTime<Tz>, StatusError> {
        Ok(self.now_utc()?.with_timezone(&timezone))
    }
}

/// Reads the system clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> Result<DateTime<Utc>, StatusError> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| StatusError::ClockUnavailable(err.to_string()))?;
        let seconds = i64::try_from(elapsed.as_secs())
            .map_err(|err| StatusError::ClockUnavailable(err.to_string()))?;
        DateTime::from_timestamp(seconds, elapsed.subsec_nanos()).ok_or_else(|| {
            StatusError::ClockUnavailable(format!("timestamp {} out of range", seconds))
        })
    }
}

/// Always returns the same instant.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> Result<DateTime<Utc>, StatusError> {
        Ok(self.0)
    }
}

/// Resolves a wall clock reading in `timezone`.
///
/// Fails for readings that fall into a daylight saving gap. Ambiguous readings
/// resolve to the earlier instant.
pub fn resolve_local(timezone: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>, StatusError> {
    timezone
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| {
            StatusError::ClockUnavailable(format!("{} does not exist in {}", local, timezone.name()))
        })
}
