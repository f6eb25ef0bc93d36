//! Interval model: busy intervals, daily work windows, free gaps and slots.
//!
//! All timestamps are local wall-clock times without a UTC offset. The named
//! time zone is attached by the caller when the result leaves the engine.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A time range already occupied by a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }
}

/// The schedulable part of one calendar day: `[date startHour:00, date endHour:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkWindow {
    /// Build a window, rejecting hours outside `0 <= start_hour < end_hour <= 24`.
    pub fn new(date: NaiveDate, start_hour: u32, end_hour: u32) -> Result<Self> {
        validate_work_hours(start_hour, end_hour)?;
        Ok(Self {
            date,
            start_hour,
            end_hour,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.at_hour(self.start_hour)
    }

    /// Window close. For `end_hour == 24` this is midnight of the following day.
    pub fn end(&self) -> NaiveDateTime {
        self.at_hour(self.end_hour)
    }

    /// The timestamp `hour:00:00` on this window's date (24 rolls into the next day).
    pub fn at_hour(&self, hour: u32) -> NaiveDateTime {
        self.midnight() + Duration::hours(i64::from(hour))
    }

    /// Whole hours elapsed between this window's midnight and `ts`.
    ///
    /// Unlike `Timelike::hour`, a timestamp at the 24:00 window close reports 24.
    pub fn hour_of(&self, ts: NaiveDateTime) -> i64 {
        (ts - self.midnight()).num_hours()
    }

    /// True when `[start, end)` lies entirely inside the window.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start() <= start && end <= self.end()
    }

    /// The whole window as a single gap.
    pub fn as_gap(&self) -> Gap {
        Gap {
            start: self.start(),
            end: self.end(),
        }
    }

    fn midnight(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

/// Check the work-hour bounds shared by windows, requests and configuration.
pub(crate) fn validate_work_hours(start_hour: u32, end_hour: u32) -> Result<()> {
    if start_hour >= end_hour || end_hour > 24 {
        return Err(SlotError::InvalidRequest(format!(
            "work hours must satisfy 0 <= start < end <= 24, got {}..{}",
            start_hour, end_hour
        )));
    }
    Ok(())
}

/// A maximal free range inside a work window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Gap {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Inclusive: a gap exactly as long as `duration` fits.
    pub fn fits(&self, duration: Duration) -> bool {
        self.duration() >= duration
    }
}

/// A chosen slot. `end` is always `start` plus the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Convert a fractional number of hours to a duration, rounded to the nearest second.
///
/// Returns `None` for non-finite input or a length `Duration` cannot represent.
pub fn hours_to_duration(hours: f64) -> Option<Duration> {
    let seconds = (hours * 3600.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_seconds(seconds as i64)
}
