//! Calendar event payloads in the provider's JSON shape.
//!
//! Inbound: an event listing (`{"items": [...]}` or a bare array) is turned into
//! busy intervals. A `dateTime` carrying a UTC offset keeps its wall-clock time
//! and drops the offset; all-day entries block every hour of their dates;
//! cancelled entries block nothing.
//!
//! Outbound: [`TaskEvent`] is the insert body for a task placed in a [`Slot`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{BusyInterval, Slot};

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Start or end of an event. Exactly one of `date_time` and `date` is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// All-day marker. As an end it is exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "timeZone", default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn resolve(&self) -> Result<NaiveDateTime> {
        match (&self.date_time, self.date) {
            (Some(dt), _) => parse_local_datetime(dt),
            (None, Some(date)) => Ok(date.and_time(NaiveTime::MIN)),
            (None, None) => Err(SlotError::Calendar(
                "event time has neither dateTime nor date".into(),
            )),
        }
    }
}

/// One entry of a provider event listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl CalendarEvent {
    /// The interval this event blocks, if any.
    ///
    /// Cancelled and zero-length events block nothing. An event ending before
    /// it starts is rejected.
    pub fn busy_interval(&self) -> Result<Option<BusyInterval>> {
        if self.status.as_deref() == Some("cancelled") {
            return Ok(None);
        }
        let (start, end) = (self.start.resolve()?, self.end.resolve()?);
        if end < start {
            return Err(SlotError::Calendar(format!(
                "event {} ends at {} before it starts at {}",
                self.summary.as_deref().unwrap_or("(untitled)"),
                end,
                start
            )));
        }
        Ok(BusyInterval::new(start, end))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Wrapped {
        #[serde(default)]
        items: Vec<CalendarEvent>,
    },
    Bare(Vec<CalendarEvent>),
}

/// Parse an event listing into busy intervals, in listing order.
pub fn parse_calendar(json: &str) -> Result<Vec<BusyInterval>> {
    let listing: Listing = serde_json::from_str(json)
        .map_err(|e| SlotError::Calendar(format!("invalid event listing: {}", e)))?;
    let events = match listing {
        Listing::Wrapped { items } => items,
        Listing::Bare(items) => items,
    };

    let mut busy = Vec::with_capacity(events.len());
    for event in &events {
        if let Some(interval) = event.busy_interval()? {
            busy.push(interval);
        }
    }
    Ok(busy)
}

/// Parse `2026-03-16T10:00:00`, with or without a UTC offset, as wall-clock time.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| SlotError::Calendar(format!("invalid datetime '{}': {}", s, e)))
}

/// Event-insert body for a task scheduled into a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl TaskEvent {
    pub fn for_slot(summary: impl Into<String>, slot: &Slot, time_zone: Tz) -> Self {
        let at = |ts: NaiveDateTime| EventTime {
            date_time: Some(ts.format(LOCAL_FORMAT).to_string()),
            date: None,
            time_zone: Some(time_zone.name().to_string()),
        };
        Self {
            summary: summary.into(),
            start: at(slot.start),
            end: at(slot.end),
        }
    }
}
