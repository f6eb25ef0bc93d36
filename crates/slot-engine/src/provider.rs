//! The busy-interval source boundary.
//!
//! A [`BusySource`] answers "what is busy inside this work window?" for the
//! walker. Real deployments back it with a calendar provider's free/busy query;
//! [`InMemoryCalendar`] backs it with an already-fetched event list.

use chrono::NaiveDateTime;

use crate::error::ProviderError;
use crate::freebusy::merge_busy_periods;
use crate::interval::{BusyInterval, WorkWindow};

/// Supplies the busy intervals of a work window.
///
/// Implementations must return intervals sorted ascending by start,
/// non-overlapping and confined to `window`. The walker checks this with
/// [`check_busy_response`] and aborts on violations.
pub trait BusySource {
    fn query_busy(&self, window: &WorkWindow) -> Result<Vec<BusyInterval>, ProviderError>;
}

impl<T: BusySource + ?Sized> BusySource for &T {
    fn query_busy(&self, window: &WorkWindow) -> Result<Vec<BusyInterval>, ProviderError> {
        (**self).query_busy(window)
    }
}

/// An authoritative source over a fixed list of events.
///
/// Events may overlap and come in any order; each query clips them to the
/// window and merges them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendar {
    events: Vec<BusyInterval>,
}

impl InMemoryCalendar {
    pub fn new(events: Vec<BusyInterval>) -> Self {
        Self { events }
    }

    /// Drop events that finished at or before `now`.
    pub fn upcoming_from(mut self, now: NaiveDateTime) -> Self {
        self.events.retain(|e| e.end > now);
        self
    }

    pub fn events(&self) -> &[BusyInterval] {
        &self.events
    }
}

impl BusySource for InMemoryCalendar {
    fn query_busy(&self, window: &WorkWindow) -> Result<Vec<BusyInterval>, ProviderError> {
        Ok(merge_busy_periods(&self.events, window.start(), window.end()))
    }
}

/// Verify a source's answer honours the free/busy contract for `window`.
pub fn check_busy_response(
    busy: &[BusyInterval],
    window: &WorkWindow,
) -> Result<(), ProviderError> {
    for interval in busy {
        if interval.start >= interval.end {
            return Err(ProviderError::Malformed(format!(
                "empty or inverted interval {} .. {}",
                interval.start, interval.end
            )));
        }
        if !window.contains(interval.start, interval.end) {
            return Err(ProviderError::Malformed(format!(
                "interval {} .. {} outside window {} .. {}",
                interval.start,
                interval.end,
                window.start(),
                window.end()
            )));
        }
    }

    if let Some(pair) = busy.windows(2).find(|pair| pair[1].start < pair[0].end) {
        return Err(ProviderError::Malformed(format!(
            "intervals unsorted or overlapping at {}",
            pair[1].start
        )));
    }

    Ok(())
}
