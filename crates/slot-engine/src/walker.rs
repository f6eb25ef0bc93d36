//! Walk the days of a sprint until one of them has room for the task.
//!
//! Days are tried in ascending order and the walk stops at the first slot, so
//! the busy source is queried at most once per retained day and never after a
//! success. Each day's decision depends only on that day's busy intervals,
//! making the outcome deterministic for identical inputs.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::{Result, SlotError};
use crate::freebusy::compute_gaps;
use crate::interval::{hours_to_duration, validate_work_hours, Slot, WorkWindow};
use crate::provider::{check_busy_response, BusySource};
use crate::selector::{select_slot, Preference};

/// Weekend days skipped when no other set is configured.
pub const DEFAULT_EXCLUDED_WEEKDAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

/// One scheduling attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub duration_hours: f64,
    #[serde(default)]
    pub preference: Preference,
    pub sprint_start: NaiveDate,
    pub sprint_end: NaiveDate,
    pub work_start_hour: u32,
    pub work_end_hour: u32,
}

impl SlotRequest {
    /// Reject malformed durations, date ranges and work hours.
    pub fn validate(&self) -> Result<()> {
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(SlotError::InvalidRequest(format!(
                "duration must be a positive number of hours, got {}",
                self.duration_hours
            )));
        }
        if self.duration()? <= Duration::zero() {
            return Err(SlotError::InvalidRequest(format!(
                "duration of {} hours is shorter than one second",
                self.duration_hours
            )));
        }
        if self.sprint_start > self.sprint_end {
            return Err(SlotError::InvalidRequest(format!(
                "sprint starts {} after it ends {}",
                self.sprint_start, self.sprint_end
            )));
        }
        validate_work_hours(self.work_start_hour, self.work_end_hour)
    }

    pub fn duration(&self) -> Result<Duration> {
        hours_to_duration(self.duration_hours).ok_or_else(|| {
            SlotError::InvalidRequest(format!(
                "duration of {} hours is out of range",
                self.duration_hours
            ))
        })
    }

    fn window_for(&self, date: NaiveDate) -> WorkWindow {
        WorkWindow {
            date,
            start_hour: self.work_start_hour,
            end_hour: self.work_end_hour,
        }
    }
}

/// Searches a sprint day by day against a [`BusySource`].
#[derive(Debug, Clone)]
pub struct SprintWalker<S> {
    source: S,
    excluded_weekdays: Vec<Weekday>,
    cancel: Option<CancelToken>,
}

impl<S: BusySource> SprintWalker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            excluded_weekdays: DEFAULT_EXCLUDED_WEEKDAYS.to_vec(),
            cancel: None,
        }
    }

    /// Replace the set of weekdays never scheduled on. An empty set schedules every day.
    pub fn with_excluded_weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.excluded_weekdays = days.into_iter().collect();
        self
    }

    /// Abort between days once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded_weekdays.contains(&date.weekday())
    }

    /// Find the first slot in the sprint, or `Ok(None)` when none exists.
    ///
    /// A cancelled walk also yields `Ok(None)`. Any busy-source failure aborts
    /// the whole walk rather than skipping the day.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` before any query when `request` is malformed.
    /// Returns `SlotError::Provider` when the source fails or breaks its contract.
    pub fn find_slot(&self, request: &SlotRequest) -> Result<Option<Slot>> {
        request.validate()?;
        let duration = request.duration()?;

        for date in request
            .sprint_start
            .iter_days()
            .take_while(|date| *date <= request.sprint_end)
        {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                warn!(%date, "sprint walk cancelled");
                return Ok(None);
            }
            if self.is_excluded(date) {
                debug!(%date, weekday = %date.weekday(), "skipping excluded weekday");
                continue;
            }

            let window = request.window_for(date);
            let busy = self
                .source
                .query_busy(&window)
                .and_then(|busy| {
                    check_busy_response(&busy, &window)?;
                    Ok(busy)
                })
                .map_err(|source| {
                    warn!(%date, error = %source, "busy source failed");
                    SlotError::Provider { date, source }
                })?;

            let gaps = compute_gaps(&busy, &window);
            debug!(%date, busy = busy.len(), gaps = gaps.len(), "evaluating day");

            if let Some(start) = select_slot(&gaps, &window, duration, request.preference) {
                let slot = Slot {
                    start,
                    end: start + duration,
                };
                info!(start = %slot.start, end = %slot.end, preference = %request.preference, "slot found");
                return Ok(Some(slot));
            }
        }

        info!(
            sprint_start = %request.sprint_start,
            sprint_end = %request.sprint_end,
            "no availability in sprint"
        );
        Ok(None)
    }
}

/// Walk `request` against `source` with the default weekend and no cancellation.
pub fn find_slot<S: BusySource>(source: S, request: &SlotRequest) -> Result<Option<Slot>> {
    SprintWalker::new(source).find_slot(request)
}
