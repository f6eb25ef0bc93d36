//! Pick one slot out of a day's gaps under a scheduling preference.
//!
//! Every preference is soft: when its stricter rule finds nothing, selection
//! falls back to [`first_fit`]. A preference never turns a day with room into
//! no slot.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::interval::{Gap, WorkWindow};

/// Latest hour-of-day a morning slot may end in.
pub const MORNING_END_HOUR: i64 = 12;

/// Hour-of-day afternoon slots are anchored at.
pub const AFTERNOON_START_HOUR: u32 = 15;

/// Soft bias applied when choosing among gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Earliest gap that fits.
    #[default]
    None,
    /// Earliest gap whose slot ends by the noon hour.
    Morning,
    /// Slot starting at 15:00 or later.
    Afternoon,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preference::None => "none",
            Preference::Morning => "morning",
            Preference::Afternoon => "afternoon",
        })
    }
}

impl FromStr for Preference {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Preference::None),
            "morning" => Ok(Preference::Morning),
            "afternoon" => Ok(Preference::Afternoon),
            other => Err(SlotError::InvalidRequest(format!(
                "unknown preference '{}', expected none, morning or afternoon",
                other
            ))),
        }
    }
}

/// Choose the start of a slot of `duration` among `gaps`, or `None` when nothing fits.
///
/// `gaps` must come from [`compute_gaps`](crate::freebusy::compute_gaps) for the
/// same `window`.
pub fn select_slot(
    gaps: &[Gap],
    window: &WorkWindow,
    duration: Duration,
    preference: Preference,
) -> Option<NaiveDateTime> {
    let preferred = match preference {
        Preference::None => None,
        Preference::Morning => morning_slot(gaps, window, duration),
        Preference::Afternoon => afternoon_slot(gaps, window, duration),
    };
    preferred.or_else(|| first_fit(gaps, duration))
}

/// Start of the earliest gap at least `duration` long.
pub fn first_fit(gaps: &[Gap], duration: Duration) -> Option<NaiveDateTime> {
    gaps.iter().find(|gap| gap.fits(duration)).map(|gap| gap.start)
}

fn morning_slot(gaps: &[Gap], window: &WorkWindow, duration: Duration) -> Option<NaiveDateTime> {
    gaps.iter()
        .find(|gap| gap.fits(duration) && window.hour_of(gap.start + duration) <= MORNING_END_HOUR)
        .map(|gap| gap.start)
}

fn afternoon_slot(gaps: &[Gap], window: &WorkWindow, duration: Duration) -> Option<NaiveDateTime> {
    let anchor = window.at_hour(AFTERNOON_START_HOUR).max(window.start());

    if is_free_day(gaps, window) {
        let day = window.as_gap();
        if !day.fits(duration) {
            return None;
        }
        // Too long to start at the anchor: take the latest slot ending at close.
        return Some(if anchor + duration <= day.end {
            anchor
        } else {
            day.end - duration
        });
    }

    // A gap straddling the anchor is usable from the anchor onward.
    gaps.iter()
        .filter(|gap| gap.end > anchor && gap.fits(duration))
        .find_map(|gap| {
            let start = gap.start.max(anchor);
            let end = start.checked_add_signed(duration)?;
            (end <= gap.end.min(window.end())).then_some(start)
        })
}

fn is_free_day(gaps: &[Gap], window: &WorkWindow) -> bool {
    matches!(gaps, [only] if *only == window.as_gap())
}
