//! Compute the free gaps of a work window from its busy intervals.
//!
//! [`compute_gaps`] trusts its input to be sorted and non-overlapping, which is
//! what a free/busy source promises. [`merge_busy_periods`] produces that shape
//! from an arbitrary event list and is what in-memory sources use to answer a
//! query.

use chrono::NaiveDateTime;

use crate::interval::{BusyInterval, Gap, WorkWindow};

/// Free gaps of `window` given its busy intervals, ordered by start.
///
/// `busy` must be sorted ascending by start and pairwise non-overlapping. An empty
/// `busy` yields a single gap spanning the whole window. Zero-length gaps between
/// back-to-back intervals are dropped.
pub fn compute_gaps(busy: &[BusyInterval], window: &WorkWindow) -> Vec<Gap> {
    let (first, last) = match (busy.first(), busy.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return vec![window.as_gap()],
    };

    let mut gaps = Vec::with_capacity(busy.len() + 1);

    if window.start() < first.start {
        gaps.push(Gap {
            start: window.start(),
            end: first.start,
        });
    }

    for pair in busy.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start > prev.end {
            gaps.push(Gap {
                start: prev.end,
                end: next.start,
            });
        }
    }

    if last.end < window.end() {
        gaps.push(Gap {
            start: last.end,
            end: window.end(),
        });
    }

    gaps
}

/// Busy time of `intervals` inside `[window_start, window_end)`, coalesced.
///
/// Intervals may arrive in any order and overlap or touch. The result is
/// sorted and pairwise disjoint, ready for [`compute_gaps`].
pub fn merge_busy_periods(
    intervals: &[BusyInterval],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Vec<BusyInterval> {
    let mut inside: Vec<BusyInterval> = intervals
        .iter()
        .filter_map(|i| BusyInterval::new(i.start.max(window_start), i.end.min(window_end)))
        .collect();
    inside.sort_unstable_by_key(|i| i.start);

    inside.into_iter().fold(Vec::new(), |mut merged: Vec<BusyInterval>, next| {
        match merged.last_mut() {
            Some(prev) if next.start <= prev.end => prev.end = prev.end.max(next.end),
            _ => merged.push(next),
        }
        merged
    })
}
