//! Tests for preference-aware slot selection.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use slot_engine::{compute_gaps, first_fit, select_slot, BusyInterval, Preference, WorkWindow};

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 16)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn busy(start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
    }
}

fn window(start_hour: u32, end_hour: u32) -> WorkWindow {
    WorkWindow::new(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(), start_hour, end_hour).unwrap()
}

fn pick(
    data: &[BusyInterval],
    w: &WorkWindow,
    minutes: i64,
    preference: Preference,
) -> Option<NaiveDateTime> {
    let gaps = compute_gaps(data, w);
    select_slot(&gaps, w, Duration::minutes(minutes), preference)
}

// ── No preference ───────────────────────────────────────────────────────────

#[test]
fn first_fit_skips_gaps_that_are_too_short() {
    // Leading gap 09:00-10:00 is only 1h; a 2h task lands after the busy block.
    let w = window(9, 19);
    assert_eq!(
        pick(&[busy((10, 0), (11, 0))], &w, 120, Preference::None),
        Some(at(11, 0))
    );
}

#[test]
fn first_fit_takes_leading_gap_when_it_suffices() {
    let w = window(9, 19);
    assert_eq!(
        pick(&[busy((10, 0), (11, 0))], &w, 30, Preference::None),
        Some(at(9, 0))
    );
}

#[test]
fn gap_exactly_as_long_as_duration_is_eligible() {
    let w = window(9, 19);
    assert_eq!(
        pick(&[busy((10, 0), (11, 0))], &w, 60, Preference::None),
        Some(at(9, 0))
    );
}

#[test]
fn fully_booked_day_yields_nothing_under_every_preference() {
    let w = window(9, 19);
    let data = [busy((9, 0), (19, 0))];
    for preference in [Preference::None, Preference::Morning, Preference::Afternoon] {
        assert_eq!(pick(&data, &w, 15, preference), None, "{preference}");
    }
}

#[test]
fn first_fit_on_empty_gap_list_is_none() {
    assert_eq!(first_fit(&[], Duration::minutes(1)), None);
}

// ── Morning ─────────────────────────────────────────────────────────────────

#[test]
fn morning_takes_gap_ending_in_noon_hour() {
    // 10:30 + 2h = 12:30, hour 12 qualifies.
    let w = window(9, 19);
    let data = [busy((10, 0), (10, 30)), busy((13, 0), (14, 0))];
    assert_eq!(pick(&data, &w, 120, Preference::Morning), Some(at(10, 30)));
}

#[test]
fn morning_falls_back_to_first_fit_when_nothing_ends_by_noon() {
    let w = window(9, 19);
    let data = [busy((9, 0), (11, 0)), busy((12, 0), (13, 0))];
    let morning = pick(&data, &w, 90, Preference::Morning);

    assert_eq!(morning, Some(at(13, 0)));
    assert_eq!(morning, pick(&data, &w, 90, Preference::None));
}

// ── Afternoon ───────────────────────────────────────────────────────────────

#[test]
fn afternoon_on_free_day_starts_at_fifteen() {
    let w = window(9, 19);
    assert_eq!(pick(&[], &w, 180, Preference::Afternoon), Some(at(15, 0)));
}

#[test]
fn afternoon_on_free_day_exactly_filling_the_afternoon_starts_at_fifteen() {
    let w = window(9, 19);
    assert_eq!(pick(&[], &w, 240, Preference::Afternoon), Some(at(15, 0)));
}

#[test]
fn afternoon_on_free_day_too_long_for_afternoon_ends_at_close() {
    let w = window(9, 19);
    assert_eq!(pick(&[], &w, 300, Preference::Afternoon), Some(at(14, 0)));
    assert_eq!(pick(&[], &w, 600, Preference::Afternoon), Some(at(9, 0)));
}

#[test]
fn afternoon_on_free_day_longer_than_window_is_none() {
    let w = window(9, 19);
    assert_eq!(pick(&[], &w, 601, Preference::Afternoon), None);
}

#[test]
fn afternoon_uses_gap_straddling_fifteen_from_fifteen_onward() {
    let w = window(9, 19);
    assert_eq!(
        pick(&[busy((10, 0), (11, 0))], &w, 120, Preference::Afternoon),
        Some(at(15, 0))
    );
}

#[test]
fn afternoon_takes_gap_starting_after_fifteen() {
    let w = window(9, 19);
    assert_eq!(
        pick(&[busy((9, 0), (16, 0))], &w, 60, Preference::Afternoon),
        Some(at(16, 0))
    );
}

#[test]
fn afternoon_falls_back_to_first_fit_when_afternoon_is_full() {
    // Gaps: 09-10, 11-15:30, 18-19. Nothing after 15:00 holds 2h.
    let w = window(9, 19);
    let data = [busy((10, 0), (11, 0)), busy((15, 30), (18, 0))];
    assert_eq!(pick(&data, &w, 120, Preference::Afternoon), Some(at(11, 0)));
}

#[test]
fn afternoon_window_closing_before_fifteen_ends_at_close() {
    let w = window(9, 12);
    assert_eq!(pick(&[], &w, 120, Preference::Afternoon), Some(at(10, 0)));
}

#[test]
fn afternoon_window_opening_after_fifteen_starts_at_open() {
    let w = window(16, 22);
    assert_eq!(pick(&[], &w, 120, Preference::Afternoon), Some(at(16, 0)));
}

#[test]
fn duration_at_the_limit_of_time_delta_selects_nothing() {
    let w = window(9, 19);
    for data in [vec![], vec![busy((10, 0), (11, 0))]] {
        let gaps = compute_gaps(&data, &w);
        for preference in [Preference::None, Preference::Morning, Preference::Afternoon] {
            assert_eq!(select_slot(&gaps, &w, Duration::MAX, preference), None);
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn preference_parses_case_insensitively() {
    assert_eq!("Morning".parse::<Preference>().unwrap(), Preference::Morning);
    assert_eq!("AFTERNOON".parse::<Preference>().unwrap(), Preference::Afternoon);
    assert_eq!("none".parse::<Preference>().unwrap(), Preference::None);
    assert!("evening".parse::<Preference>().is_err());
}

#[test]
fn preference_displays_lowercase() {
    assert_eq!(Preference::Afternoon.to_string(), "afternoon");
}
