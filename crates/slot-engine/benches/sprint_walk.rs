use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{BusyInterval, InMemoryCalendar, Preference, SlotRequest, SprintWalker};

/// A quarter of densely booked days: 30-minute meetings every 45 minutes, with
/// the last day left open so the walk covers the whole range.
fn busy_quarter(start: NaiveDate, days: i64) -> Vec<BusyInterval> {
    let mut events = Vec::new();
    for offset in 0..days - 1 {
        let day = start + Duration::days(offset);
        let mut at = day.and_hms_opt(9, 0, 0).unwrap();
        let close = day.and_hms_opt(19, 0, 0).unwrap();
        while at < close {
            events.push(BusyInterval {
                start: at,
                end: at + Duration::minutes(30),
            });
            at += Duration::minutes(45);
        }
    }
    events
}

fn bench_sprint_walk(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
    let days = 90;
    let calendar = InMemoryCalendar::new(busy_quarter(start, days));
    let request = SlotRequest {
        duration_hours: 1.0,
        preference: Preference::Afternoon,
        sprint_start: start,
        sprint_end: start + Duration::days(days - 1),
        work_start_hour: 9,
        work_end_hour: 19,
    };
    let walker = SprintWalker::new(&calendar);

    c.bench_function("walk_90_busy_days", |b| {
        b.iter(|| walker.find_slot(black_box(&request)).unwrap())
    });
}

criterion_group!(benches, bench_sprint_walk);
criterion_main!(benches);
