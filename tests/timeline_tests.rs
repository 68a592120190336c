use chrono::{DateTime, Duration, TimeZone, Utc};

use splat_timeline::model::{EventTimeframe, TimeframeEvent};
use splat_timeline::timeline::{project, refresh_dates, upcoming, ProjectionOptions};

#[derive(Debug, Clone)]
struct Ev {
    id: String,
    tf: EventTimeframe,
}

impl TimeframeEvent for Ev {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeframe(&self) -> &EventTimeframe {
        &self.tf
    }
}

fn h(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 10, hour, 0, 0).unwrap()
}

fn ev(id: &str, start: u32, end: u32) -> Ev {
    Ev { id: id.to_string(), tf: EventTimeframe::new(h(start), h(end)) }
}

/// `count` back-to-back two hour events starting at midnight.
fn rotations(count: u32) -> Vec<Ev> {
    (0..count).map(|i| ev(&format!("e{}", i), i * 2, i * 2 + 2)).collect()
}

fn ids(events: &[Ev]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

fn opts(max_entries: usize, reload_hours: i64) -> ProjectionOptions {
    ProjectionOptions { max_entries, reload_interval: Duration::hours(reload_hours), ..ProjectionOptions::default() }
}

#[test]
fn upcoming_drops_finished_and_sorts() {
    let events = vec![ev("c", 4, 6), ev("a", 0, 2), ev("b", 2, 4)];

    let found: Vec<&str> = upcoming(&events, h(2)).into_iter().map(|e| e.id.as_str()).collect();

    // "a" ends exactly at 02:00 and is already over.
    assert_eq!(found, vec!["b", "c"]);
}

#[test]
fn refresh_dates_are_future_unique_sorted() {
    let events = vec![ev("b", 2, 4), ev("a", 0, 2), ev("c", 4, 6)];
    assert_eq!(refresh_dates(&events, h(1)), vec![h(2), h(4), h(6)]);
    assert!(refresh_dates(&events, h(6)).is_empty());
}

#[test]
fn projection_entries_follow_boundaries() {
    let events = rotations(3);

    let p = project(&events, h(1), &opts(24, 12));

    let dates: Vec<_> = p.entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![h(1), h(2), h(4)]);
    assert_eq!(ids(&p.entries[0].events), vec!["e0", "e1"]);
    assert_eq!(ids(&p.entries[2].events), vec!["e2"]);
    assert_eq!(p.reload_after, h(6));
}

#[test]
fn projection_reload_capped_by_interval() {
    let events = rotations(3);
    let p = project(&events, h(1), &ProjectionOptions::default());
    assert_eq!(p.reload_after, h(2));
}

#[test]
fn projection_without_events_keeps_one_entry() {
    let p = project::<Ev>(&[], h(1), &ProjectionOptions::default());
    assert_eq!(p.entries.len(), 1);
    assert_eq!(p.entries[0].date, h(1));
    assert!(p.entries[0].events.is_empty());
    assert_eq!(p.reload_after, h(2));
}

#[test]
fn projection_respects_max_entries() {
    // Arrange
    let events = rotations(10);

    // Act
    let p = project(&events, h(0), &opts(3, 12));

    // Assert
    let dates: Vec<_> = p.entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![h(0), h(2), h(4)]);
    assert_eq!(ids(&p.entries[2].events), vec!["e2", "e3"]);
    // The last entry goes out of date when e2 ends, long before the interval or the last event.
    assert_eq!(p.reload_after, h(6));
}

#[test]
fn reload_never_outlives_the_last_entry() {
    let events = rotations(10);
    for max_entries in 1..=10 {
        let p = project(&events, h(1), &opts(max_entries, 24));
        let last = p.entries.last().expect("at least one entry");
        let first_end = last.events.iter().map(|e| e.tf.end_date).min().expect("last entry has events");
        assert!(
            p.reload_after <= first_end,
            "max_entries {}: reload at {} but {} ends at {}",
            max_entries,
            p.reload_after,
            last.events[0].id,
            first_end
        );
    }
}

#[test]
fn zero_max_entries_still_yields_the_current_entry() {
    let events = rotations(10);

    let p = project(&events, h(0), &opts(0, 12));

    assert_eq!(p.entries.len(), 1);
    assert_eq!(p.entries[0].date, h(0));
    assert_eq!(ids(&p.entries[0].events), vec!["e0", "e1"]);
    assert_eq!(p.reload_after, h(2));
}
