//! Projection of event lists onto the dates a display should refresh at.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EventStatus, TimeframeEvent};

#[derive(Debug, Clone, Copy)]
pub struct ProjectionOptions {
    /// Upper bound on entries produced, the first entry included.
    pub max_entries: usize,
    /// How many events each entry carries (current, next, ...).
    pub events_per_entry: usize,
    /// Longest a host should keep a projection before asking again.
    pub reload_interval: Duration,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            max_entries: 24,
            events_per_entry: 2,
            reload_interval: Duration::hours(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry<E> {
    pub date: DateTime<Utc>,
    pub events: Vec<E>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection<E> {
    pub entries: Vec<Entry<E>>,
    pub reload_after: DateTime<Utc>,
}

/// Events that are not over at `at`, in start order.
pub fn upcoming<E>(events: &[E], at: DateTime<Utc>) -> Vec<&E>
where
    E: TimeframeEvent,
{
    let mut out: Vec<&E> = events
        .iter()
        .filter(|e| e.timeframe().status(at) != EventStatus::Over)
        .collect();
    out.sort_by_key(|e| e.timeframe().start_date);
    out
}

/// Boundaries of not-yet-over events strictly after `at`, sorted and deduplicated.
pub fn refresh_dates<E>(events: &[E], at: DateTime<Utc>) -> Vec<DateTime<Utc>>
where
    E: TimeframeEvent,
{
    let mut dates: Vec<DateTime<Utc>> = upcoming(events, at)
        .into_iter()
        .flat_map(|e| e.boundaries())
        .filter(|d| *d > at)
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Build the entries a widget host should display, starting at `at`.
pub fn project<E>(events: &[E], at: DateTime<Utc>, options: &ProjectionOptions) -> Projection<E>
where
    E: TimeframeEvent + Clone,
{
    let boundaries = refresh_dates(events, at);
    let max_entries = options.max_entries.max(1);

    // The host keeps the last entry until it reloads, so reload no later than
    // the first boundary that did not get an entry of its own.
    let first_dropped = boundaries.get(max_entries - 1).copied();
    let reload_after = [boundaries.last().copied(), first_dropped]
        .into_iter()
        .flatten()
        .fold(at + options.reload_interval, |acc, d| acc.min(d));

    let mut entries: Vec<Entry<E>> = std::iter::once(at)
        .chain(boundaries)
        .take(max_entries)
        .map(|date| Entry {
            date,
            events: upcoming(events, date)
                .into_iter()
                .take(options.events_per_entry)
                .cloned()
                .collect(),
        })
        .collect();

    // Trailing entries with nothing to show add nothing; the first one always stays.
    while entries.len() > 1 && entries.last().is_some_and(|e| e.events.is_empty()) {
        entries.pop();
    }

    Projection { entries, reload_after }
}
