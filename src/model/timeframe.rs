use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// When an event is valid. `start_date <= end_date` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventTimeframe {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Soon,
    Active,
    Over,
}

impl EventTimeframe {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self { start_date, end_date }
    }

    /// Status relative to `at`. The end instant itself already counts as over.
    pub fn status(&self, at: DateTime<Utc>) -> EventStatus {
        if at < self.start_date {
            EventStatus::Soon
        } else if at < self.end_date {
            EventStatus::Active
        } else {
            EventStatus::Over
        }
    }

    pub fn is_over(&self, at: DateTime<Utc>) -> bool {
        self.status(at) == EventStatus::Over
    }

    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }

    /// Time left until the end; zero once over.
    pub fn remaining(&self, at: DateTime<Utc>) -> Duration {
        (self.end_date - at).max(Duration::zero())
    }

    /// Time left until the start; zero once started.
    pub fn time_until_start(&self, at: DateTime<Utc>) -> Duration {
        (self.start_date - at).max(Duration::zero())
    }
}

/// Anything with an identity and a timeframe can be projected onto a timeline.
pub trait TimeframeEvent {
    fn id(&self) -> &str;
    fn timeframe(&self) -> &EventTimeframe;

    /// Instants at which what a display shows for this event changes.
    fn boundaries(&self) -> Vec<DateTime<Utc>> {
        let tf = self.timeframe();
        vec![tf.start_date, tf.end_date]
    }
}
