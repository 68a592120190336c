use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::cache::DiskCache;
use crate::error::Result;
use crate::model::Game;
use crate::schedule::Schedule;
use crate::source::ScheduleSource;

/// Where a loaded schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Cache,
    Network,
    StaleCache,
    Bundled,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub schedule: Schedule,
    pub origin: Origin,
}

/// Fetch-and-cache front for a [`ScheduleSource`].
#[derive(Debug)]
pub struct ScheduleStore<S> {
    source: S,
    cache: DiskCache,
    ttl: Duration,
}

impl<S: ScheduleSource> ScheduleStore<S> {
    pub fn new(source: S, cache: DiskCache, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }

    pub fn cache(&self) -> &DiskCache {
        &self.cache
    }

    fn cached(&self, game: Game) -> Option<Schedule> {
        match self.cache.load(game) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, game = game.key(), "Ignoring unreadable schedule cache");
                None
            }
        }
    }

    /// Fresh cache, else network, else stale cache, else bundled example data.
    #[instrument(level = "info", skip(self), fields(game = game.key()))]
    pub fn load(&self, game: Game, now: DateTime<Utc>) -> Loaded {
        // A cache younger than the TTL wins without touching the network
        let cached = self.cached(game);
        if let Some(schedule) = &cached {
            if !schedule.is_stale(now, self.ttl) {
                info!(fetched_at = %schedule.fetched_at, "Using cached schedule");
                return Loaded { schedule: schedule.clone(), origin: Origin::Cache };
            }
        }

        // Stale or missing: try the network, and keep the old copy around as a fallback
        match self.refresh(game, now) {
            Ok(schedule) => Loaded { schedule, origin: Origin::Network },
            Err(e) => match cached {
                Some(schedule) => {
                    warn!(error = %e, fetched_at = %schedule.fetched_at, "Fetch failed, using stale cache");
                    Loaded { schedule, origin: Origin::StaleCache }
                }
                // Nothing usable at all; the bundled example keeps the widget from going blank
                None => {
                    warn!(error = %e, "Fetch failed and nothing cached, using bundled example data");
                    Loaded { schedule: Schedule::example(game), origin: Origin::Bundled }
                }
            },
        }
    }

    /// Fetch from the source and write the result to the cache. A failed cache write is only logged.
    pub fn refresh(&self, game: Game, now: DateTime<Utc>) -> Result<Schedule> {
        let schedule = self.source.fetch(game, now)?;
        if let Err(e) = self.cache.store(&schedule) {
            warn!(error = %e, "Failed to write schedule cache");
        }
        Ok(schedule)
    }
}
