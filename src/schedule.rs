use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::decode;
use crate::model::{CoopEvent, Game, GameMode, GameModeEvent, Splatfest};

/// Cached schedules go stale after this long.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

pub fn default_ttl() -> Duration {
    Duration::minutes(DEFAULT_TTL_MINUTES)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModeTimeline {
    pub mode: GameMode,
    pub events: Vec<GameModeEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoopTimeline {
    pub events: Vec<CoopEvent>,
}

/// Everything one fetch produced for a game. Replaced wholesale, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub game: Game,
    pub fetched_at: DateTime<Utc>,
    pub battles: Vec<GameModeTimeline>,
    #[serde(default)]
    pub coop: CoopTimeline,
    #[serde(default)]
    pub splatfest: Option<Splatfest>,
}

impl Schedule {
    /// A schedule stamped in the future (clock moved backwards) is stale as well.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now - self.fetched_at;
        age < Duration::zero() || age >= ttl
    }

    pub fn timeline(&self, mode: GameMode) -> Option<&GameModeTimeline> {
        self.battles.iter().find(|t| t.mode == mode)
    }

    /// Events for `mode`, empty when the mode has no timeline in this schedule.
    pub fn battle_events(&self, mode: GameMode) -> &[GameModeEvent] {
        self.timeline(mode).map(|t| t.events.as_slice()).unwrap_or(&[])
    }

    /// Earliest start across every event in the schedule.
    pub fn first_start(&self) -> Option<DateTime<Utc>> {
        let battles = self.battles.iter().flat_map(|t| t.events.iter().map(|e| e.timeframe.start_date));
        let coop = self.coop.events.iter().map(|e| e.timeframe.start_date);
        let fest = self.splatfest.iter().map(|f| f.timeframe.start_date);
        battles.chain(coop).chain(fest).min()
    }

    /// Example data shipped with the crate, used for previews and as the last fallback.
    pub fn example(game: Game) -> Schedule {
        let fetched_at = DateTime::<Utc>::UNIX_EPOCH;
        let decoded = match game {
            Game::Splatoon2 => decode::splatoon2::decode(
                include_str!("../data/splatoon2-schedules.json"),
                include_str!("../data/splatoon2-coop-schedules.json"),
                fetched_at,
            ),
            Game::Splatoon3 => decode::splatoon3::decode(include_str!("../data/splatoon3-schedules.json"), fetched_at),
        };
        match decoded {
            Ok(mut schedule) => {
                schedule.fetched_at = schedule.first_start().unwrap_or(fetched_at);
                schedule
            }
            Err(e) => {
                tracing::error!(error = %e, game = game.key(), "Bundled example data failed to decode");
                Schedule::empty(game, fetched_at)
            }
        }
    }

    pub fn empty(game: Game, fetched_at: DateTime<Utc>) -> Schedule {
        Schedule {
            game,
            fetched_at,
            battles: Vec::new(),
            coop: CoopTimeline::default(),
            splatfest: None,
        }
    }
}
