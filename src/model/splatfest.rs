use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::event::Stage;
use crate::model::timeframe::{EventTimeframe, TimeframeEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FestState {
    Scheduled,
    FirstHalf,
    SecondHalf,
    Closed,
}

impl FestState {
    pub fn label(self) -> &'static str {
        match self {
            FestState::Scheduled => "Scheduled",
            FestState::FirstHalf => "First half",
            FestState::SecondHalf => "Second half",
            FestState::Closed => "Closed",
        }
    }
}

/// Team color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestTeam {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Splatfest {
    pub id: String,
    pub title: String,
    pub timeframe: EventTimeframe,
    #[serde(default)]
    pub midterm: Option<DateTime<Utc>>,
    pub state: FestState,
    pub teams: Vec<FestTeam>,
    #[serde(default)]
    pub tricolor_stage: Option<Stage>,
}

impl Splatfest {
    /// Phase at `at`, derived from the timeframe and midterm rather than the fetched `state`.
    pub fn state_at(&self, at: DateTime<Utc>) -> FestState {
        if at < self.timeframe.start_date {
            FestState::Scheduled
        } else if at >= self.timeframe.end_date {
            FestState::Closed
        } else {
            match self.midterm {
                Some(midterm) if at >= midterm => FestState::SecondHalf,
                _ => FestState::FirstHalf,
            }
        }
    }
}

impl PartialEq for Splatfest {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Splatfest {}

impl Hash for Splatfest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TimeframeEvent for Splatfest {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeframe(&self) -> &EventTimeframe {
        &self.timeframe
    }

    // The midterm switches the fest to its second half.
    fn boundaries(&self) -> Vec<DateTime<Utc>> {
        let mut dates = vec![self.timeframe.start_date, self.timeframe.end_date];
        dates.extend(self.midterm);
        dates
    }
}
