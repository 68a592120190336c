use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::game::GameMode;
use crate::model::timeframe::{EventTimeframe, TimeframeEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One battle rotation: a rule played on a set of stages for a timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModeEvent {
    pub id: String,
    pub mode: GameMode,
    pub timeframe: EventTimeframe,
    pub rule: Rule,
    pub stages: Vec<Stage>,
}

impl PartialEq for GameModeEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GameModeEvent {}

impl Hash for GameModeEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TimeframeEvent for GameModeEvent {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeframe(&self) -> &EventTimeframe {
        &self.timeframe
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoopKind {
    Regular,
    BigRun,
}

/// One Salmon Run shift. Shifts announced far ahead come without stage or weapons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoopEvent {
    pub id: String,
    pub kind: CoopKind,
    pub timeframe: EventTimeframe,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

impl PartialEq for CoopEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CoopEvent {}

impl Hash for CoopEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TimeframeEvent for CoopEvent {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeframe(&self) -> &EventTimeframe {
        &self.timeframe
    }
}
