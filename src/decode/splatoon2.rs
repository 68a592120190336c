//! splatoon2.ink `schedules.json` and `coop-schedules.json`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::decode::{parse_json, sort_by_start};
use crate::error::{Error, Result};
use crate::model::{CoopEvent, CoopKind, EventTimeframe, Game, GameMode, GameModeEvent, Rule, Stage, Weapon};
use crate::schedule::{CoopTimeline, GameModeTimeline, Schedule};

#[derive(Debug, Deserialize)]
pub(crate) struct SchedulesDocument {
    #[serde(default)]
    pub regular: Vec<Rotation>,
    #[serde(default)]
    pub gachi: Vec<Rotation>,
    #[serde(default)]
    pub league: Vec<Rotation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Rotation {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub rule: KeyName,
    pub stage_a: StageDto,
    pub stage_b: StageDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyName {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageDto {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoopDocument {
    #[serde(default)]
    pub details: Vec<CoopDetail>,
    #[serde(default)]
    pub schedules: Vec<CoopWindow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoopWindow {
    pub start_time: i64,
    pub end_time: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoopDetail {
    pub start_time: i64,
    pub end_time: i64,
    pub stage: StageDto,
    #[serde(default)]
    pub weapons: Vec<CoopWeaponSlot>,
}

/// A slot holds either a fixed weapon or a "random" placeholder.
#[derive(Debug, Deserialize)]
pub(crate) struct CoopWeaponSlot {
    #[serde(default)]
    pub weapon: Option<WeaponDto>,
    #[serde(default)]
    pub coop_special_weapon: Option<WeaponDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeaponDto {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

const ASSET_BASE: &str = "https://splatoon2.ink/assets/splatnet";

fn asset_url(path: Option<String>) -> Option<String> {
    path.map(|p| if p.starts_with("http") { p } else { format!("{}{}", ASSET_BASE, p) })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::Timestamp(secs.to_string()))
}

impl StageDto {
    fn into_stage(self) -> Stage {
        let id = self.id.unwrap_or_else(|| self.name.clone());
        Stage { id, name: self.name, image_url: asset_url(self.image) }
    }
}

fn rotations(mode: GameMode, list: Vec<Rotation>) -> Result<GameModeTimeline> {
    let mut events = Vec::with_capacity(list.len());
    for r in list {
        events.push(GameModeEvent {
            id: r.id.to_string(),
            mode,
            timeframe: EventTimeframe::new(timestamp(r.start_time)?, timestamp(r.end_time)?),
            rule: Rule { key: r.rule.key, name: r.rule.name },
            stages: vec![r.stage_a.into_stage(), r.stage_b.into_stage()],
        });
    }
    sort_by_start(&mut events);
    Ok(GameModeTimeline { mode, events })
}

fn coop(doc: CoopDocument) -> Result<CoopTimeline> {
    let mut details: HashMap<i64, CoopDetail> = doc.details.into_iter().map(|d| (d.start_time, d)).collect();

    let mut windows: Vec<CoopWindow> = doc.schedules;
    // Details may list shifts that the schedule list omits.
    for (start, d) in &details {
        if !windows.iter().any(|w| w.start_time == *start) {
            windows.push(CoopWindow { start_time: d.start_time, end_time: d.end_time });
        }
    }

    // Join each window with its details by start time; far-future shifts have none
    let mut events = Vec::with_capacity(windows.len());
    for w in windows {
        let detail = details.remove(&w.start_time);
        let (stage, weapons) = match detail {
            Some(d) => {
                let weapons = d
                    .weapons
                    .into_iter()
                    // Random slots only carry the special weapon entry
                    .filter_map(|slot| slot.weapon.or(slot.coop_special_weapon))
                    .map(|w| Weapon { name: w.name, image_url: asset_url(w.image) })
                    .collect();
                (Some(d.stage.into_stage()), weapons)
            }
            None => (None, Vec::new()),
        };
        events.push(CoopEvent {
            id: format!("coop-{}", w.start_time),
            kind: CoopKind::Regular,
            timeframe: EventTimeframe::new(timestamp(w.start_time)?, timestamp(w.end_time)?),
            stage,
            weapons,
        });
    }
    sort_by_start(&mut events);
    Ok(CoopTimeline { events })
}

/// Decode both Splatoon 2 documents into a schedule.
#[instrument(level = "info", skip(schedules, coop_schedules), fields(bytes = schedules.len() + coop_schedules.len()))]
pub fn decode(schedules: &str, coop_schedules: &str, fetched_at: DateTime<Utc>) -> Result<Schedule> {
    let doc: SchedulesDocument = parse_json(schedules, "Splatoon 2 schedules")?;
    let coop_doc: CoopDocument = parse_json(coop_schedules, "Splatoon 2 coop schedules")?;

    // "gachi" is what the API calls Ranked Battle
    let battles = vec![
        rotations(GameMode::Regular, doc.regular)?,
        rotations(GameMode::Ranked, doc.gachi)?,
        rotations(GameMode::League, doc.league)?,
    ];

    Ok(Schedule {
        game: Game::Splatoon2,
        fetched_at,
        battles,
        coop: coop(coop_doc)?,
        splatfest: None,
    })
}
