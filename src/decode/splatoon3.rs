//! splatoon3.ink `schedules.json`, a dump of the SplatNet GraphQL response.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::decode::{parse_json, sort_by_start};
use crate::error::{Error, Result};
use crate::model::{
    Color, CoopEvent, CoopKind, EventTimeframe, FestState, FestTeam, Game, GameMode, GameModeEvent, Rule, Splatfest,
    Stage, Weapon,
};
use crate::schedule::{CoopTimeline, GameModeTimeline, Schedule};

#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    pub data: Data,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Data {
    #[serde(default)]
    pub regular_schedules: Nodes<RegularNode>,
    #[serde(default)]
    pub bankara_schedules: Nodes<BankaraNode>,
    #[serde(default)]
    pub x_schedules: Nodes<XNode>,
    #[serde(default)]
    pub fest_schedules: Nodes<FestNode>,
    #[serde(default)]
    pub coop_grouping_schedule: Option<CoopGrouping>,
    #[serde(default)]
    pub current_fest: Option<FestDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegularNode {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub regular_match_setting: Option<MatchSetting>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BankaraNode {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub bankara_match_settings: Option<Vec<MatchSetting>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct XNode {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub x_match_setting: Option<MatchSetting>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FestNode {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub fest_match_settings: Option<Vec<MatchSetting>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchSetting {
    pub vs_stages: Vec<VsStage>,
    pub vs_rule: VsRule,
    #[serde(default)]
    pub bankara_mode: Option<String>,
    #[serde(default)]
    pub fest_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VsStage {
    #[serde(default)]
    pub vs_stage_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VsRule {
    pub name: String,
    pub rule: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Image {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CoopGrouping {
    #[serde(default)]
    pub regular_schedules: Nodes<CoopNode>,
    #[serde(default)]
    pub big_run_schedules: Nodes<CoopNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CoopNode {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub setting: Option<CoopSetting>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CoopSetting {
    #[serde(default)]
    pub coop_stage: Option<CoopStage>,
    #[serde(default)]
    pub weapons: Vec<CoopWeapon>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoopStage {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoopWeapon {
    pub name: String,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FestDto {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub midterm_time: Option<String>,
    pub state: String,
    #[serde(default)]
    pub teams: Vec<FestTeamDto>,
    #[serde(default)]
    pub tricolor_stage: Option<CoopStage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FestTeamDto {
    pub id: String,
    #[serde(default)]
    pub team_name: Option<String>,
    pub color: Color,
}

fn timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::Timestamp(s.to_string()))
}

fn timeframe(start: &str, end: &str) -> Result<EventTimeframe> {
    Ok(EventTimeframe::new(timestamp(start)?, timestamp(end)?))
}

fn stage(s: VsStage) -> Stage {
    Stage {
        id: s.vs_stage_id.map(|id| id.to_string()).unwrap_or_else(|| s.name.clone()),
        name: s.name,
        image_url: s.image.map(|i| i.url),
    }
}

fn coop_stage(s: CoopStage) -> Stage {
    Stage {
        id: s.id.unwrap_or_else(|| s.name.clone()),
        name: s.name,
        image_url: s.image.map(|i| i.url),
    }
}

fn event(mode: GameMode, tf: EventTimeframe, setting: MatchSetting) -> GameModeEvent {
    GameModeEvent {
        id: format!("{}-{}", mode.key(), tf.start_date.timestamp()),
        mode,
        timeframe: tf,
        rule: Rule { key: setting.vs_rule.rule, name: setting.vs_rule.name },
        stages: setting.vs_stages.into_iter().map(stage).collect(),
    }
}

/// Accumulates events per mode while walking the node lists.
struct Battles {
    timelines: Vec<GameModeTimeline>,
}

impl Battles {
    fn new() -> Self {
        let timelines = Game::Splatoon3
            .modes()
            .iter()
            .map(|mode| GameModeTimeline { mode: *mode, events: Vec::new() })
            .collect();
        Self { timelines }
    }

    fn push(&mut self, mode: GameMode, tf: EventTimeframe, setting: MatchSetting) {
        if let Some(t) = self.timelines.iter_mut().find(|t| t.mode == mode) {
            t.events.push(event(mode, tf, setting));
        }
    }

    fn finish(mut self) -> Vec<GameModeTimeline> {
        for t in &mut self.timelines {
            sort_by_start(&mut t.events);
        }
        self.timelines
    }
}

fn bankara_mode(setting: &MatchSetting) -> Option<GameMode> {
    match setting.bankara_mode.as_deref() {
        Some("CHALLENGE") => Some(GameMode::AnarchySeries),
        Some("OPEN") => Some(GameMode::AnarchyOpen),
        _ => None,
    }
}

fn fest_mode(setting: &MatchSetting) -> Option<GameMode> {
    match setting.fest_mode.as_deref() {
        Some("REGULAR") => Some(GameMode::SplatfestOpen),
        Some("CHALLENGE") => Some(GameMode::SplatfestPro),
        _ => None,
    }
}

fn coop_events(kind: CoopKind, nodes: Vec<CoopNode>) -> Result<Vec<CoopEvent>> {
    let prefix = match kind {
        CoopKind::Regular => "coop",
        CoopKind::BigRun => "bigrun",
    };
    nodes
        .into_iter()
        .map(|n| {
            let tf = timeframe(&n.start_time, &n.end_time)?;
            let (stage, weapons) = match n.setting {
                Some(s) => (
                    s.coop_stage.map(coop_stage),
                    s.weapons
                        .into_iter()
                        .map(|w| Weapon { name: w.name, image_url: w.image.map(|i| i.url) })
                        .collect(),
                ),
                None => (None, Vec::new()),
            };
            Ok(CoopEvent {
                id: format!("{}-{}", prefix, tf.start_date.timestamp()),
                kind,
                timeframe: tf,
                stage,
                weapons,
            })
        })
        .collect()
}

fn fest_state(s: &str) -> FestState {
    match s {
        "FIRST_HALF" => FestState::FirstHalf,
        "SECOND_HALF" => FestState::SecondHalf,
        "CLOSED" => FestState::Closed,
        _ => FestState::Scheduled,
    }
}

fn splatfest(f: FestDto) -> Result<Splatfest> {
    let midterm = f.midterm_time.as_deref().map(timestamp).transpose()?;
    Ok(Splatfest {
        timeframe: timeframe(&f.start_time, &f.end_time)?,
        midterm,
        state: fest_state(&f.state),
        teams: f
            .teams
            .into_iter()
            .map(|t| FestTeam { id: t.id, name: t.team_name, color: t.color })
            .collect(),
        tricolor_stage: f.tricolor_stage.map(coop_stage),
        id: f.id,
        title: f.title,
    })
}

/// Decode the Splatoon 3 schedules document.
#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode(body: &str, fetched_at: DateTime<Utc>) -> Result<Schedule> {
    let doc: Document = parse_json(body, "Splatoon 3 schedules")?;
    let data = doc.data;
    let mut battles = Battles::new();

    for n in data.regular_schedules.nodes {
        // Regular settings are null while a Splatfest runs.
        if let Some(setting) = n.regular_match_setting {
            battles.push(GameMode::Regular, timeframe(&n.start_time, &n.end_time)?, setting);
        }
    }
    // Each anarchy node carries both the Series (CHALLENGE) and Open settings
    for n in data.bankara_schedules.nodes {
        let tf = timeframe(&n.start_time, &n.end_time)?;
        for setting in n.bankara_match_settings.unwrap_or_default() {
            match bankara_mode(&setting) {
                Some(mode) => battles.push(mode, tf, setting),
                None => debug!(mode = ?setting.bankara_mode, "Skipping unknown anarchy mode"),
            }
        }
    }
    for n in data.x_schedules.nodes {
        if let Some(setting) = n.x_match_setting {
            battles.push(GameMode::X, timeframe(&n.start_time, &n.end_time)?, setting);
        }
    }
    // Fest settings are null outside a Splatfest
    for n in data.fest_schedules.nodes {
        let tf = timeframe(&n.start_time, &n.end_time)?;
        for setting in n.fest_match_settings.unwrap_or_default() {
            match fest_mode(&setting) {
                Some(mode) => battles.push(mode, tf, setting),
                None => debug!(mode = ?setting.fest_mode, "Skipping unknown splatfest mode"),
            }
        }
    }

    // Big Run shifts share the coop timeline with regular shifts
    let mut coop = Vec::new();
    if let Some(grouping) = data.coop_grouping_schedule {
        coop.extend(coop_events(CoopKind::Regular, grouping.regular_schedules.nodes)?);
        coop.extend(coop_events(CoopKind::BigRun, grouping.big_run_schedules.nodes)?);
    }
    sort_by_start(&mut coop);

    let splatfest = data.current_fest.map(splatfest).transpose()?;

    Ok(Schedule {
        game: Game::Splatoon3,
        fetched_at,
        battles: battles.finish(),
        coop: CoopTimeline { events: coop },
        splatfest,
    })
}
