use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::model::{CoopEvent, CoopKind, Feed, Game, GameModeEvent, Splatfest, TimeframeEvent};
use crate::schedule::Schedule;
use crate::timeline;

fn base_event<E: TimeframeEvent>(game: Game, event: &E, stamp: DateTime<Utc>) -> Event {
    let tf = event.timeframe();
    Event::new()
        .uid(&format!("{}-{}@splat-timeline", game.key(), event.id()))
        .timestamp(stamp)
        .starts(tf.start_date)
        .ends(tf.end_date)
        .done()
}

fn battle_event(game: Game, e: &GameModeEvent, stamp: DateTime<Utc>) -> Event {
    let stages: Vec<&str> = e.stages.iter().map(|s| s.name.as_str()).collect();
    let mut ev = base_event(game, e, stamp);
    ev.summary(&format!("{}: {}", e.mode.name(), e.rule.name));
    ev.description(&stages.join(", "));
    ev
}

fn coop_event(game: Game, e: &CoopEvent, stamp: DateTime<Utc>) -> Event {
    let title = match e.kind {
        CoopKind::Regular => "Salmon Run",
        CoopKind::BigRun => "Big Run",
    };
    let stage = e.stage.as_ref().map(|s| s.name.as_str()).unwrap_or("Stage TBA");
    let weapons: Vec<&str> = e.weapons.iter().map(|w| w.name.as_str()).collect();
    let mut ev = base_event(game, e, stamp);
    ev.summary(&format!("{}: {}", title, stage));
    if !weapons.is_empty() {
        ev.description(&weapons.join(", "));
    }
    ev
}

fn fest_event(game: Game, f: &Splatfest, stamp: DateTime<Utc>) -> Event {
    let teams: Vec<&str> = f.teams.iter().map(|t| t.name.as_deref().unwrap_or(&t.id)).collect();
    let mut ev = base_event(game, f, stamp);
    ev.summary(&format!("Splatfest: {}", f.title));
    ev.description(&teams.join(" vs "));
    ev
}

/// Export the events of `feed` that are not over at `at` as an iCalendar document.
pub fn to_ics(schedule: &Schedule, feed: Feed, at: DateTime<Utc>) -> String {
    let game = schedule.game;
    let stamp = schedule.fetched_at;
    let mut calendar = Calendar::new();
    calendar.name(&format!("{} {}", game.name(), feed.name()));

    match feed {
        Feed::Battle(mode) => {
            for e in timeline::upcoming(schedule.battle_events(mode), at) {
                calendar.push(battle_event(game, e, stamp));
            }
        }
        Feed::Coop => {
            for e in timeline::upcoming(&schedule.coop.events, at) {
                calendar.push(coop_event(game, e, stamp));
            }
        }
        Feed::Splatfest => {
            if let Some(f) = schedule.splatfest.as_ref().filter(|f| !f.timeframe.is_over(at)) {
                calendar.push(fest_event(game, f, stamp));
            }
        }
    }

    calendar.done().to_string()
}
