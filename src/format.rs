use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::model::{CoopEvent, CoopKind, EventStatus, GameModeEvent, Splatfest, TimeframeEvent};
use crate::widget::{FeedEntry, FeedEvents};

fn local(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%a %b %e %-I:%M %p").to_string()
}

fn local_time(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// "Now", "Next", or the start time, for the `index`-th event of an entry.
fn label<E: TimeframeEvent>(event: &E, index: usize, at: DateTime<Utc>, tz: Tz) -> String {
    match event.timeframe().status(at) {
        EventStatus::Active => "Now".to_string(),
        EventStatus::Soon if index <= 1 => "Next".to_string(),
        EventStatus::Soon => local(event.timeframe().start_date, tz),
        EventStatus::Over => "Ended".to_string(),
    }
}

fn range<E: TimeframeEvent>(event: &E, tz: Tz) -> String {
    let tf = event.timeframe();
    let span = tf.end_date - tf.start_date;
    // Shifts and festivals run for days; show full dates for both ends.
    if span.num_hours() >= 24 {
        format!("{} - {}", local(tf.start_date, tz), local(tf.end_date, tz))
    } else {
        format!("{} - {}", local_time(tf.start_date, tz), local_time(tf.end_date, tz))
    }
}

fn battle_line(event: &GameModeEvent, index: usize, at: DateTime<Utc>, tz: Tz) -> String {
    let stages: Vec<&str> = event.stages.iter().map(|s| s.name.as_str()).collect();
    format!(
        "{}: {} ({})\n  {}",
        label(event, index, at, tz),
        event.rule.name,
        range(event, tz),
        stages.join(", ")
    )
}

fn coop_line(event: &CoopEvent, index: usize, at: DateTime<Utc>, tz: Tz) -> String {
    let kind = match event.kind {
        CoopKind::Regular => "",
        CoopKind::BigRun => " [Big Run]",
    };
    let stage = event.stage.as_ref().map(|s| s.name.as_str()).unwrap_or("Stage TBA");
    let mut line = format!("{}: {}{} ({})", label(event, index, at, tz), stage, kind, range(event, tz));
    if !event.weapons.is_empty() {
        let weapons: Vec<&str> = event.weapons.iter().map(|w| w.name.as_str()).collect();
        line.push_str("\n  ");
        line.push_str(&weapons.join(", "));
    }
    line
}

fn fest_line(fest: &Splatfest, index: usize, at: DateTime<Utc>, tz: Tz) -> String {
    let teams: Vec<String> = fest
        .teams
        .iter()
        .map(|t| format!("{} {}", t.name.as_deref().unwrap_or(&t.id), t.color.to_hex()))
        .collect();
    let mut line = format!(
        "{}: {} ({})\n  {} | {}",
        label(fest, index, at, tz),
        fest.title,
        range(fest, tz),
        fest.state_at(at).label(),
        teams.join(" vs ")
    );
    if let Some(stage) = &fest.tricolor_stage {
        line.push_str("\n  Tricolor: ");
        line.push_str(&stage.name);
    }
    line
}

/// Render an entry as plain text in `tz`.
pub fn entry_message(entry: &FeedEntry, tz: Tz) -> String {
    let at = entry.date;
    let mut lines = vec![entry.feed.name().to_string()];
    match &entry.events {
        FeedEvents::Battle(events) => {
            lines.extend(events.iter().enumerate().map(|(i, e)| battle_line(e, i, at, tz)));
        }
        FeedEvents::Coop(events) => {
            lines.extend(events.iter().enumerate().map(|(i, e)| coop_line(e, i, at, tz)));
        }
        FeedEvents::Splatfest(fests) => {
            lines.extend(fests.iter().enumerate().map(|(i, f)| fest_line(f, i, at, tz)));
        }
    }
    if entry.events.is_empty() {
        lines.push("No upcoming events".to_string());
    }
    lines.join("\n")
}
