//! The callbacks a widget host makes, answered from a [`ScheduleStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{CoopEvent, Feed, Game, GameModeEvent, Splatfest};
use crate::schedule::Schedule;
use crate::source::ScheduleSource;
use crate::store::{Origin, ScheduleStore};
use crate::timeline::{self, Entry, ProjectionOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "events", rename_all = "snake_case")]
pub enum FeedEvents {
    Battle(Vec<GameModeEvent>),
    Coop(Vec<CoopEvent>),
    Splatfest(Vec<Splatfest>),
}

impl FeedEvents {
    pub fn len(&self) -> usize {
        match self {
            FeedEvents::Battle(v) => v.len(),
            FeedEvents::Coop(v) => v.len(),
            FeedEvents::Splatfest(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub date: DateTime<Utc>,
    pub feed: Feed,
    pub events: FeedEvents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetTimeline {
    pub origin: Origin,
    pub entries: Vec<FeedEntry>,
    pub reload_after: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub origin: Origin,
    pub entry: FeedEntry,
}

pub trait WidgetProvider {
    /// Shown before any data is available; never touches cache or network.
    fn placeholder(&self) -> FeedEntry;

    /// A single entry for `at`. `preview` asks for example data.
    fn snapshot(&self, at: DateTime<Utc>, preview: bool) -> Snapshot;

    fn timeline(&self, at: DateTime<Utc>) -> WidgetTimeline;
}

/// One feed of one game, backed by a fetch-and-cache store.
#[derive(Debug)]
pub struct ScheduleWidget<S> {
    game: Game,
    feed: Feed,
    store: ScheduleStore<S>,
    options: ProjectionOptions,
}

impl<S: ScheduleSource> ScheduleWidget<S> {
    pub fn new(game: Game, feed: Feed, store: ScheduleStore<S>) -> Result<Self> {
        if !game.supports(feed) {
            return Err(Error::UnsupportedFeed { game: game.to_string(), feed: feed.to_string() });
        }
        Ok(Self { game, feed, store, options: ProjectionOptions::default() })
    }

    pub fn with_options(mut self, options: ProjectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }

    fn example_entry(&self) -> FeedEntry {
        let example = Schedule::example(self.game);
        let at = example.first_start().unwrap_or(example.fetched_at);
        project_feed(&example, self.feed, at, &self.options)
            .0
            .into_iter()
            .next()
            .unwrap_or_else(|| empty_entry(self.feed, at))
    }
}

impl<S: ScheduleSource> WidgetProvider for ScheduleWidget<S> {
    fn placeholder(&self) -> FeedEntry {
        self.example_entry()
    }

    fn snapshot(&self, at: DateTime<Utc>, preview: bool) -> Snapshot {
        if preview {
            return Snapshot { origin: Origin::Bundled, entry: self.example_entry() };
        }
        let loaded = self.store.load(self.game, at);
        let entry = project_feed(&loaded.schedule, self.feed, at, &self.options)
            .0
            .into_iter()
            .next()
            .unwrap_or_else(|| empty_entry(self.feed, at));
        Snapshot { origin: loaded.origin, entry }
    }

    fn timeline(&self, at: DateTime<Utc>) -> WidgetTimeline {
        let loaded = self.store.load(self.game, at);
        let (entries, reload_after) = project_feed(&loaded.schedule, self.feed, at, &self.options);
        WidgetTimeline { origin: loaded.origin, entries, reload_after }
    }
}

fn empty_entry(feed: Feed, date: DateTime<Utc>) -> FeedEntry {
    let events = match feed {
        Feed::Battle(_) => FeedEvents::Battle(Vec::new()),
        Feed::Coop => FeedEvents::Coop(Vec::new()),
        Feed::Splatfest => FeedEvents::Splatfest(Vec::new()),
    };
    FeedEntry { date, feed, events }
}

fn wrap<E, F>(feed: Feed, entries: Vec<Entry<E>>, f: F) -> Vec<FeedEntry>
where
    F: Fn(Vec<E>) -> FeedEvents,
{
    entries
        .into_iter()
        .map(|e| FeedEntry { date: e.date, feed, events: f(e.events) })
        .collect()
}

/// Project the events `feed` selects from `schedule`.
pub fn project_feed(
    schedule: &Schedule,
    feed: Feed,
    at: DateTime<Utc>,
    options: &ProjectionOptions,
) -> (Vec<FeedEntry>, DateTime<Utc>) {
    match feed {
        Feed::Battle(mode) => {
            let p = timeline::project(schedule.battle_events(mode), at, options);
            (wrap(feed, p.entries, FeedEvents::Battle), p.reload_after)
        }
        Feed::Coop => {
            let p = timeline::project(&schedule.coop.events, at, options);
            (wrap(feed, p.entries, FeedEvents::Coop), p.reload_after)
        }
        Feed::Splatfest => {
            let fests: Vec<Splatfest> = schedule.splatfest.iter().cloned().collect();
            let p = timeline::project(&fests, at, options);
            (wrap(feed, p.entries, FeedEvents::Splatfest), p.reload_after)
        }
    }
}
