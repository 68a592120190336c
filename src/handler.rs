use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::cache::DiskCache;
use crate::config::{parse_timezone, Config};
use crate::format::entry_message;
use crate::model::{Feed, Game};
use crate::source::{HttpSource, ScheduleSource};
use crate::store::{Origin, ScheduleStore};
use crate::widget::{FeedEntry, ScheduleWidget, WidgetProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Placeholder,
    Snapshot,
    #[default]
    Timeline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub game: Game,
    pub feed: Feed,
    #[serde(default)]
    pub kind: Kind,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Reference time; the current time when absent.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub date: DateTime<Utc>,
    pub message: String,
    pub entry: FeedEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_after: Option<DateTime<Utc>>,
    pub entries: Vec<ResponseEntry>,
}

/// Answer one widget host request against `source`. Blocking.
pub fn respond<S: ScheduleSource>(request: &Request, config: &Config, source: S) -> crate::error::Result<Response> {
    let tz = match &request.timezone {
        Some(name) => parse_timezone(name)?,
        None => config.timezone,
    };
    let at = request.at.unwrap_or_else(Utc::now);
    let store = ScheduleStore::new(source, DiskCache::new(config.cache_dir.clone()), config.cache_ttl);
    let widget = ScheduleWidget::new(request.game, request.feed, store)?;

    let render = |entry: FeedEntry| ResponseEntry { date: entry.date, message: entry_message(&entry, tz), entry };

    let response = match request.kind {
        Kind::Placeholder => Response {
            origin: Origin::Bundled,
            reload_after: None,
            entries: vec![render(widget.placeholder())],
        },
        Kind::Snapshot => {
            let snapshot = widget.snapshot(at, request.preview);
            Response { origin: snapshot.origin, reload_after: None, entries: vec![render(snapshot.entry)] }
        }
        Kind::Timeline => {
            let timeline = widget.timeline(at);
            Response {
                origin: timeline.origin,
                reload_after: Some(timeline.reload_after),
                entries: timeline.entries.into_iter().map(render).collect(),
            }
        }
    };
    Ok(response)
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;
    let config = Config::from_env()?;

    // The fetch is blocking I/O; the task must own its inputs.
    let game = payload.game;
    let feed = payload.feed;
    let joined = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config);
        respond(&payload, &config, source)
    })
    .await;

    match joined {
        Ok(Ok(response)) => {
            info!(game = game.key(), feed = feed.key(), origin = ?response.origin, entries = response.entries.len(), "Prepared widget response");
            Ok(response)
        }
        Ok(Err(e)) => {
            error!(error = %e, "Widget request failed");
            Err(e.into())
        }
        Err(e) => {
            error!(error = %e, "Widget task join error");
            Err(e.into())
        }
    }
}
