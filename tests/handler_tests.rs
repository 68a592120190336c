use chrono::{DateTime, TimeZone, Utc};

use splat_timeline::config::Config;
use splat_timeline::decode::splatoon3;
use splat_timeline::handler::{respond, Kind, Request};
use splat_timeline::model::{Feed, Game, GameMode};
use splat_timeline::schedule::Schedule;
use splat_timeline::source::ScheduleSource;
use splat_timeline::store::Origin;
use splat_timeline::{Error, Result};

const S3: &str = include_str!("../data/splatoon3-schedules.json");

struct FixtureSource;

impl ScheduleSource for FixtureSource {
    fn fetch(&self, _game: Game, now: DateTime<Utc>) -> Result<Schedule> {
        splatoon3::decode(S3, now)
    }
}

fn config() -> Config {
    Config {
        cache_dir: std::env::temp_dir().join(format!("splat_timeline_handler_{}", uuid::Uuid::new_v4())),
        ..Config::default()
    }
}

#[test]
fn request_deserializes_with_defaults() {
    let json = serde_json::json!({ "game": "splatoon3", "feed": "salmon_run" });
    let req: Request = serde_json::from_value(json).unwrap();
    assert_eq!(req.game, Game::Splatoon3);
    assert_eq!(req.feed, Feed::Coop);
    assert_eq!(req.kind, Kind::Timeline);
    assert!(!req.preview);
    assert!(req.timezone.is_none());
    assert!(req.at.is_none());

    let json2 = serde_json::json!({
        "game": "splatoon2",
        "feed": "league",
        "kind": "snapshot",
        "timezone": "Asia/Tokyo",
        "at": "2019-01-01T01:00:00Z"
    });
    let req2: Request = serde_json::from_value(json2).unwrap();
    assert_eq!(req2.feed, Feed::Battle(GameMode::League));
    assert_eq!(req2.kind, Kind::Snapshot);
    assert_eq!(req2.at, Some(Utc.with_ymd_and_hms(2019, 1, 1, 1, 0, 0).unwrap()));

    assert!(serde_json::from_value::<Request>(serde_json::json!({ "game": "splatoon3", "feed": "nope" })).is_err());
}

#[test]
fn timeline_response_renders_local_times() {
    let json = serde_json::json!({
        "game": "splatoon3",
        "feed": "regular",
        "timezone": "America/Los_Angeles",
        "at": "2023-01-10T01:00:00Z"
    });
    let req: Request = serde_json::from_value(json).unwrap();
    let config = config();
    let resp = respond(&req, &config, FixtureSource).expect("respond failed");
    let _ = std::fs::remove_dir_all(&config.cache_dir);

    assert_eq!(resp.origin, Origin::Network);
    assert_eq!(resp.reload_after, Some(Utc.with_ymd_and_hms(2023, 1, 10, 2, 0, 0).unwrap()));
    assert_eq!(resp.entries.len(), 3);

    let msg = &resp.entries[0].message;
    assert!(msg.starts_with("Regular Battle\n"), "message was: {}", msg);
    assert!(msg.contains("Now: Turf War (4:00 PM - 6:00 PM)"), "message was: {}", msg);
    assert!(msg.contains("Scorch Gorge, Eeltail Alley"), "message was: {}", msg);
    assert!(msg.contains("Next: Turf War (6:00 PM - 8:00 PM)"), "message was: {}", msg);
}

#[test]
fn snapshot_and_placeholder_responses() {
    let mut req: Request = serde_json::from_value(serde_json::json!({
        "game": "splatoon3",
        "feed": "splatfest",
        "kind": "snapshot",
        "at": "2023-01-10T01:00:00Z"
    }))
    .unwrap();
    let config = config();
    let resp = respond(&req, &config, FixtureSource).expect("respond failed");
    assert!(resp.reload_after.is_none());
    assert_eq!(resp.entries.len(), 1);
    let msg = &resp.entries[0].message;
    assert!(msg.contains("Which is more important"), "message was: {}", msg);
    assert!(msg.contains("Gear #e6c839"), "message was: {}", msg);
    assert!(msg.contains("Tricolor: Scorch Gorge"), "message was: {}", msg);

    req.kind = Kind::Placeholder;
    let resp = respond(&req, &config, FixtureSource).expect("respond failed");
    assert_eq!(resp.origin, Origin::Bundled);
    assert_eq!(resp.entries.len(), 1);
    let _ = std::fs::remove_dir_all(&config.cache_dir);
}

#[test]
fn bad_timezone_is_an_error() {
    let req: Request = serde_json::from_value(serde_json::json!({
        "game": "splatoon3",
        "feed": "x",
        "timezone": "Nowhere/Special"
    }))
    .unwrap();
    let config = config();
    assert!(matches!(respond(&req, &config, FixtureSource), Err(Error::UnknownTimeZone(_))));
    let _ = std::fs::remove_dir_all(&config.cache_dir);
}
