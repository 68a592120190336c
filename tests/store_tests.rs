use std::cell::Cell;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};

use splat_timeline::cache::DiskCache;
use splat_timeline::decode::splatoon3;
use splat_timeline::model::{Game, GameMode};
use splat_timeline::schedule::{default_ttl, Schedule};
use splat_timeline::source::ScheduleSource;
use splat_timeline::store::{Origin, ScheduleStore};
use splat_timeline::{Error, Result};

const S3: &str = include_str!("../data/splatoon3-schedules.json");

/// Serves the bundled Splatoon 3 document and counts calls.
struct FixtureSource {
    calls: Cell<usize>,
}

impl FixtureSource {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl ScheduleSource for FixtureSource {
    fn fetch(&self, _game: Game, now: DateTime<Utc>) -> Result<Schedule> {
        self.calls.set(self.calls.get() + 1);
        splatoon3::decode(S3, now)
    }
}

struct OfflineSource;

impl ScheduleSource for OfflineSource {
    fn fetch(&self, game: Game, _now: DateTime<Utc>) -> Result<Schedule> {
        Err(Error::UnknownGame(format!("{} is offline", game.key())))
    }
}

fn temp_cache() -> (DiskCache, PathBuf) {
    let dir = std::env::temp_dir().join(format!("splat_timeline_it_{}", uuid::Uuid::new_v4()));
    (DiskCache::new(dir.clone()), dir)
}

fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.to_string_lossy().ends_with(".tmp"))
                .collect()
        })
        .unwrap_or_default()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 10, 1, 0, 0).unwrap()
}

#[test]
fn cache_load_missing_is_none() {
    let (cache, _dir) = temp_cache();
    assert!(cache.load(Game::Splatoon3).expect("load failed").is_none());
}

#[test]
fn cache_store_then_load_keeps_schedule() {
    let (cache, dir) = temp_cache();
    let schedule = splatoon3::decode(S3, now()).expect("decode failed");
    cache.store(&schedule).expect("store failed");

    assert!(dir.join("splatoon3-schedule.json").exists());
    assert!(leftover_temp_files(&dir).is_empty());

    let loaded = cache.load(Game::Splatoon3).expect("load failed").expect("expected cached schedule");
    assert_eq!(loaded.fetched_at, schedule.fetched_at);
    assert_eq!(loaded.battle_events(GameMode::X).len(), 3);
    assert_eq!(loaded.splatfest.map(|f| f.title), schedule.splatfest.map(|f| f.title));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn fetches_when_cache_empty_and_writes_it() {
    let (cache, dir) = temp_cache();
    let store = ScheduleStore::new(FixtureSource::new(), cache.clone(), default_ttl());

    let loaded = store.load(Game::Splatoon3, now());
    assert_eq!(loaded.origin, Origin::Network);
    assert_eq!(loaded.schedule.fetched_at, now());
    assert!(cache.load(Game::Splatoon3).expect("load failed").is_some());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn fresh_cache_skips_network() {
    let (cache, dir) = temp_cache();
    let source = FixtureSource::new();
    let store = ScheduleStore::new(source, cache, default_ttl());

    assert_eq!(store.load(Game::Splatoon3, now()).origin, Origin::Network);
    let second = store.load(Game::Splatoon3, now() + Duration::minutes(59));
    assert_eq!(second.origin, Origin::Cache);
    assert_eq!(second.schedule.fetched_at, now());

    let third = store.load(Game::Splatoon3, now() + Duration::minutes(60));
    assert_eq!(third.origin, Origin::Network);
    assert_eq!(third.schedule.fetched_at, now() + Duration::minutes(60));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn stale_cache_used_when_fetch_fails() {
    let (cache, dir) = temp_cache();
    let schedule = splatoon3::decode(S3, now()).expect("decode failed");
    cache.store(&schedule).expect("store failed");

    let store = ScheduleStore::new(OfflineSource, cache, default_ttl());
    let loaded = store.load(Game::Splatoon3, now() + Duration::hours(3));
    assert_eq!(loaded.origin, Origin::StaleCache);
    assert_eq!(loaded.schedule.fetched_at, now());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn bundled_data_when_nothing_else() {
    let (cache, dir) = temp_cache();
    let store = ScheduleStore::new(OfflineSource, cache, default_ttl());
    let loaded = store.load(Game::Splatoon2, now());
    assert_eq!(loaded.origin, Origin::Bundled);
    assert_eq!(loaded.schedule.game, Game::Splatoon2);
    assert_eq!(loaded.schedule.battle_events(GameMode::League).len(), 3);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn corrupt_cache_is_ignored() {
    let (cache, dir) = temp_cache();
    std::fs::create_dir_all(&dir).expect("mkdir failed");
    std::fs::write(cache.path_for(Game::Splatoon3), "{ truncated").expect("write failed");

    assert!(matches!(cache.load(Game::Splatoon3), Err(Error::Decode { .. })));

    let store = ScheduleStore::new(FixtureSource::new(), cache, default_ttl());
    assert_eq!(store.load(Game::Splatoon3, now()).origin, Origin::Network);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn failed_store_leaves_no_temp_file() {
    // Arrange: a non-empty directory where the cache file belongs makes the rename fail
    let (cache, dir) = temp_cache();
    let blocker = cache.path_for(Game::Splatoon3);
    std::fs::create_dir_all(blocker.join("occupied")).expect("mkdir failed");
    let schedule = splatoon3::decode(S3, now()).expect("decode failed");

    // Act
    let result = cache.store(&schedule);

    // Assert
    assert!(matches!(result, Err(Error::CacheIo { .. })), "store returned {:?}", result);
    assert!(leftover_temp_files(&dir).is_empty(), "left behind: {:?}", leftover_temp_files(&dir));
    let _ = std::fs::remove_dir_all(dir);
}
