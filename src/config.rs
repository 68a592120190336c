use std::env;
use std::path::PathBuf;

use chrono::Duration;
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::schedule::DEFAULT_TTL_MINUTES;

pub const DEFAULT_SPLATOON2_BASE_URL: &str = "https://splatoon2.ink";
pub const DEFAULT_SPLATOON3_BASE_URL: &str = "https://splatoon3.ink";
pub const DEFAULT_USER_AGENT: &str = concat!("splat-timeline/", env!("CARGO_PKG_VERSION"));
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub timezone: Tz,
    pub user_agent: String,
    pub splatoon2_base_url: String,
    pub splatoon3_base_url: String,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
            timezone: Tz::UTC,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            splatoon2_base_url: DEFAULT_SPLATOON2_BASE_URL.to_string(),
            splatoon3_base_url: DEFAULT_SPLATOON3_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("splat-timeline")
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| Error::UnknownTimeZone(name.to_string()))
}

impl Config {
    /// Build from `SPLAT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(dir) = get("SPLAT_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(minutes) = get("SPLAT_CACHE_TTL_MINUTES") {
            let parsed = minutes
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or(Error::Config { key: "SPLAT_CACHE_TTL_MINUTES", value: minutes.clone() })?;
            config.cache_ttl = Duration::minutes(parsed);
        }
        if let Some(tz) = get("SPLAT_TIMEZONE") {
            config.timezone = parse_timezone(&tz)?;
        }
        if let Some(ua) = get("SPLAT_USER_AGENT") {
            config.user_agent = ua;
        }
        if let Some(url) = get("SPLAT2_BASE_URL") {
            config.splatoon2_base_url = url;
        }
        if let Some(url) = get("SPLAT3_BASE_URL") {
            config.splatoon3_base_url = url;
        }
        if let Some(secs) = get("SPLAT_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::Config { key: "SPLAT_HTTP_TIMEOUT_SECS", value: secs.clone() })?;
        }
        Ok(config)
    }
}
