use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid timestamp {0:?}")]
    Timestamp(String),
    #[error("Cache I/O failed at {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode schedule for cache: {0}")]
    CacheEncode(#[source] serde_json::Error),
    #[error("Unknown game {0:?}")]
    UnknownGame(String),
    #[error("Unknown feed {0:?}")]
    UnknownFeed(String),
    #[error("{feed} is not available for {game}")]
    UnsupportedFeed { game: String, feed: String },
    #[error("Unknown time zone {0:?}")]
    UnknownTimeZone(String),
    #[error("Invalid configuration value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
}
