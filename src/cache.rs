use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::model::Game;
use crate::schedule::Schedule;

/// One JSON file per game holding the last fetched schedule.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, game: Game) -> PathBuf {
        self.dir.join(format!("{}-schedule.json", game.key()))
    }

    /// `Ok(None)` when nothing has been cached for `game` yet.
    #[instrument(level = "debug", skip(self), fields(game = game.key()))]
    pub fn load(&self, game: Game) -> Result<Option<Schedule>> {
        let path = self.path_for(game);
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cached schedule");
                return Ok(None);
            }
            Err(source) => return Err(Error::CacheIo { path, source }),
        };
        let schedule: Schedule =
            serde_json::from_str(&body).map_err(|source| Error::Decode { what: "cached schedule", source })?;
        Ok(Some(schedule))
    }

    /// Write via a temp file and rename so readers never see a partial file.
    #[instrument(level = "debug", skip(self, schedule), fields(game = schedule.game.key()))]
    pub fn store(&self, schedule: &Schedule) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::CacheIo { path: self.dir.clone(), source })?;
        let path = self.path_for(schedule.game);
        // Per-process temp name so two writers never share a half-written file
        let tmp = path.with_extension(format!("json.{}.tmp", std::process::id()));
        let body = serde_json::to_vec(schedule).map_err(Error::CacheEncode)?;
        let written = fs::write(&tmp, body)
            .map_err(|source| Error::CacheIo { path: tmp.clone(), source })
            .and_then(|()| fs::rename(&tmp, &path).map_err(|source| Error::CacheIo { path: path.clone(), source }));
        if let Err(e) = written {
            // Don't leave the temp file behind when the write or rename fails
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        info!(path = %path.display(), fetched_at = %schedule.fetched_at, "Cached schedule");
        Ok(())
    }
}
