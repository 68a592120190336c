use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info, info_span};

use crate::config::Config;
use crate::decode;
use crate::error::{Error, Result};
use crate::model::Game;
use crate::schedule::Schedule;

/// Anything that can produce a fresh schedule for a game.
pub trait ScheduleSource {
    fn fetch(&self, game: Game, now: DateTime<Utc>) -> Result<Schedule>;
}

/// Fetches the public schedule dumps over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
    user_agent: String,
    splatoon2_base: String,
    splatoon3_base: String,
}

impl HttpSource {
    pub fn new(config: &Config) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.http_timeout_secs)))
            .build()
            .into();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
            splatoon2_base: config.splatoon2_base_url.trim_end_matches('/').to_string(),
            splatoon3_base: config.splatoon3_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = {
            let _span = info_span!("schedule_fetch", url = %url).entered();
            self.agent.get(url).header("User-Agent", &self.user_agent).call()
        };
        match response {
            Ok(response) => {
                let body = response
                    .into_body()
                    .read_to_string()
                    .map_err(|source| Error::Http { url: url.to_string(), source })?;
                info!(url = %url, bytes = body.len(), "Fetched schedule document");
                Ok(body)
            }
            Err(source) => {
                error!(error = %source, url = %url, "Schedule request failed");
                Err(Error::Http { url: url.to_string(), source })
            }
        }
    }
}

impl ScheduleSource for HttpSource {
    fn fetch(&self, game: Game, now: DateTime<Utc>) -> Result<Schedule> {
        match game {
            Game::Splatoon2 => {
                let schedules = self.get(&format!("{}/data/schedules.json", self.splatoon2_base))?;
                let coop = self.get(&format!("{}/data/coop-schedules.json", self.splatoon2_base))?;
                decode::splatoon2::decode(&schedules, &coop, now)
            }
            Game::Splatoon3 => {
                let body = self.get(&format!("{}/data/schedules.json", self.splatoon3_base))?;
                decode::splatoon3::decode(&body, now)
            }
        }
    }
}
