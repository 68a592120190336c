pub mod splatoon2;
pub mod splatoon3;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::TimeframeEvent;

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, what: &'static str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Decode { what, source })
}

pub(crate) fn sort_by_start<E: TimeframeEvent>(events: &mut [E]) {
    events.sort_by_key(|e| e.timeframe().start_date);
}
