pub mod event;
pub mod game;
pub mod splatfest;
pub mod timeframe;

pub use event::{CoopEvent, CoopKind, GameModeEvent, Rule, Stage, Weapon};
pub use game::{Feed, Game, GameMode};
pub use splatfest::{Color, FestState, FestTeam, Splatfest};
pub use timeframe::{EventStatus, EventTimeframe, TimeframeEvent};
