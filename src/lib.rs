pub mod cache;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod handler;
pub mod ical;
pub mod model;
pub mod schedule;
pub mod source;
pub mod store;
pub mod timeline;
pub mod widget;

pub use error::{Error, Result};
