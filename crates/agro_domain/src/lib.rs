mod advisory;
mod config;
mod error;
mod infra;
mod message;
mod prompt;
mod recent_search;
mod soil;

pub use advisory::*;
pub use config::*;
pub use error::*;
pub use infra::*;
pub use message::*;
pub use prompt::*;
pub use recent_search::*;
pub use soil::*;
