mod advisory;
mod recency;
mod sections;

pub use advisory::*;
pub use recency::*;
pub use sections::*;
