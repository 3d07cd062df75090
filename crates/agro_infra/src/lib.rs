mod env;
mod http;
mod kv;

pub use env::*;
pub use http::*;
pub use kv::*;
