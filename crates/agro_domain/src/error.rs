/// Faults raised while building an outgoing completion request. Everything
/// that happens after the request leaves the process degrades to a fallback
/// instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to serialize completion request: {0}")]
    RequestSerialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
