//! Key-value store backends.

mod cacache_store;
mod memory_store;

pub use cacache_store::CacacheKvStore;
pub use memory_store::MemoryKvStore;
