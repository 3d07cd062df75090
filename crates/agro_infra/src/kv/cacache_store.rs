use std::path::PathBuf;

use agro_domain::KvStoreInfra;
use anyhow::Context as _;
use cacache::RemoveOpts;
use tracing::{debug, warn};

/// Durable store on top of cacache's content-addressable cache.
///
/// Each `set` writes the content first and then appends an index entry
/// pointing at it, so readers see either the previous or the new value of a
/// key, never a partial one. Content is integrity-checked on read.
///
/// Content replaced by `set` or dropped by `remove` is deleted from disk.
/// Keys must therefore not share identical values: content is addressed by
/// hash, and dropping it for one key invalidates the other.
pub struct CacacheKvStore {
    cache_dir: PathBuf,
}

impl CacacheKvStore {
    /// Opens the store rooted at `cache_dir`. The directory is created on
    /// first write.
    pub fn open(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into() }
    }
}

fn is_not_found(error: &cacache::Error) -> bool {
    matches!(error, cacache::Error::EntryNotFound(..))
}

#[async_trait::async_trait]
impl KvStoreInfra for CacacheKvStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match cacache::read(&self.cache_dir, key).await {
            Ok(data) => {
                let value = String::from_utf8(data)
                    .with_context(|| format!("Stored value for {key} is not UTF-8"))?;
                Ok(Some(value))
            }
            Err(error) if is_not_found(&error) => {
                debug!(key, "Key not present in store");
                Ok(None)
            }
            Err(error) => Err(error).with_context(|| format!("Failed to read {key} from store")),
        }
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        let previous = cacache::metadata(&self.cache_dir, key)
            .await
            .with_context(|| format!("Failed to read {key} metadata from store"))?;

        let integrity = cacache::write(&self.cache_dir, key, value.as_bytes())
            .await
            .with_context(|| format!("Failed to write {key} to store"))?;

        // The new value is already committed; a leftover blob only costs space.
        if let Some(previous) = previous.filter(|previous| previous.integrity != integrity) {
            if let Err(error) = cacache::remove_hash(&self.cache_dir, &previous.integrity).await {
                warn!(key, error = ?error, "Failed to drop replaced content");
            }
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let present = cacache::metadata(&self.cache_dir, key)
            .await
            .with_context(|| format!("Failed to read {key} metadata from store"))?
            .is_some();
        if !present {
            return Ok(());
        }

        match RemoveOpts::new().remove_fully(true).remove(&self.cache_dir, key).await {
            Ok(()) => Ok(()),
            Err(error) if is_not_found(&error) => Ok(()),
            Err(error) => Err(error).with_context(|| format!("Failed to remove {key} from store")),
        }
    }
}
