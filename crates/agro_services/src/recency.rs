use std::sync::Arc;

use agro_domain::{KvStoreInfra, NewRecentSearch, RecencyConfig, RecentSearch};
use anyhow::Context as _;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Newest-first, bounded list of recent searches kept under a single store
/// key.
///
/// Saves through one service instance are serialized, so concurrent callers
/// sharing it never lose each other's entries. Separate instances (or
/// processes) writing the same key still race and the last write wins.
pub struct RecencyService<S> {
    store: Arc<S>,
    config: RecencyConfig,
    write_lock: Mutex<()>,
}

impl<S> RecencyService<S> {
    /// A capacity of zero is raised to one so a saved record is always kept.
    pub fn new(store: Arc<S>, mut config: RecencyConfig) -> Self {
        config.capacity = config.capacity.max(1);
        Self { store, config, write_lock: Mutex::new(()) }
    }
}

impl<S: KvStoreInfra> RecencyService<S> {
    /// Returns the stored list, or an empty one when nothing is stored or the
    /// stored value cannot be read.
    pub async fn read_recent_searches(&self) -> Vec<RecentSearch> {
        match self.load().await {
            Ok(searches) => searches,
            Err(error) => {
                warn!(key = %self.config.key, error = ?error, "Failed to read recent searches");
                Vec::new()
            }
        }
    }

    /// Records `item` at the head of the list, evicting the oldest entries
    /// beyond capacity. Returns the stored record, or `None` if it could not
    /// be persisted.
    pub async fn save_recent_search(&self, item: NewRecentSearch) -> Option<RecentSearch> {
        let _guard = self.write_lock.lock().await;
        match self.prepend(item).await {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(key = %self.config.key, error = ?error, "Failed to save recent search");
                None
            }
        }
    }

    /// Drops the whole list. Returns whether the store accepted the removal.
    pub async fn clear_recent_searches(&self) -> bool {
        let _guard = self.write_lock.lock().await;
        match self.store.remove(&self.config.key).await {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.config.key, error = ?error, "Failed to clear recent searches");
                false
            }
        }
    }

    async fn load(&self) -> anyhow::Result<Vec<RecentSearch>> {
        let raw = self
            .store
            .get(&self.config.key)
            .await
            .context("Failed to read recent searches from store")?;

        match raw {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(&raw).context("Failed to deserialize recent searches")
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn prepend(&self, item: NewRecentSearch) -> anyhow::Result<RecentSearch> {
        let current = self.read_recent_searches().await;
        let entry = RecentSearch::new(item, chrono::Utc::now().timestamp_millis());

        let next = std::iter::once(entry.clone())
            .chain(current)
            .take(self.config.capacity)
            .collect::<Vec<_>>();
        let raw = serde_json::to_string(&next).context("Failed to serialize recent searches")?;

        self.store
            .set(&self.config.key, raw)
            .await
            .context("Failed to write recent searches to store")?;

        debug!(key = %self.config.key, id = %entry.id, count = next.len(), "Saved recent search");
        Ok(entry)
    }
}
