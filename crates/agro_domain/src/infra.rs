use bytes::Bytes;
use reqwest::Response;
use reqwest::header::HeaderMap;
use url::Url;

/// HTTP transport used to reach the completion service.
#[async_trait::async_trait]
pub trait HttpInfra: Send + Sync + 'static {
    async fn http_post(
        &self,
        url: &Url,
        headers: Option<HeaderMap>,
        body: Bytes,
    ) -> anyhow::Result<Response>;
}

/// Durable string key-value storage. A `set` replaces the whole value of a
/// key in one step as far as callers can observe.
#[async_trait::async_trait]
pub trait KvStoreInfra: Send + Sync + 'static {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
