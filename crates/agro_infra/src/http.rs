use std::time::Duration;

use agro_domain::{HttpConfig, HttpInfra};
use anyhow::Context as _;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

/// reqwest-backed transport for the completion service.
#[derive(Clone)]
pub struct AgroHttpService {
    client: Client,
}

impl AgroHttpService {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    async fn post(
        &self,
        url: &Url,
        headers: Option<HeaderMap>,
        body: Bytes,
    ) -> anyhow::Result<Response> {
        let headers = headers.unwrap_or_default();
        debug!(url = %url, headers = ?headers, bytes = body.len(), "POST");

        self.client
            .post(url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .with_context(|| format!("POST request to {url} failed"))
    }
}

#[async_trait::async_trait]
impl HttpInfra for AgroHttpService {
    async fn http_post(
        &self,
        url: &Url,
        headers: Option<HeaderMap>,
        body: Bytes,
    ) -> anyhow::Result<Response> {
        self.post(url, headers, body).await
    }
}
