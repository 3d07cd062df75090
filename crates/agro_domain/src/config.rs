use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.a0.dev/ai/llm";
pub const RECENT_SEARCHES_KEY: &str = "@recent_searches";
pub const RECENT_SEARCHES_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct HttpConfig {
    /// Seconds allowed for establishing a connection. Requests themselves
    /// carry no deadline.
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            user_agent: format!("agro/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct AdvisoryConfig {
    pub endpoint: Url,
    pub http: HttpConfig,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_COMPLETION_URL).expect("default completion URL is valid"),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct RecencyConfig {
    /// Store key holding the serialized list.
    pub key: String,
    /// Maximum number of records kept, newest first.
    pub capacity: usize,
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            key: RECENT_SEARCHES_KEY.to_string(),
            capacity: RECENT_SEARCHES_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(into)]
pub struct AgroConfig {
    pub advisory: AdvisoryConfig,
    pub recency: RecencyConfig,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let actual = AgroConfig::default();

        assert_eq!(actual.advisory.endpoint.as_str(), DEFAULT_COMPLETION_URL);
        assert_eq!(actual.advisory.http.connect_timeout_secs, 30);
        assert_eq!(actual.recency.key, "@recent_searches");
        assert_eq!(actual.recency.capacity, 20);
    }

    #[test]
    fn test_setters() {
        let actual = RecencyConfig::default().capacity(5usize).key("@history");

        let expected = RecencyConfig { key: "@history".to_string(), capacity: 5 };
        assert_eq!(actual, expected);
    }
}
