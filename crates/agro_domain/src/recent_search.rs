use derive_more::{Display, From};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Identifier of a recent search: the creation time in base 36 followed by a
/// random hex suffix, so two records created in the same millisecond still
/// differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct RecentSearchId(String);

impl RecentSearchId {
    pub fn generate(timestamp_ms: i64) -> Self {
        let millis = u64::try_from(timestamp_ms).unwrap_or_default();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", to_base36(millis), &suffix[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|&digit| digit as char).collect()
}

/// A persisted entry of the recency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub id: RecentSearchId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
}

impl RecentSearch {
    pub fn new(item: NewRecentSearch, timestamp: i64) -> Self {
        Self {
            id: RecentSearchId::generate(timestamp),
            title: item.title,
            subtitle: item.subtitle,
            timestamp,
            thumbnail_uri: item.thumbnail_uri,
        }
    }
}

/// What a caller supplies when recording a search; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct NewRecentSearch {
    pub title: String,
    pub subtitle: Option<String>,
    pub thumbnail_uri: Option<String>,
}

impl NewRecentSearch {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }
}
