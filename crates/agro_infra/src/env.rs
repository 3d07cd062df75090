use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use agro_domain::AgroConfig;
use tracing::warn;
use url::Url;

pub const LLM_URL_VAR: &str = "AGRO_LLM_URL";
pub const CONNECT_TIMEOUT_VAR: &str = "AGRO_CONNECT_TIMEOUT_SECS";
pub const STORE_DIR_VAR: &str = "AGRO_STORE_DIR";
pub const RECENT_CAPACITY_VAR: &str = "AGRO_RECENT_CAPACITY";

/// Runtime settings resolved from defaults, `.env` files and the process
/// environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub config: AgroConfig,
    /// Root directory of the durable key-value store.
    pub store_dir: PathBuf,
}

pub struct AgroEnvironment {
    cwd: PathBuf,
}

impl AgroEnvironment {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Loads `.env` files from `cwd` upwards and applies every recognised
    /// variable on top of the defaults. Values that fail to parse are
    /// ignored.
    pub fn resolve(&self) -> Environment {
        Self::load_all(&self.cwd);
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Environment {
        let mut config = AgroConfig::default();

        if let Some(endpoint) = parse_var::<Url>(&lookup, LLM_URL_VAR) {
            config.advisory.endpoint = endpoint;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, CONNECT_TIMEOUT_VAR) {
            config.advisory.http.connect_timeout_secs = secs;
        }
        if let Some(capacity) = parse_var::<NonZeroUsize>(&lookup, RECENT_CAPACITY_VAR) {
            config.recency.capacity = capacity.get();
        }

        let store_dir = lookup(STORE_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_store_dir);

        Environment { config, store_dir }
    }

    /// Load all `.env` files with priority to lower (closer) files. Variables
    /// already present in the process environment are never overridden.
    fn load_all(cwd: &Path) {
        let mut paths = Vec::new();
        let mut current = PathBuf::new();

        for component in cwd.components() {
            current.push(component);
            paths.push(current.clone());
        }

        paths.reverse();

        for path in paths {
            let env_file = path.join(".env");
            if env_file.is_file() {
                if let Err(error) = dotenvy::from_path(&env_file) {
                    warn!(path = %env_file.display(), error = %error, "Failed to load .env file");
                }
            }
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(variable = name, value = %raw, error = %error, "Ignoring invalid setting");
            None
        }
    }
}

fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agro")
        .join("store")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use agro_domain::DEFAULT_COMPLETION_URL;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let actual = AgroEnvironment::from_lookup(lookup(&[]));

        assert_eq!(actual.config, AgroConfig::default());
        assert_eq!(actual.store_dir, default_store_dir());
    }

    #[test]
    fn test_overrides_from_variables() {
        let actual = AgroEnvironment::from_lookup(lookup(&[
            (LLM_URL_VAR, "http://localhost:8080/llm"),
            (CONNECT_TIMEOUT_VAR, "5"),
            (RECENT_CAPACITY_VAR, " 50 "),
            (STORE_DIR_VAR, "/var/lib/agro"),
        ]));

        assert_eq!(actual.config.advisory.endpoint.as_str(), "http://localhost:8080/llm");
        assert_eq!(actual.config.advisory.http.connect_timeout_secs, 5);
        assert_eq!(actual.config.recency.capacity, 50);
        assert_eq!(actual.store_dir, PathBuf::from("/var/lib/agro"));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let actual = AgroEnvironment::from_lookup(lookup(&[
            (LLM_URL_VAR, "not a url"),
            (RECENT_CAPACITY_VAR, "twenty"),
        ]));

        assert_eq!(actual.config.advisory.endpoint.as_str(), DEFAULT_COMPLETION_URL);
        assert_eq!(actual.config.recency.capacity, 20);
    }

    #[test]
    fn test_zero_capacity_is_ignored() {
        let actual = AgroEnvironment::from_lookup(lookup(&[(RECENT_CAPACITY_VAR, "0")]));

        assert_eq!(actual.config.recency.capacity, 20);
    }

    #[test]
    #[serial]
    fn test_load_all_nested_envs_override() {
        let root = tempdir().unwrap();
        let subdir = root.path().join("farm");
        fs::create_dir(&subdir).unwrap();
        fs::write(root.path().join(".env"), "AGRO_TEST_NESTED=ROOT").unwrap();
        fs::write(subdir.join(".env"), "AGRO_TEST_NESTED=SUB").unwrap();

        AgroEnvironment::load_all(&subdir);

        assert_eq!(std::env::var("AGRO_TEST_NESTED").unwrap(), "SUB");
    }

    #[test]
    #[serial]
    fn test_resolve_reads_env_file() {
        let root = tempdir().unwrap();
        let store = root.path().join("kv");
        fs::write(
            root.path().join(".env"),
            format!("{STORE_DIR_VAR}={}\n", store.display()),
        )
        .unwrap();

        let actual = AgroEnvironment::new(root.path()).resolve();

        assert_eq!(actual.store_dir, store);
    }
}
