use anyhow::{Context, Result};
use hub_client::{ClientConfig, DEFAULT_BACKOFF_BASE, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES};
use hub_schema_cache::{StoreConfig, DEFAULT_CACHE_MAX_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "HUB_MCP_CONFIG";

const DAY_SECS: u64 = 24 * 60 * 60;

/// Server configuration: TOML file first, `HUB_MCP_*` environment variables on top
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub upstream: UpstreamSection,
    pub cache: CacheSection,
    pub refresh: RefreshSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    pub url: String,
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub ttl_secs: u64,
    pub max_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RefreshSection {
    /// Zero disables the scheduled refresh
    pub interval_secs: u64,
    pub warmup: bool,
    pub warmup_delay_secs: u64,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout_secs: 30,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: DAY_SECS,
            max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            interval_secs: DAY_SECS,
            warmup: true,
            warmup_delay_secs: 5,
        }
    }
}

impl HubConfig {
    /// Load from `path` (or `HUB_MCP_CONFIG`), then apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Apply `HUB_MCP_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("HUB_MCP_URL") {
            self.upstream.url = url;
        }
        if let Some(endpoint) = get("HUB_MCP_ENDPOINT") {
            self.upstream.endpoint = endpoint;
        }
        if let Some(token) = get("HUB_MCP_TOKEN") {
            self.upstream.token = Some(token);
        }
        if let Some(raw) = get("HUB_MCP_TIMEOUT_SECS") {
            self.upstream.timeout_secs = parse_env("HUB_MCP_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("HUB_MCP_MAX_RETRIES") {
            self.upstream.max_retries = parse_env("HUB_MCP_MAX_RETRIES", &raw)?;
        }
        if let Some(raw) = get("HUB_MCP_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_env("HUB_MCP_CACHE_TTL_SECS", &raw)?;
        }
        if let Some(raw) = get("HUB_MCP_REFRESH_INTERVAL_SECS") {
            self.refresh.interval_secs = parse_env("HUB_MCP_REFRESH_INTERVAL_SECS", &raw)?;
        }
        if let Some(raw) = get("HUB_MCP_DISABLE_WARMUP") {
            self.refresh.warmup = !matches!(raw.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }

    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.upstream.url.clone(),
            endpoint: self.upstream.endpoint.clone(),
            token: self.upstream.token.clone(),
            timeout: Duration::from_secs(self.upstream.timeout_secs),
            max_retries: self.upstream.max_retries,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }

    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            ttl: Duration::from_secs(self.cache.ttl_secs),
            max_size: self.cache.max_size,
        }
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.upstream.endpoint, "/hub/graphql");
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
        assert_eq!(config.client_config().max_retries, 3);
        assert_eq!(config.store_config().ttl, Duration::from_secs(86_400));
        assert_eq!(config.store_config().max_size, 100);
        assert!(config.refresh.warmup);
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub-mcp.toml");
        std::fs::write(
            &path,
            r#"
[upstream]
url = "https://hub.example.com"
max_retries = 5

[cache]
ttl_secs = 600
"#,
        )
        .unwrap();

        let mut config = HubConfig::from_file(&path).unwrap();
        assert_eq!(config.upstream.url, "https://hub.example.com");
        assert_eq!(config.upstream.max_retries, 5);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 600);

        config
            .apply_env(env(&[
                ("HUB_MCP_TOKEN", "secret"),
                ("HUB_MCP_MAX_RETRIES", "0"),
                ("HUB_MCP_DISABLE_WARMUP", "1"),
                ("HUB_MCP_URL", "  "),
            ]))
            .unwrap();
        assert_eq!(config.upstream.token.as_deref(), Some("secret"));
        assert_eq!(config.upstream.max_retries, 0);
        assert_eq!(config.upstream.url, "https://hub.example.com");
        assert!(!config.refresh.warmup);
    }

    #[test]
    fn test_invalid_env_number_is_an_error() {
        let mut config = HubConfig::default();
        let err = config
            .apply_env(env(&[("HUB_MCP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("HUB_MCP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_unknown_file_is_an_error() {
        assert!(HubConfig::from_file(Path::new("/nonexistent/hub-mcp.toml")).is_err());
    }
}
