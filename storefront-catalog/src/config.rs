use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::FreshnessPolicy;
use crate::error::CatalogError;

pub const ENV_CATALOG_URL: &str = "STOREFRONT_CATALOG_URL";
pub const ENV_STORAGE_BASE: &str = "STOREFRONT_STORAGE_BASE";
pub const ENV_CACHE_TTL: &str = "STOREFRONT_CACHE_TTL_SECS";

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_FALLBACK_RETRY: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for the catalog fetch and cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Remote catalog endpoint. `None` means offline: always serve the static dataset.
    pub endpoint: Option<String>,
    /// How long a live snapshot stays fresh.
    pub ttl: Duration,
    /// How long a fallback snapshot is served before the network is retried.
    pub fallback_retry: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Replacement for the bundled static dataset.
    pub static_dataset: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            ttl: DEFAULT_TTL,
            fallback_retry: DEFAULT_FALLBACK_RETRY,
            timeout: DEFAULT_TIMEOUT,
            static_dataset: None,
        }
    }
}

/// Settings for image URL resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSettings {
    /// Object-storage base URL. `None` selects the local topology.
    pub storage_base: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub catalog: CatalogSettings,
    pub images: ImageSettings,
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub endpoint: ConfigSource,
    pub ttl: ConfigSource,
    pub fallback_retry: ConfigSource,
    pub timeout: ConfigSource,
    pub static_dataset: ConfigSource,
    pub storage_base: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    catalog: Option<CatalogSection>,
    images: Option<ImagesSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct CatalogSection {
    endpoint: Option<String>,
    ttl_secs: Option<u64>,
    fallback_retry_secs: Option<u64>,
    timeout_secs: Option<u64>,
    static_dataset: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ImagesSection {
    storage_base: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables, the config file, and defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, CatalogError> {
        Self::load_from(config_path().as_deref(), |var| std::env::var(var).ok())
    }

    /// Load from an explicit file (absent file = defaults) and env lookup.
    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CatalogError> {
        let file = read_config_file(path)?;
        let catalog = file.catalog.unwrap_or_default();
        let images = file.images.unwrap_or_default();

        let endpoint = non_blank(env(ENV_CATALOG_URL)).or_else(|| non_blank(catalog.endpoint));
        let storage_base = non_blank(env(ENV_STORAGE_BASE)).or_else(|| non_blank(images.storage_base));

        let ttl = match non_blank(env(ENV_CACHE_TTL)) {
            Some(v) => Duration::from_secs(v.parse().map_err(|_| {
                CatalogError::config(format!("{ENV_CACHE_TTL} must be a number of seconds, got '{v}'"))
            })?),
            None => catalog.ttl_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TTL),
        };

        Ok(Self {
            catalog: CatalogSettings {
                endpoint,
                ttl,
                fallback_retry: catalog
                    .fallback_retry_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_FALLBACK_RETRY),
                timeout: catalog
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_TIMEOUT),
                static_dataset: catalog.static_dataset,
            },
            images: ImageSettings { storage_base },
        })
    }

    pub fn freshness(&self) -> FreshnessPolicy {
        FreshnessPolicy {
            ttl: self.catalog.ttl,
            fallback_retry: self.catalog.fallback_retry,
        }
    }
}

/// Path to the config file: `~/.config/storefront/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("storefront").join("config.toml"))
}

/// Determine where each config field would be loaded from.
pub fn config_sources() -> ConfigSources {
    let file = read_config_file(config_path().as_deref()).unwrap_or_default();
    sources_for(&file, |var| std::env::var(var).ok())
}

fn sources_for(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> ConfigSources {
    let catalog = file.catalog.as_ref();
    let images = file.images.as_ref();

    let pick = |var: Option<&'static str>, in_file: bool, has_default: bool| {
        if let Some(var) = var {
            if non_blank(env(var)).is_some() {
                return ConfigSource::EnvVar(var);
            }
        }
        if in_file {
            ConfigSource::ConfigFile
        } else if has_default {
            ConfigSource::Default
        } else {
            ConfigSource::Missing
        }
    };

    ConfigSources {
        endpoint: pick(
            Some(ENV_CATALOG_URL),
            catalog.is_some_and(|c| non_blank(c.endpoint.clone()).is_some()),
            false,
        ),
        ttl: pick(Some(ENV_CACHE_TTL), catalog.is_some_and(|c| c.ttl_secs.is_some()), true),
        fallback_retry: pick(None, catalog.is_some_and(|c| c.fallback_retry_secs.is_some()), true),
        timeout: pick(None, catalog.is_some_and(|c| c.timeout_secs.is_some()), true),
        static_dataset: pick(None, catalog.is_some_and(|c| c.static_dataset.is_some()), false),
        storage_base: pick(
            Some(ENV_STORAGE_BASE),
            images.is_some_and(|i| non_blank(i.storage_base.clone()).is_some()),
            false,
        ),
    }
}

fn read_config_file(path: Option<&Path>) -> Result<ConfigFile, CatalogError> {
    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let cfg = StorefrontConfig::load_from(None, env_from(&[])).unwrap();
        assert_eq!(cfg, StorefrontConfig::default());
        assert_eq!(cfg.catalog.ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
endpoint = "https://api.example.com/products"
ttl_secs = 60
fallback_retry_secs = 0
timeout_secs = 5
static_dataset = "/srv/products.json"

[images]
storage_base = "https://storage.example.com"
"#,
        )
        .unwrap();

        let cfg = StorefrontConfig::load_from(Some(&path), env_from(&[])).unwrap();
        assert_eq!(cfg.catalog.endpoint.as_deref(), Some("https://api.example.com/products"));
        assert_eq!(cfg.catalog.ttl, Duration::from_secs(60));
        assert_eq!(cfg.catalog.fallback_retry, Duration::ZERO);
        assert_eq!(cfg.catalog.timeout, Duration::from_secs(5));
        assert_eq!(cfg.catalog.static_dataset, Some(PathBuf::from("/srv/products.json")));
        assert_eq!(cfg.images.storage_base.as_deref(), Some("https://storage.example.com"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nendpoint = \"https://file.example.com\"\nttl_secs = 60\n").unwrap();

        let env = env_from(&[
            (ENV_CATALOG_URL, "https://env.example.com"),
            (ENV_CACHE_TTL, "10"),
            (ENV_STORAGE_BASE, "  "),
        ]);
        let cfg = StorefrontConfig::load_from(Some(&path), env).unwrap();
        assert_eq!(cfg.catalog.endpoint.as_deref(), Some("https://env.example.com"));
        assert_eq!(cfg.catalog.ttl, Duration::from_secs(10));
        assert!(cfg.images.storage_base.is_none());
    }

    #[test]
    fn test_bad_ttl_env_is_error() {
        let env = env_from(&[(ENV_CACHE_TTL, "soon")]);
        assert!(matches!(StorefrontConfig::load_from(None, env), Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\nendpoint = ").unwrap();
        assert!(matches!(
            StorefrontConfig::load_from(Some(&path), env_from(&[])),
            Err(CatalogError::Toml(_))
        ));
    }

    #[test]
    fn test_sources() {
        let file: ConfigFile = toml::from_str("[catalog]\nttl_secs = 5\n[images]\nstorage_base = \"x\"\n").unwrap();
        let sources = sources_for(&file, env_from(&[(ENV_CATALOG_URL, "https://env")]));
        assert_eq!(sources.endpoint, ConfigSource::EnvVar(ENV_CATALOG_URL));
        assert_eq!(sources.ttl, ConfigSource::ConfigFile);
        assert_eq!(sources.timeout, ConfigSource::Default);
        assert_eq!(sources.static_dataset, ConfigSource::Missing);
        assert_eq!(sources.storage_base, ConfigSource::ConfigFile);
    }
}
