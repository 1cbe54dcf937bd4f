use restomod_core::{DEFAULT_PAGE_SIZE, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the restomod client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub blog: BlogConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Overrides the default `restomod/<version>` user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub default_sort: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Lead submission paths, relative to `api.base_url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_contact")]
    pub contact: String,

    #[serde(default = "default_newsletter")]
    pub newsletter: String,

    #[serde(default = "default_custom_request")]
    pub custom_request: String,

    /// `{id}` is replaced with the job identifier
    #[serde(default = "default_job_application")]
    pub job_application: String,

    #[serde(default = "default_test_drive")]
    pub test_drive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            catalog: CatalogConfig::default(),
            blog: BlogConfig::default(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            contact: default_contact(),
            newsletter: default_newsletter(),
            custom_request: default_custom_request(),
            job_application: default_job_application(),
            test_drive: default_test_drive(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_contact() -> String {
    "/contatti".to_string()
}

fn default_newsletter() -> String {
    "/newsletter".to_string()
}

fn default_custom_request() -> String {
    "/richieste-personalizzate".to_string()
}

fn default_job_application() -> String {
    "/jobs/{id}/candidature".to_string()
}

fn default_test_drive() -> String {
    "/test-drive".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there first if the file
    /// does not exist yet
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "restomod", "restomod") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.restomod/config.toml")
        }
    }
}
