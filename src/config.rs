use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Upstream recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Default log filter when RUST_LOG is not set (e.g. "info", "mealfinder=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Settings for the recipe API client
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the endpoint paths (filter.php, lookup.php) are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
pub(crate) fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_user_agent() -> String {
    format!("mealfinder/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALFINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALFINDER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: MEALFINDER__API__TIMEOUT
        .add_source(
            Environment::with_prefix("MEALFINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
