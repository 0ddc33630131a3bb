use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_pool_cache_size")]
    pub pool_cache_size: u64,
    #[serde(default = "default_pool_ttl_secs")]
    pub pool_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            pool_cache_size: default_pool_cache_size(),
            pool_ttl_secs: default_pool_ttl_secs(),
        }
    }
}

fn default_pool_cache_size() -> u64 { 8 }
fn default_pool_ttl_secs() -> u64 { 120 }

/// Tap/swipe disambiguation thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_tap_max_duration_ms")]
    pub tap_max_duration_ms: i64,
    #[serde(default = "default_tap_max_movement_px")]
    pub tap_max_movement_px: f64,
    #[serde(default = "default_swipe_min_distance_px")]
    pub swipe_min_distance_px: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: default_tap_max_duration_ms(),
            tap_max_movement_px: default_tap_max_movement_px(),
            swipe_min_distance_px: default_swipe_min_distance_px(),
        }
    }
}

fn default_tap_max_duration_ms() -> i64 { 200 }
fn default_tap_max_movement_px() -> f64 { 10.0 }
fn default_swipe_min_distance_px() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSettings {
    /// Whether a declined viewer may request again later.
    #[serde(default)]
    pub allow_rerequest_after_decline: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            allow_rerequest_after_decline: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with MENTORLINK_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with MENTORLINK_)
            // e.g., MENTORLINK_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MENTORLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MENTORLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment overrides for backend credentials
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("MENTORLINK_BACKEND__ENDPOINT").ok();
    let api_key = env::var("MENTORLINK_BACKEND__API_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("backend.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("backend.api_key", api_key)?;
    }

    builder.build()
}
