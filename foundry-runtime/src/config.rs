//! Configuration for the component runtime.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable naming the handler to serve, `<module>:<function>`.
pub const HANDLER_ENV: &str = "HANDLER";

/// Main configuration structure for the runtime.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub handler: HandlerConfig,
    /// Which invocation surfaces the HTTP server mounts.
    #[serde(default)]
    pub surfaces: SurfacesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Settings for the built-in components.
    #[serde(default)]
    pub components: ComponentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    /// Handler reference, e.g. "components.word_count:predict".
    #[serde(default = "default_handler")]
    pub reference: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            reference: default_handler(),
        }
    }
}

/// Per-deployment-target switches. A container deployment typically keeps
/// only `rest`, a function app only `function`, and so on.
#[derive(Debug, Clone, Deserialize)]
pub struct SurfacesConfig {
    /// `/health`, `/predict`, `/batch`
    #[serde(default = "default_true")]
    pub rest: bool,
    /// `/api/:function`
    #[serde(default = "default_true")]
    pub function: bool,
    /// `/score`
    #[serde(default = "default_true")]
    pub serving: bool,
    /// `/mcp`, `/mcp/schema`
    #[serde(default = "default_true")]
    pub actions: bool,
}

impl Default for SurfacesConfig {
    fn default() -> Self {
        Self {
            rest: true,
            function: true,
            serving: true,
            actions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ComponentsConfig {
    #[serde(default)]
    pub text_processor: TextProcessorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextProcessorConfig {
    /// Shortest word kept by the filter (inclusive).
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Longest word kept by the filter (inclusive).
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for TextProcessorConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_handler() -> String {
    "components.word_count:predict".to_string()
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_min_length() -> usize {
    3
}
fn default_max_length() -> usize {
    100
}

impl Config {
    /// Load configuration from `config.toml` and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `path` as the optional config file.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. HANDLER environment variable (handler reference only)
    /// 2. Environment variables (FOUNDRY__SECTION__KEY format)
    /// 3. Config file (if present)
    /// 4. Built-in defaults
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let handler = std::env::var(HANDLER_ENV).ok();

        let config = ConfigLoader::builder()
            .set_default("handler.reference", default_handler())?
            .set_default("api.host", default_host())?
            .set_default("api.port", default_port() as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FOUNDRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("handler.reference", handler)?
            .build()?;

        config.try_deserialize()
    }
}
