//! Configuration management
//!
//! Values are layered: built-in defaults, then `config/liftlog.toml` if it
//! exists, then `LIFTLOG__*` environment variables
//! (`LIFTLOG__SERVER__PORT=9000`).

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config/liftlog";
const ENV_PREFIX: &str = "LIFTLOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub export: ExportConfig,
    pub prediction: PredictionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON file of recorded travels
    pub path: String,
    /// Reset and reload the log when the service starts
    pub on_startup: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Emit the `call_datetime` column in CSV exports
    pub include_call_datetime: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictionConfig {
    pub forgetting_factor: f64,
    /// Newest calls treated as fresh demand
    pub recent_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from defaults, file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://elevator.db".to_string(),
                max_connections: 1,
                acquire_timeout_secs: 30,
            },
            seed: SeedConfig {
                path: "data/elevator_travels.json".to_string(),
                on_startup: true,
            },
            export: ExportConfig::default(),
            prediction: PredictionConfig::default(),
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_call_datetime: true,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            forgetting_factor: crate::domain::call::prediction::DEFAULT_FORGETTING_FACTOR,
            recent_window: 24,
        }
    }
}
