//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[ios]` table
    #[serde(default)]
    pub ios: IosConfig,

    /// `[logging]` table
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// iOS platform layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosConfig {
    /// Project folder name that newer cordova-ios versions use regardless of
    /// the project name. Entitlements inside it are never renamed.
    #[serde(default = "default_fixed_project_folder")]
    pub fixed_project_folder: String,

    /// Resource directory inside the project folder
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            fixed_project_folder: default_fixed_project_folder(),
            resources_dir: default_resources_dir(),
        }
    }
}

fn default_fixed_project_folder() -> String {
    "App".to_string()
}

fn default_resources_dir() -> String {
    "Resources".to_string()
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit diagnostics as JSON lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
