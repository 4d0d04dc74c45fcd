//! Core utilities for Cordova build hooks
//!
//! This crate provides shared functionality used by the platform hooks:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: optional TOML hook settings
//! - **Project manifest**: the project name from Cordova's `config.xml`
//! - **Hook context**: project root and `CORDOVA_*` invocation variables
//! - **Logging**: the injected sink hooks report through
//!
//! # Example
//!
//! ```rust,no_run
//! use cordova_hooks_core::config_xml::{ConfigXml, ProjectConfig};
//! use cordova_hooks_core::context::HookContext;
//!
//! let ctx = HookContext::from_env(None).expect("no working directory");
//! let name = ConfigXml::new(&ctx.project_root).project_name();
//! println!("{:?}", name.map_err(|e| e.to_string()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod config_xml;
pub mod context;
pub mod error;
pub mod logger;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, IosConfig};
    pub use crate::config_xml::{ConfigXml, ProjectConfig, StaticProjectName};
    pub use crate::context::HookContext;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::logger::{HookLogger, LogLevel, MemoryLogger, NullLogger};
}
