//! Hook configuration loading and schema definitions
//!
//! Settings are optional; a project without a `.cordova-hooks.toml` gets the
//! defaults Cordova itself uses.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
