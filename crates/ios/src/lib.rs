//! iOS platform hooks for Cordova projects
//!
//! This crate provides iOS-specific functionality:
//! - Platform layout probing under `platforms/ios`
//! - Project name discovery from the `.xcodeproj` bundle
//! - Keeping the `.entitlements` file named after the project

pub mod entitlements;
pub mod platform;
pub mod xcodeproj;

pub use entitlements::{EntitlementsRenamer, HookReport, RenameOutcome};
pub use platform::IosPlatform;
