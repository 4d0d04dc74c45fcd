//! Hook invocation context
//!
//! Cordova runs non-JavaScript hooks with the project root as the first
//! argument and describes the invocation through `CORDOVA_*` environment
//! variables.

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Version of the Cordova CLI running the hook
pub const ENV_VERSION: &str = "CORDOVA_VERSION";
/// Comma-separated platforms of the current build
pub const ENV_PLATFORMS: &str = "CORDOVA_PLATFORMS";
/// Comma-separated installed plugin ids
pub const ENV_PLUGINS: &str = "CORDOVA_PLUGINS";
/// Path of the hook being run
pub const ENV_HOOK: &str = "CORDOVA_HOOK";
/// Full command line of the Cordova invocation
pub const ENV_CMDLINE: &str = "CORDOVA_CMDLINE";

/// Everything a hook knows about the build step that invoked it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookContext {
    /// Absolute project root
    pub project_root: PathBuf,
    /// Path of the hook script, as reported by Cordova
    pub hook: Option<String>,
    /// Platforms taking part in this build, lower-cased
    pub platforms: Vec<String>,
    /// Installed plugin ids
    pub plugins: Vec<String>,
    /// Cordova CLI version
    pub cordova_version: Option<String>,
    /// Command line that started the build
    pub cmdline: Option<String>,
}

impl HookContext {
    /// Build the context from the process environment
    pub fn from_env(project_root: Option<&Path>) -> Result<Self> {
        Self::from_vars(project_root, std::env::vars())
    }

    /// Build the context from explicit variables.
    ///
    /// A missing root falls back to the current directory; relative roots are
    /// made absolute.
    pub fn from_vars<I, K, V>(project_root: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let root = match project_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let project_root = std::path::absolute(&root).map_err(|e| {
            Error::io(format!("Cannot resolve project root {}", root.display())).with_source(e)
        })?;

        let mut context = Self {
            project_root,
            ..Self::default()
        };

        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                ENV_VERSION => context.cordova_version = non_empty(value),
                ENV_PLATFORMS => context.platforms = split_list(&value, true),
                ENV_PLUGINS => context.plugins = split_list(&value, false),
                ENV_HOOK => context.hook = non_empty(value),
                ENV_CMDLINE => context.cmdline = non_empty(value),
                _ => {}
            }
        }

        Ok(context)
    }

    /// Whether this invocation concerns `platform`.
    ///
    /// An empty platform list means the hook was run by hand, which targets
    /// every platform.
    pub fn targets_platform(&self, platform: &str) -> bool {
        self.platforms.is_empty()
            || self.platforms.iter().any(|p| p.eq_ignore_ascii_case(platform))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn split_list(value: &str, lowercase: bool) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| if lowercase { s.to_ascii_lowercase() } else { s.to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_vars() {
        let vars = [
            ("CORDOVA_VERSION", "12.0.0"),
            ("CORDOVA_PLATFORMS", "iOS, android"),
            ("CORDOVA_PLUGINS", "cordova-plugin-device,cordova-universal-links-plugin"),
            ("CORDOVA_HOOK", "hooks/ios-before-prepare"),
            ("PATH", "/usr/bin"),
        ];

        let ctx = HookContext::from_vars(Some(Path::new("/work/app")), vars).unwrap();

        assert_eq!(ctx.project_root, PathBuf::from("/work/app"));
        assert_eq!(ctx.cordova_version.as_deref(), Some("12.0.0"));
        assert_eq!(ctx.platforms, vec!["ios", "android"]);
        assert_eq!(ctx.plugins.len(), 2);
        assert_eq!(ctx.hook.as_deref(), Some("hooks/ios-before-prepare"));
        assert!(ctx.cmdline.is_none());
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let ctx =
            HookContext::from_vars(Some(Path::new("app")), Vec::<(String, String)>::new()).unwrap();
        assert!(ctx.project_root.is_absolute());
        assert!(ctx.project_root.ends_with("app"));
    }

    #[test]
    fn test_missing_root_uses_current_dir() {
        let ctx = HookContext::from_vars(None, Vec::<(String, String)>::new()).unwrap();
        assert_eq!(ctx.project_root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_targets_platform() {
        let root = Some(Path::new("/p"));

        let manual = HookContext::from_vars(root, Vec::<(String, String)>::new()).unwrap();
        assert!(manual.targets_platform("ios"));

        let android = HookContext::from_vars(root, [("CORDOVA_PLATFORMS", "android")]).unwrap();
        assert!(!android.targets_platform("ios"));

        let ios = HookContext::from_vars(root, [("CORDOVA_PLATFORMS", "android,ios")]).unwrap();
        assert!(ios.targets_platform("iOS"));
    }

    #[test]
    fn test_blank_platform_list_targets_everything() {
        let ctx =
            HookContext::from_vars(Some(Path::new("/p")), [("CORDOVA_PLATFORMS", " , ")]).unwrap();
        assert!(ctx.platforms.is_empty());
        assert!(ctx.targets_platform("ios"));
    }
}
