//! iOS platform layout probing
//!
//! Cordova generates the native project under `<root>/platforms/ios`. The
//! project folder inside it is named after the project on older cordova-ios
//! releases and is a fixed `App` folder on newer ones.

use crate::xcodeproj;
use cordova_hooks_core::config::IosConfig;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const PLATFORMS_DIR: &str = "platforms";
pub const IOS_PLATFORM: &str = "ios";

/// The `platforms/ios` directory of one Cordova project
#[derive(Debug, Clone)]
pub struct IosPlatform {
    dir: PathBuf,
    fixed_project_folder: String,
    resources_dir: String,
}

/// Snapshot of what the platform directory contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformProbe {
    pub platform_dir: PathBuf,
    pub exists: bool,
    pub project_folder: Option<String>,
    pub fixed_project_folder: bool,
    pub old_project_name: String,
}

impl IosPlatform {
    /// Platform of the project at `project_root`, with default layout names
    pub fn new(project_root: &Path) -> Self {
        Self::with_config(project_root, &IosConfig::default())
    }

    pub fn with_config(project_root: &Path, config: &IosConfig) -> Self {
        Self {
            dir: project_root.join(PLATFORMS_DIR).join(IOS_PLATFORM),
            fixed_project_folder: config.fixed_project_folder.clone(),
            resources_dir: config.resources_dir.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the direct children of the platform directory, sorted.
    ///
    /// Names that are not valid UTF-8 cannot be project names and are skipped.
    pub fn entries(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            match entry?.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::trace!(?name, "Skipping non UTF-8 entry"),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Select the project folder among `entries`.
    ///
    /// The fixed folder wins whenever its resources entry exists, whatever its
    /// type. Otherwise the first directory with a resources directory is taken.
    pub fn find_project_folder(&self, entries: &[String]) -> Option<String> {
        if entries.iter().any(|e| *e == self.fixed_project_folder)
            && self.resources_path(&self.fixed_project_folder).exists()
        {
            return Some(self.fixed_project_folder.clone());
        }

        entries
            .iter()
            .find(|entry| self.dir.join(entry).is_dir() && self.resources_path(entry).is_dir())
            .cloned()
    }

    /// Whether `folder` is the fixed, tool-owned project folder
    pub fn is_fixed_folder(&self, folder: &str) -> bool {
        folder == self.fixed_project_folder
    }

    pub fn resources_path(&self, folder: &str) -> PathBuf {
        self.dir.join(folder).join(&self.resources_dir)
    }

    /// `<folder>/<resources>/<name>.entitlements`
    pub fn entitlements_path(&self, folder: &str, name: &str) -> PathBuf {
        self.resources_path(folder)
            .join(format!("{}.{}", name, crate::entitlements::ENTITLEMENTS_EXTENSION))
    }

    /// Inspect the layout without changing anything
    pub fn probe(&self) -> PlatformProbe {
        let entries = self.entries().ok();
        let project_folder = entries.as_deref().and_then(|e| self.find_project_folder(e));

        PlatformProbe {
            platform_dir: self.dir.clone(),
            exists: entries.is_some(),
            fixed_project_folder: project_folder
                .as_deref()
                .is_some_and(|f| self.is_fixed_folder(f)),
            project_folder,
            old_project_name: entries
                .as_deref()
                .map(xcodeproj::find_project_name)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn platform_with(dirs: &[&str], files: &[&str]) -> (TempDir, IosPlatform) {
        let root = TempDir::new().unwrap();
        let platform = IosPlatform::new(root.path());
        fs::create_dir_all(platform.dir()).unwrap();
        for dir in dirs {
            fs::create_dir_all(platform.dir().join(dir)).unwrap();
        }
        for file in files {
            fs::write(platform.dir().join(file), "").unwrap();
        }
        (root, platform)
    }

    #[test]
    fn test_platform_dir() {
        let platform = IosPlatform::new(Path::new("/work/app"));
        assert_eq!(platform.dir(), Path::new("/work/app/platforms/ios"));
    }

    #[test]
    fn test_entries_missing_dir() {
        let root = TempDir::new().unwrap();
        assert!(IosPlatform::new(root.path()).entries().is_err());
    }

    #[test]
    fn test_entries_sorted() {
        let (_root, platform) =
            platform_with(&["www", "CordovaLib", "MyApp"], &["MyApp.xcodeproj"]);
        assert_eq!(
            platform.entries().unwrap(),
            vec!["CordovaLib", "MyApp", "MyApp.xcodeproj", "www"]
        );
    }

    #[test]
    fn test_fixed_folder_preferred() {
        let (_root, platform) = platform_with(&["App/Resources", "Aardvark/Resources"], &[]);
        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries).as_deref(), Some("App"));
    }

    #[test]
    fn test_fixed_folder_without_resources_is_ignored() {
        let (_root, platform) = platform_with(&["App", "MyApp/Resources"], &[]);
        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries).as_deref(), Some("MyApp"));
    }

    #[test]
    fn test_first_folder_with_resources() {
        let (_root, platform) = platform_with(
            &["CordovaLib", "Beta/Resources", "Gamma/Resources"],
            &["Alpha"],
        );
        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries).as_deref(), Some("Beta"));
    }

    #[test]
    fn test_resources_must_be_directory() {
        let (_root, platform) = platform_with(&["MyApp"], &["MyApp/Resources"]);
        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries), None);
    }

    #[test]
    fn test_fixed_folder_resources_entry_may_be_file() {
        let (_root, platform) = platform_with(&["App", "Other/Resources"], &["App/Resources"]);
        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries).as_deref(), Some("App"));
    }

    #[test]
    fn test_custom_layout_names() {
        let root = TempDir::new().unwrap();
        let config = IosConfig {
            fixed_project_folder: "Main".to_string(),
            resources_dir: "Assets".to_string(),
        };
        let platform = IosPlatform::with_config(root.path(), &config);
        fs::create_dir_all(platform.dir().join("Main/Assets")).unwrap();

        let entries = platform.entries().unwrap();
        assert_eq!(platform.find_project_folder(&entries).as_deref(), Some("Main"));
        assert!(platform.is_fixed_folder("Main"));
        assert!(!platform.is_fixed_folder("App"));
    }

    #[test]
    fn test_entitlements_path() {
        let platform = IosPlatform::new(Path::new("/p"));
        assert_eq!(
            platform.entitlements_path("MyApp", "MyApp"),
            PathBuf::from("/p/platforms/ios/MyApp/Resources/MyApp.entitlements")
        );
    }

    #[test]
    fn test_probe() {
        let (_root, platform) = platform_with(&["MyApp/Resources", "MyApp.xcodeproj"], &[]);
        let probe = platform.probe();
        assert!(probe.exists);
        assert_eq!(probe.project_folder.as_deref(), Some("MyApp"));
        assert!(!probe.fixed_project_folder);
        assert_eq!(probe.old_project_name, "MyApp");
    }

    #[test]
    fn test_probe_missing_platform() {
        let root = TempDir::new().unwrap();
        let probe = IosPlatform::new(root.path()).probe();
        assert!(!probe.exists);
        assert_eq!(probe.project_folder, None);
        assert_eq!(probe.old_project_name, "");
    }
}
