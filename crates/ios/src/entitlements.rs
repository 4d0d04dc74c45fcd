//! Keep the iOS `.entitlements` file named after the project
//!
//! Runs before Cordova's `prepare` step. When the project name in
//! `config.xml` differs from the name the Xcode project was generated with,
//! Cordova would otherwise create a second `<NewName>.entitlements` next to
//! the old one. Renaming the old file first keeps a single copy.
//!
//! The hook must never break a build: every failure ends up as a warning in
//! the returned [`HookReport`].

use crate::platform::IosPlatform;
use crate::xcodeproj;
use cordova_hooks_core::config_xml::ProjectConfig;
use cordova_hooks_core::error::{Error, Result};
use cordova_hooks_core::logger::HookLogger;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENTITLEMENTS_EXTENSION: &str = "entitlements";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// `platforms/ios` is missing or unreadable
    NoPlatform,
    /// No child folder with a resources directory
    NoProjectFolder,
    /// The project folder has the fixed, tool-owned name
    FixedProjectFolder { folder: String },
    /// The project name did not change
    Unchanged { name: String },
    Renamed { from: PathBuf, to: PathBuf },
    RenameFailed { from: PathBuf, to: PathBuf, error: String },
    /// The configured project name could not be read
    ConfigUnavailable { error: String },
}

/// Result of one hook run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookReport {
    pub outcome: RenameOutcome,
    /// Every warning line emitted during the run
    pub warnings: Vec<String>,
}

impl HookReport {
    fn new(outcome: RenameOutcome) -> Self {
        Self {
            outcome,
            warnings: Vec::new(),
        }
    }

    fn with_warnings(outcome: RenameOutcome, warnings: Vec<String>) -> Self {
        Self { outcome, warnings }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(self.outcome, RenameOutcome::Renamed { .. })
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Renames `<old>.entitlements` to `<new>.entitlements` in the iOS project folder
pub struct EntitlementsRenamer<'a> {
    platform: IosPlatform,
    config: &'a dyn ProjectConfig,
    logger: &'a dyn HookLogger,
}

impl<'a> EntitlementsRenamer<'a> {
    pub fn new(
        platform: IosPlatform,
        config: &'a dyn ProjectConfig,
        logger: &'a dyn HookLogger,
    ) -> Self {
        Self {
            platform,
            config,
            logger,
        }
    }

    /// Run the hook. Never fails; see [`RenameOutcome`] for what happened.
    pub fn run(&self) -> HookReport {
        let entries = match self.platform.entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(
                    dir = %self.platform.dir().display(),
                    %err,
                    "No iOS platform directory"
                );
                return HookReport::new(RenameOutcome::NoPlatform);
            }
        };

        let Some(folder) = self.platform.find_project_folder(&entries) else {
            tracing::debug!(
                dir = %self.platform.dir().display(),
                "No project folder with resources"
            );
            return HookReport::new(RenameOutcome::NoProjectFolder);
        };

        if self.platform.is_fixed_folder(&folder) {
            tracing::debug!(%folder, "Project folder name is fixed by cordova-ios");
            return HookReport::new(RenameOutcome::FixedProjectFolder { folder });
        }

        let old_name = xcodeproj::find_project_name(&entries);

        let new_name = match self.config.project_name() {
            Ok(name) => name,
            Err(err) => {
                let error = err.to_string();
                let warnings = self.warn(&["Failed to read the project name.", error.as_str()]);
                return HookReport::with_warnings(
                    RenameOutcome::ConfigUnavailable { error },
                    warnings,
                );
            }
        };

        if !old_name.is_empty() && old_name == new_name {
            tracing::debug!(name = %new_name, "Project name unchanged");
            return HookReport::new(RenameOutcome::Unchanged { name: new_name });
        }

        self.logger.info("Project name has changed. Renaming .entitlements file.");

        let from = self.platform.entitlements_path(&folder, &old_name);
        let to = self.platform.entitlements_path(&folder, &new_name);
        tracing::info!(from = %from.display(), to = %to.display(), "Renaming entitlements");

        match rename_file(&from, &to) {
            Ok(()) => HookReport::new(RenameOutcome::Renamed { from, to }),
            Err(err) => {
                let error = err.to_string();
                let warnings = self.warn(&["Failed to rename .entitlements file.", error.as_str()]);
                HookReport::with_warnings(RenameOutcome::RenameFailed { from, to, error }, warnings)
            }
        }
    }

    fn warn(&self, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                self.logger.warn(line);
                line.to_string()
            })
            .collect()
    }
}

/// Run the hook for the project at `project_root` with the default layout
pub fn run(project_root: &Path, config: &dyn ProjectConfig, logger: &dyn HookLogger) -> HookReport {
    EntitlementsRenamer::new(IosPlatform::new(project_root), config, logger).run()
}

/// Rename without replacing an existing destination
fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if destination_taken(from, to) {
        return Err(Error::already_exists(to));
    }

    fs::rename(from, to).map_err(|e| {
        Error::from(e).with_context(format!("Renaming {} to {}", from.display(), to.display()))
    })
}

/// Whether `to` names a file other than `from`.
///
/// On a case-insensitive filesystem a case-only rename resolves `to` to the
/// source itself, which must not count as a collision.
fn destination_taken(from: &Path, to: &Path) -> bool {
    to.exists() && !same_file::is_same_file(from, to).unwrap_or(false)
}
