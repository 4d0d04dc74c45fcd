//! Xcode project bundle naming
//!
//! Cordova names `platforms/ios/<Name>.xcodeproj` after the project at the
//! time the platform was added. That file name is the only record of the
//! previous project name.

use std::path::Path;

/// Extension of Xcode project bundles
pub const XCODEPROJ_EXTENSION: &str = "xcodeproj";

/// Project name encoded in an `.xcodeproj` entry name, if it is one
pub fn project_name(entry: &str) -> Option<&str> {
    let path = Path::new(entry);
    if path.extension()? != XCODEPROJ_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()
}

/// Previous project name from a platform directory listing.
///
/// The last `.xcodeproj` entry in listing order wins. Returns an empty
/// string when there is none.
pub fn find_project_name(entries: &[String]) -> String {
    entries
        .iter()
        .filter_map(|entry| project_name(entry))
        .last()
        .unwrap_or_default()
        .to_string()
}
