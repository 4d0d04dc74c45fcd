//! Cordova `config.xml` access
//!
//! Hooks only need one value from the manifest, the project name held in
//! `<widget><name>`. Anything else in the file is ignored.

use crate::error::{Error, Result, ResultExt};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name at the project root
pub const CONFIG_XML: &str = "config.xml";

/// Source of the currently configured project name
pub trait ProjectConfig {
    /// Read the project name. Called at most once per hook run.
    fn project_name(&self) -> Result<String>;
}

/// Project name read from `<project root>/config.xml`
#[derive(Debug, Clone)]
pub struct ConfigXml {
    path: PathBuf,
}

impl ConfigXml {
    /// Point at the manifest of the project rooted at `project_root`
    pub fn new(project_root: &Path) -> Self {
        Self {
            path: project_root.join(CONFIG_XML),
        }
    }

    /// Location of the manifest
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectConfig for ConfigXml {
    fn project_name(&self) -> Result<String> {
        if !self.path.is_file() {
            return Err(Error::config_not_found(&self.path));
        }

        let xml = fs::read_to_string(&self.path)
            .map_err(Error::from)
            .context(format!("Reading {}", self.path.display()))?;

        let name =
            parse_project_name(&xml).context(format!("Parsing {}", self.path.display()))?;

        match name {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(Error::missing_config_value("name", &self.path)),
        }
    }
}

/// Fixed project name, for overrides and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProjectName(pub String);

impl StaticProjectName {
    /// Always answer `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl ProjectConfig for StaticProjectName {
    fn project_name(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Extract the trimmed text of the first `<widget><name>` element.
///
/// Namespace prefixes are ignored, so `<w:widget>` works as well. Returns
/// `Ok(None)` when the element is absent.
pub fn parse_project_name(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut name: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }

            Event::Empty(e) => {
                if is_widget(&path) && e.local_name().as_ref() == b"name" {
                    return Ok(Some(String::new()));
                }
            }

            Event::Text(e) if is_name(&path) => {
                let text = e.unescape()?;
                name.get_or_insert_with(String::new).push_str(&text);
            }

            Event::CData(e) if is_name(&path) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                name.get_or_insert_with(String::new).push_str(&text);
            }

            Event::End(_) => {
                if is_name(&path) {
                    return Ok(Some(name.unwrap_or_default().trim().to_string()));
                }
                path.pop();
            }

            Event::Eof => break,

            _ => (),
        }

        buf.clear();
    }

    Ok(None)
}

fn is_widget(path: &[String]) -> bool {
    path.len() == 1 && path[0] == "widget"
}

fn is_name(path: &[String]) -> bool {
    path.len() == 2 && path[0] == "widget" && path[1] == "name"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="com.example.shop" version="1.0.0" xmlns="http://www.w3.org/ns/widgets">
    <name>Shop</name>
    <description>Sample Apache Cordova App</description>
    <platform name="ios">
        <name>NotThisOne</name>
    </platform>
</widget>
"#;

    #[test]
    fn test_parse_project_name() {
        assert_eq!(parse_project_name(MANIFEST).unwrap().as_deref(), Some("Shop"));
    }

    #[test]
    fn test_parse_ignores_nested_name_elements() {
        let xml = concat!(
            r#"<widget><platform name="ios"><name>Nested</name></platform>"#,
            "<name>Top</name></widget>"
        );
        assert_eq!(parse_project_name(xml).unwrap().as_deref(), Some("Top"));
    }

    #[test]
    fn test_parse_trims_and_unescapes() {
        let xml = "<widget>\n  <name>\n    Fish &amp; Chips\n  </name>\n</widget>";
        assert_eq!(parse_project_name(xml).unwrap().as_deref(), Some("Fish & Chips"));
    }

    #[test]
    fn test_parse_prefixed_elements() {
        let xml = concat!(
            r#"<w:widget xmlns:w="http://www.w3.org/ns/widgets">"#,
            "<w:name>Prefixed</w:name></w:widget>"
        );
        assert_eq!(parse_project_name(xml).unwrap().as_deref(), Some("Prefixed"));
    }

    #[test]
    fn test_parse_missing_name() {
        let xml = r#"<widget id="x"><description>none</description></widget>"#;
        assert_eq!(parse_project_name(xml).unwrap(), None);
    }

    #[test]
    fn test_parse_malformed_xml() {
        let err = parse_project_name("<widget><name>Broken</widget>").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_config_xml_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_XML), MANIFEST).unwrap();

        let config = ConfigXml::new(dir.path());
        assert_eq!(config.project_name().unwrap(), "Shop");
    }

    #[test]
    fn test_config_xml_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigXml::new(dir.path()).project_name().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_xml_empty_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_XML), "<widget><name/></widget>").unwrap();

        let err = ConfigXml::new(dir.path()).project_name().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingConfigValue);
    }

    #[test]
    fn test_static_project_name() {
        assert_eq!(StaticProjectName::new("Fixed").project_name().unwrap(), "Fixed");
    }
}
