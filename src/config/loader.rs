//! Configuration loading and normalization.
//!
//! All three accepted input shapes are normalized into a single
//! [`ConfigDocument`] here, so validation never branches on where the
//! configuration came from.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::error::Category;
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::schema::ConfigDocument;

/// Where a route configuration comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path to a JSON (or `.toml`) document on disk.
    Path(PathBuf),
    /// JSON text.
    Json(String),
    /// Already structured data.
    Value(Value),
}

impl ConfigSource {
    /// Classify a string: JSON text if it starts with `{`, a file path otherwise.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with('{') {
            ConfigSource::Json(text)
        } else {
            ConfigSource::Path(PathBuf::from(text))
        }
    }
}

impl From<&str> for ConfigSource {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for ConfigSource {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::Path(path)
    }
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        ConfigSource::Value(value)
    }
}

/// Normalize any configuration source into a [`ConfigDocument`].
pub fn load(source: impl Into<ConfigSource>) -> Result<ConfigDocument, ConfigError> {
    match source.into() {
        ConfigSource::Path(path) => load_file(&path),
        ConfigSource::Json(text) => parse_json(&text),
        ConfigSource::Value(value) => from_value(value),
    }
}

/// Read a configuration file. Files ending in `.toml` are parsed as TOML,
/// everything else as JSON.
pub fn load_file(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Configuration file read");

    if path.extension().is_some_and(|ext| ext == "toml") {
        return parse_toml(&content);
    }
    parse_json(&content)
}

/// Parse JSON text, separating syntax errors from shape errors.
pub fn parse_json(text: &str) -> Result<ConfigDocument, ConfigError> {
    serde_json::from_str(text).map_err(|e| match e.classify() {
        Category::Data => ConfigError::InvalidDocument(e.to_string()),
        Category::Io | Category::Syntax | Category::Eof => ConfigError::MalformedJson(e),
    })
}

/// Parse TOML text.
///
/// TOML syntax and shape errors both surface as [`ConfigError::MalformedToml`].
pub fn parse_toml(text: &str) -> Result<ConfigDocument, ConfigError> {
    Ok(toml::from_str(text)?)
}

fn from_value(value: Value) -> Result<ConfigDocument, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::InvalidDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_text_detects_json() {
        assert!(matches!(
            ConfigSource::from_text("{\"domain\":{}}"),
            ConfigSource::Json(_)
        ));
        assert_eq!(
            ConfigSource::from_text("routes.json"),
            ConfigSource::Path(PathBuf::from("routes.json"))
        );
        // Only the very first character decides.
        assert!(matches!(
            ConfigSource::from_text(" {}"),
            ConfigSource::Path(_)
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = load("{\"domain\": ").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedJson(_)));
    }

    #[test]
    fn test_wrong_shape_is_invalid_document() {
        let err = load("{\"domain\": {\"scheme\": \"http\"}, \"routes\": []}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDocument(_)));

        let err = load(json!({"domain": {"scheme": 1, "host": "a.test"}, "routes": []}))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDocument(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load("/definitely/not/here/routes.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_document() {
        let doc = parse_toml(
            r#"
            [domain]
            scheme = "https"
            host = "api.test"

            [[routes]]
            method = "GET"
            route = "/"
            controller = "Home::index"
            "#,
        )
        .unwrap();
        assert_eq!(doc.domain.scheme, "https");
        assert_eq!(doc.routes.len(), 1);
        assert_eq!(doc.routes[0].controller, Some(json!("Home::index")));
    }
}
