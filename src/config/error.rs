//! Configuration error taxonomy.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::routing::HttpMethod;

/// A required field of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteField {
    Method,
    Route,
    Controller,
}

impl RouteField {
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteField::Method => "method",
            RouteField::Route => "route",
            RouteField::Controller => "controller",
        }
    }
}

impl fmt::Display for RouteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading and validating route configuration.
///
/// Every variant is fatal: nothing is registered once one is returned.
/// Route indices are zero-based positions in the `routes` array.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed JSON.
    #[error("malformed JSON configuration: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// A `.toml` configuration file is not well-formed TOML.
    #[error("malformed TOML configuration: {0}")]
    MalformedToml(#[from] toml::de::Error),

    /// Well-formed input that lacks `domain.scheme`, `domain.host` or `routes`,
    /// or carries them with the wrong type.
    #[error("invalid configuration document: {0}")]
    InvalidDocument(String),

    /// `scheme://host` is not a valid absolute URL.
    #[error("Invalid URL: \"{0}\"")]
    InvalidUrl(String),

    /// The domain scheme is not exactly `http` or `https`.
    #[error("Scheme: \"{0}\" is not a valid scheme. Use one of: [http, https].")]
    InvalidScheme(String),

    /// A route entry lacks one of its required fields.
    #[error("{field} is not set in route #{index}.")]
    MissingField { field: RouteField, index: usize },

    /// A route entry declares a method outside the fixed method set.
    #[error(
        "Method: {method} in route #{index} is not a valid method. Use one of: [{allowed}].",
        allowed = HttpMethod::allowed_list()
    )]
    InvalidMethod { method: String, index: usize },

    /// A route field is present but not of the expected JSON type.
    #[error("{field} in route #{index} must be a {expected}")]
    InvalidFieldType {
        field: RouteField,
        index: usize,
        expected: &'static str,
    },

    /// A controller name has no handler in the registry.
    #[error("controller \"{controller}\" in route #{index} is not registered")]
    UnknownController { controller: String, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_method_lists_all_methods() {
        let err = ConfigError::InvalidMethod {
            method: "\"TRACE\"".to_string(),
            index: 2,
        };
        assert_eq!(
            err.to_string(),
            "Method: \"TRACE\" in route #2 is not a valid method. \
             Use one of: [GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS]."
        );
    }

    #[test]
    fn test_missing_field_names_field_and_position() {
        let err = ConfigError::MissingField {
            field: RouteField::Controller,
            index: 0,
        };
        assert_eq!(err.to_string(), "controller is not set in route #0.");
    }
}
