//! Route pattern parsing for the bundled axum engine.
//!
//! # Responsibilities
//! - Split a pattern into literal segments and `{name}` / `{name:constraint}`
//!   placeholders
//! - Capture placeholder values from the segments of a request path
//! - Check captured values against placeholder constraints
//!
//! # Design Decisions
//! - Placeholders must span a whole segment and never capture an empty one
//! - Literal segments compare against the raw path; captures are decoded by
//!   the caller
//! - Constraints are anchored regular expressions, compiled once at mount

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

const NUMBER: &str = "[0-9]+";
const WORD: &str = "[a-zA-Z]+";
const ALPHANUM_DASH: &str = "[a-zA-Z0-9_-]+";
const SLUG: &str = "[a-z0-9-]+";
const UUID: &str = "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// Errors for patterns the axum engine cannot express.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {pattern:?} has an unsupported segment {segment:?}")]
    InvalidSegment { pattern: String, segment: String },

    #[error("pattern {pattern:?} uses placeholder {name:?} twice")]
    DuplicatePlaceholder { pattern: String, name: String },

    #[error("pattern {pattern:?} has an invalid constraint for {name:?}: {source}")]
    InvalidConstraint {
        pattern: String,
        name: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Capture,
}

#[derive(Debug, Clone)]
struct Placeholder {
    name: String,
    constraint: Option<Regex>,
}

/// A parsed route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    placeholders: Vec<Placeholder>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        };

        let mut segments = Vec::new();
        let mut placeholders: Vec<Placeholder> = Vec::new();

        for segment in rest.split('/') {
            let Some(inner) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            else {
                if segment.contains(|c: char| c == '{' || c == '}')
                    || segment.starts_with(|c: char| c == ':' || c == '*')
                {
                    return Err(PatternError::InvalidSegment {
                        pattern: pattern.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segments.push(Segment::Literal(segment.to_string()));
                continue;
            };

            let (name, constraint) = match inner.split_once(':') {
                Some((name, constraint)) => (name, Some(constraint)),
                None => (inner, None),
            };
            if !is_valid_name(name) {
                return Err(PatternError::InvalidSegment {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                });
            }
            if placeholders.iter().any(|p| p.name == name) {
                return Err(PatternError::DuplicatePlaceholder {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }

            let constraint = constraint
                .map(compile_constraint)
                .transpose()
                .map_err(|source| PatternError::InvalidConstraint {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                    source,
                })?;

            segments.push(Segment::Capture);
            placeholders.push(Placeholder {
                name: name.to_string(),
                constraint,
            });
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            placeholders,
        })
    }

    /// The pattern as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Raw placeholder values if `path` (split on `/` after the leading
    /// slash) has this pattern's literals and segment count.
    pub fn capture<'a>(&self, path: &[&'a str]) -> Option<Vec<&'a str>> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut values = Vec::with_capacity(self.placeholders.len());
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Capture if !value.is_empty() => values.push(*value),
                _ => return None,
            }
        }
        Some(values)
    }

    /// True if positional `values` satisfy every constraint.
    pub fn accepts(&self, values: &[String]) -> bool {
        values.len() == self.placeholders.len()
            && self
                .placeholders
                .iter()
                .zip(values)
                .all(|(p, v)| p.constraint.as_ref().map_or(true, |re| re.is_match(v)))
    }

    /// Name positional `values`.
    pub fn bind(&self, values: &[String]) -> HashMap<String, String> {
        self.placeholders
            .iter()
            .zip(values)
            .map(|(p, v)| (p.name.clone(), v.clone()))
            .collect()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn compile_constraint(constraint: &str) -> Result<Regex, regex::Error> {
    let expr = match constraint {
        "number" => NUMBER,
        "word" => WORD,
        "alphanum_dash" => ALPHANUM_DASH,
        "slug" => SLUG,
        "uuid" => UUID,
        custom => custom,
    };
    Regex::new(&format!("^(?:{expr})$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn segments(path: &str) -> Vec<&str> {
        path[1..].split('/').collect()
    }

    #[test]
    fn test_literal_patterns() {
        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.placeholder_count(), 0);
        assert!(root.accepts(&[]));
        assert_eq!(root.capture(&segments("/")), Some(vec![]));
        assert_eq!(root.capture(&segments("/users")), None);

        let nested = PathPattern::parse("/api/v1/status/").unwrap();
        assert_eq!(nested.capture(&segments("/api/v1/status/")), Some(vec![]));
        assert_eq!(nested.capture(&segments("/api/v1/status")), None);
    }

    #[test]
    fn test_placeholders_become_positional() {
        let pattern = PathPattern::parse("/users/{id:number}/posts/{slug}").unwrap();
        assert_eq!(pattern.as_str(), "/users/{id:number}/posts/{slug}");
        assert_eq!(
            pattern.capture(&segments("/users/42/posts/hello")),
            Some(vec!["42", "hello"])
        );
        assert_eq!(pattern.capture(&segments("/users/42/comments/hello")), None);
        assert_eq!(pattern.capture(&segments("/users//posts/hello")), None);

        let bound = pattern.bind(&values(&["42", "hello"]));
        assert_eq!(bound["id"], "42");
        assert_eq!(bound["slug"], "hello");
    }

    #[test]
    fn test_named_constraints() {
        let cases = [
            ("number", "123", "12a"),
            ("word", "Hello", "hello1"),
            ("alphanum_dash", "a-b_c9", "a.b"),
            ("slug", "my-post-1", "My-Post"),
            ("uuid", "123e4567-e89b-12d3-a456-426614174000", "123e4567"),
        ];
        for (constraint, good, bad) in cases {
            let pattern = PathPattern::parse(&format!("/{{v:{constraint}}}")).unwrap();
            assert!(pattern.accepts(&values(&[good])), "{constraint} rejects {good}");
            assert!(!pattern.accepts(&values(&[bad])), "{constraint} accepts {bad}");
        }
    }

    #[test]
    fn test_custom_regex_constraint() {
        let pattern = PathPattern::parse("/year/{y:[0-9]{4}}").unwrap();
        assert!(pattern.accepts(&values(&["2024"])));
        assert!(!pattern.accepts(&values(&["24"])));
        assert!(!pattern.accepts(&values(&["20245"])));
    }

    #[test]
    fn test_rejected_patterns() {
        assert!(matches!(
            PathPattern::parse("users"),
            Err(PatternError::MissingLeadingSlash(_))
        ));
        assert!(matches!(
            PathPattern::parse("/files/{name}.json"),
            Err(PatternError::InvalidSegment { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id"),
            Err(PatternError::InvalidSegment { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/{}"),
            Err(PatternError::InvalidSegment { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/{a}/{a}"),
            Err(PatternError::DuplicatePlaceholder { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/{a:[0-9}"),
            Err(PatternError::InvalidConstraint { .. })
        ));
    }
}
