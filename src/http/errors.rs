//! Error catalog: the fixed set of HTTP conditions a handler can raise.
//!
//! Each supported status code maps to exactly one [`HttpError`] and one
//! human readable message. Handlers raise a condition by status code alone:
//!
//! ```
//! use json_api_router::http::errors::{raise, HttpError, RaiseError};
//!
//! let outcome: Result<(), RaiseError> = raise(404);
//! assert_eq!(outcome, Err(RaiseError::Http(HttpError::NotFound)));
//! assert_eq!(raise::<()>(418), Err(RaiseError::UnknownStatus(418)));
//! ```

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::Envelope;

/// A named HTTP error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HttpError {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    UnsupportedMediaType,
    ExpectationFailed,
    PreconditionRequired,
    TooManyRequests,
    UnavailableForLegalReasons,
}

impl HttpError {
    pub const fn status(self) -> u16 {
        match self {
            HttpError::BadRequest => 400,
            HttpError::Unauthorized => 401,
            HttpError::Forbidden => 403,
            HttpError::NotFound => 404,
            HttpError::MethodNotAllowed => 405,
            HttpError::NotAcceptable => 406,
            HttpError::Conflict => 409,
            HttpError::Gone => 410,
            HttpError::LengthRequired => 411,
            HttpError::PreconditionFailed => 412,
            HttpError::UnsupportedMediaType => 415,
            HttpError::ExpectationFailed => 417,
            HttpError::PreconditionRequired => 428,
            HttpError::TooManyRequests => 429,
            HttpError::UnavailableForLegalReasons => 451,
        }
    }

    /// Condition name, e.g. `"NotFound"`.
    pub const fn name(self) -> &'static str {
        match self {
            HttpError::BadRequest => "BadRequest",
            HttpError::Unauthorized => "Unauthorized",
            HttpError::Forbidden => "Forbidden",
            HttpError::NotFound => "NotFound",
            HttpError::MethodNotAllowed => "MethodNotAllowed",
            HttpError::NotAcceptable => "NotAcceptable",
            HttpError::Conflict => "Conflict",
            HttpError::Gone => "Gone",
            HttpError::LengthRequired => "LengthRequired",
            HttpError::PreconditionFailed => "PreconditionFailed",
            HttpError::UnsupportedMediaType => "UnsupportedMediaType",
            HttpError::ExpectationFailed => "ExpectationFailed",
            HttpError::PreconditionRequired => "PreconditionRequired",
            HttpError::TooManyRequests => "TooManyRequests",
            HttpError::UnavailableForLegalReasons => "UnavailableForLegalReasons",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            HttpError::BadRequest => "The request cannot be fulfilled due to bad syntax.",
            HttpError::Unauthorized => {
                "Similar to 403 Forbidden, but specifically for use when authentication is \
                 required and has failed or has not yet been provided."
            }
            HttpError::Forbidden => {
                "The request was a valid request, but the server is refusing to respond to it."
            }
            HttpError::NotFound => {
                "The requested resource could not be found but may be available again in the \
                 future."
            }
            HttpError::MethodNotAllowed => {
                "A request was made of a resource using a request method not supported by that \
                 resource; for example, using GET on a form which requires data to be presented \
                 via POST, or using PUT on a read-only resource."
            }
            HttpError::NotAcceptable => {
                "The requested resource is only capable of generating content not acceptable \
                 according to the Accept headers sent in the request."
            }
            HttpError::Conflict => {
                "Indicates that the request could not be processed because of conflict in the \
                 request, such as an edit conflict in the case of multiple updates."
            }
            HttpError::Gone => {
                "Indicates that the resource requested is no longer available and will not be \
                 available again."
            }
            HttpError::LengthRequired => {
                "The request did not specify the length of its content, which is required by \
                 the requested resource."
            }
            HttpError::PreconditionFailed => {
                "The server does not meet one of the preconditions that the requester put on \
                 the request."
            }
            HttpError::UnsupportedMediaType => {
                "The request entity has a media type which the server or resource does not \
                 support."
            }
            HttpError::ExpectationFailed => {
                "The server cannot meet the requirements of the Expect request-header field."
            }
            HttpError::PreconditionRequired => {
                "The origin server requires the request to be conditional."
            }
            HttpError::TooManyRequests => {
                "The user has sent too many requests in a given amount of time."
            }
            HttpError::UnavailableForLegalReasons => {
                "The resource is unavailable for legal reasons."
            }
        }
    }

    /// The condition bound to `status`, if the catalog has one.
    pub fn from_status(status: u16) -> Option<Self> {
        lookup(status).map(|entry| entry.condition)
    }

    pub fn status_code(self) -> StatusCode {
        // Every catalog status is a registered HTTP status.
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The envelope this condition is rendered as.
    pub fn envelope(self) -> Envelope<ErrorBody> {
        Envelope::new(
            i64::from(self.status()),
            ErrorBody {
                error: self.name(),
                message: self.message(),
            },
        )
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status(), self.name(), self.message())
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.envelope().into_response()
    }
}

/// `result` payload of an error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

/// One row of the error catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub status: u16,
    pub message: &'static str,
    pub condition: HttpError,
}

impl CatalogEntry {
    const fn of(condition: HttpError) -> Self {
        Self {
            status: condition.status(),
            message: condition.message(),
            condition,
        }
    }

    /// Fail with this entry's condition. Never returns `Ok`.
    pub fn raise<T>(&self) -> Result<T, RaiseError> {
        Err(RaiseError::Http(self.condition))
    }
}

/// Sorted by status.
static CATALOG: [CatalogEntry; 15] = [
    CatalogEntry::of(HttpError::BadRequest),
    CatalogEntry::of(HttpError::Unauthorized),
    CatalogEntry::of(HttpError::Forbidden),
    CatalogEntry::of(HttpError::NotFound),
    CatalogEntry::of(HttpError::MethodNotAllowed),
    CatalogEntry::of(HttpError::NotAcceptable),
    CatalogEntry::of(HttpError::Conflict),
    CatalogEntry::of(HttpError::Gone),
    CatalogEntry::of(HttpError::LengthRequired),
    CatalogEntry::of(HttpError::PreconditionFailed),
    CatalogEntry::of(HttpError::UnsupportedMediaType),
    CatalogEntry::of(HttpError::ExpectationFailed),
    CatalogEntry::of(HttpError::PreconditionRequired),
    CatalogEntry::of(HttpError::TooManyRequests),
    CatalogEntry::of(HttpError::UnavailableForLegalReasons),
];

/// The whole catalog, sorted by status.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn lookup(status: u16) -> Option<&'static CatalogEntry> {
    CATALOG
        .binary_search_by_key(&status, |entry| entry.status)
        .ok()
        .map(|i| &CATALOG[i])
}

/// Fail with the condition bound to `status`.
///
/// Never returns `Ok`. Any status outside the catalog, including values
/// that are not HTTP statuses at all, fails with
/// [`RaiseError::UnknownStatus`].
pub fn raise<T>(status: i64) -> Result<T, RaiseError> {
    match u16::try_from(status).ok().and_then(lookup) {
        Some(entry) => entry.raise(),
        None => Err(RaiseError::UnknownStatus(status)),
    }
}

/// Outcome of [`raise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RaiseError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("status {0} has no entry in the error catalog")]
    UnknownStatus(i64),
}

impl IntoResponse for RaiseError {
    fn into_response(self) -> Response {
        match self {
            RaiseError::Http(condition) => condition.into_response(),
            RaiseError::UnknownStatus(status) => {
                tracing::error!(status, "Handler raised a status outside the error catalog");
                Envelope::new(
                    i64::from(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
                    ErrorBody {
                        error: "UnknownStatus",
                        message: "The handler raised a status that has no catalog entry.",
                    },
                )
                .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const CODES: [u16; 15] = [
        400, 401, 403, 404, 405, 406, 409, 410, 411, 412, 415, 417, 428, 429, 451,
    ];

    #[test]
    fn test_catalog_covers_exactly_the_supported_codes() {
        let statuses: Vec<u16> = entries().iter().map(|e| e.status).collect();
        assert_eq!(statuses, CODES);

        let conditions: HashSet<HttpError> = entries().iter().map(|e| e.condition).collect();
        assert_eq!(conditions.len(), CODES.len());
    }

    #[test]
    fn test_raise_known_codes() {
        for code in CODES {
            let err = raise::<()>(i64::from(code)).unwrap_err();
            match err {
                RaiseError::Http(condition) => {
                    assert_eq!(condition.status(), code);
                    assert_eq!(HttpError::from_status(code), Some(condition));
                    assert_eq!(condition.status_code().as_u16(), code);
                }
                other => panic!("{code} raised {other:?}"),
            }
        }
        assert_eq!(raise::<()>(404), Err(RaiseError::Http(HttpError::NotFound)));
        assert_eq!(
            raise::<()>(429),
            Err(RaiseError::Http(HttpError::TooManyRequests))
        );
    }

    #[test]
    fn test_raise_unknown_codes() {
        for code in [0, 200, 402, 418, 500, 503, u16::MAX] {
            assert_eq!(
                raise::<()>(i64::from(code)),
                Err(RaiseError::UnknownStatus(i64::from(code)))
            );
            assert!(lookup(code).is_none());
        }
    }

    #[test]
    fn test_raise_out_of_range_codes() {
        for code in [-1, -404, 65_936, 70_000, i64::MAX, i64::MIN] {
            assert_eq!(raise::<()>(code), Err(RaiseError::UnknownStatus(code)));
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            lookup(400).unwrap().message,
            "The request cannot be fulfilled due to bad syntax."
        );
        assert_eq!(
            HttpError::PreconditionRequired.message(),
            "The origin server requires the request to be conditional."
        );
        assert!(entries().iter().all(|e| e.message.ends_with('.')));
    }

    #[test]
    fn test_error_envelope() {
        let envelope = HttpError::Gone.envelope();
        assert_eq!(envelope.status, 410);
        assert_eq!(envelope.result.error, "Gone");
    }
}
