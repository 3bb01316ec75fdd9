//! Error handling for the InnerTube client.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! pairs a coarse [`ErrorKind`] with the underlying error. The kinds borrow
//! the gRPC status codes so that callers can branch on the *class* of a
//! failure without inspecting error strings.
//!
//! Three classes matter to callers of the stream resolver:
//!
//! * **Transient** ([`Error::is_transient`]): timeouts, refused or dropped
//!   connections. The resolver retries these with backoff.
//! * **Rate limited** ([`Error::is_rate_limited`]): the upstream answered
//!   HTTP 429. Never retried by this crate; callers apply their own cooldown.
//! * Everything else is fatal for the request at hand.
//!
//! Renderer parsing never produces an error: unparseable nodes are skipped.

#![allow(clippy::enum_glob_use)]

use std::fmt;
use thiserror::Error;

/// Error kind and the error that caused it.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

/// Standard result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Classes of failure, numbered after the gRPC status codes they borrow.
#[expect(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum ErrorKind {
    /// Stopped through the resolver's cancellation token.
    #[error("operation was cancelled")]
    Cancelled = 1,

    #[error("unknown error")]
    Unknown = 2,

    /// Input that does not parse: a cipher blob without `s`, `sp` or `url`,
    /// a malformed URL or JSON body, an invalid configuration.
    #[error("invalid argument specified")]
    InvalidArgument = 3,

    #[error("operation timed out")]
    DeadlineExceeded = 4,

    /// Unknown video or browse id, or a response without the expected page.
    #[error("not found")]
    NotFound = 5,

    /// HTTP 403, or a video that is unplayable in this region.
    #[error("permission denied")]
    PermissionDenied = 7,

    /// HTTP 429.
    #[error("rate limited")]
    ResourceExhausted = 8,

    /// The upstream refused the request for another reason.
    #[error("invalid state")]
    FailedPrecondition = 9,

    /// Connection dropped mid-request.
    #[error("operation aborted")]
    Aborted = 10,

    #[error("out of range")]
    OutOfRange = 11,

    #[error("internal error")]
    Internal = 13,

    /// Host unreachable or HTTP 5xx.
    #[error("service unavailable")]
    Unavailable = 14,

    /// Truncated response body.
    #[error("unrecoverable data loss or corruption")]
    DataLoss = 15,

    /// HTTP 401, or a video that needs a signed-in (age verified) account.
    #[error("no valid authentication credentials")]
    Unauthenticated = 16,
}

impl ErrorKind {
    /// Whether an operation failing with this kind may succeed when retried.
    ///
    /// Only network-layer failures qualify. Rate limiting does not.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded | Self::Unavailable | Self::Aborted
        )
    }
}

/// Generates one constructor per error kind.
macro_rules! constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $name<E>(error: E) -> Self
            where
                E: Into<Box<dyn std::error::Error + Send + Sync>>,
            {
                Self::new(ErrorKind::$kind, error)
            }
        )*
    };
}

impl Error {
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind,
            error: error.into(),
        }
    }

    /// Attempts to downcast the underlying error to a concrete type.
    #[must_use]
    pub fn downcast<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// See [`ErrorKind::is_transient`].
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// Whether the upstream service asked us to slow down (HTTP 429).
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.kind == ErrorKind::ResourceExhausted
    }

    constructors! {
        aborted => Aborted,
        cancelled => Cancelled,
        data_loss => DataLoss,
        deadline_exceeded => DeadlineExceeded,
        failed_precondition => FailedPrecondition,
        internal => Internal,
        invalid_argument => InvalidArgument,
        not_found => NotFound,
        out_of_range => OutOfRange,
        permission_denied => PermissionDenied,
        /// Upstream rate limit hit. See [`Error::is_rate_limited`].
        resource_exhausted => ResourceExhausted,
        unauthenticated => Unauthenticated,
        unavailable => Unavailable,
        unknown => Unknown,
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Format: "{kind}: {details}"
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}: ", self.kind)?;
        self.error.fmt(fmt)
    }
}

/// Network failures become transient kinds, file failures (configuration)
/// keep their meaning.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind::*;
        match err.kind() {
            NotFound => Self::not_found(err),
            PermissionDenied => Self::permission_denied(err),
            AddrNotAvailable | ConnectionRefused | NotConnected => Self::unavailable(err),
            BrokenPipe | ConnectionReset | ConnectionAborted => Self::aborted(err),
            TimedOut => Self::deadline_exceeded(err),
            UnexpectedEof => Self::data_loss(err),
            InvalidInput | InvalidData => Self::invalid_argument(err),
            _ => Self::unknown(err),
        }
    }
}

/// Connection and timeout failures become transient kinds, so that the
/// stream resolver retries them.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            ErrorKind::ResourceExhausted
        } else if err.is_timeout() {
            ErrorKind::DeadlineExceeded
        } else if err.is_connect() || err.is_redirect() {
            ErrorKind::Unavailable
        } else if err.is_request() {
            ErrorKind::Aborted
        } else if err.is_body() {
            ErrorKind::DataLoss
        } else if err.is_decode() {
            ErrorKind::InvalidArgument
        } else if err.is_builder() {
            ErrorKind::Internal
        } else if err.is_status() {
            ErrorKind::FailedPrecondition
        } else {
            ErrorKind::Unknown
        };
        Self::new(kind, err)
    }
}

/// Malformed JSON is a parse-class error.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Io => std::io::Error::from(err).into(),
            Category::Eof => Self::data_loss(err),
            Category::Syntax | Category::Data => Self::invalid_argument(err),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(e: http::header::InvalidHeaderName) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(e: tokio::time::error::Elapsed) -> Self {
        Self::deadline_exceeded(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_kinds() {
        assert!(Error::deadline_exceeded("timeout").is_transient());
        assert!(Error::unavailable("refused").is_transient());
        assert!(Error::aborted("reset").is_transient());

        assert!(!Error::invalid_argument("bad blob").is_transient());
        assert!(!Error::cancelled("stop").is_transient());
    }

    #[test]
    fn rate_limit_is_not_transient() {
        let err = Error::resource_exhausted("429");
        assert!(err.is_rate_limited());
        assert!(!err.is_transient());
    }

    #[test]
    fn io_errors_map_to_kinds() {
        let err = Error::from(std::io::Error::from(std::io::ErrorKind::TimedOut));
        assert_eq!(err.kind, ErrorKind::DeadlineExceeded);

        let err = Error::from(std::io::Error::from(std::io::ErrorKind::ConnectionReset));
        assert_eq!(err.kind, ErrorKind::Aborted);
    }

    #[test]
    fn json_syntax_is_parse_class() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(Error::from(err).kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn display_includes_kind() {
        let err = Error::not_found("no such video");
        assert_eq!(err.to_string(), "not found: no such video");
    }
}
