//! Transport-side error types.
//!
//! A transport binding reports failures with a `TransportError` carrying the
//! service's error code. The core never inspects or rewraps it.

use std::fmt;

/// Well-known table store service error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TransportErrorCode {
    /// Request parameter rejected by the service.
    #[default]
    OTSParameterInvalid,
    /// Write condition not satisfied.
    OTSConditionCheckFail,
    /// Table or row does not exist.
    OTSObjectNotExist,
    /// Table already exists.
    OTSObjectAlreadyExist,
    /// Service is overloaded.
    OTSServerBusy,
    /// Request timed out.
    OTSTimeout,
    /// Partition is temporarily unavailable.
    OTSPartitionUnavailable,
    /// Capacity quota exceeded.
    OTSQuotaExhausted,
    /// Row operation conflicted with another writer.
    OTSRowOperationConflict,
    /// Transaction id is unknown or expired.
    OTSSessionNotExist,
    /// Authentication failed.
    OTSAuthFailed,
    /// Internal service error.
    OTSInternalServerError,
    /// Network failure before a service answer was received.
    ConnectionError,
}

impl TransportErrorCode {
    /// Returns the service error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OTSParameterInvalid => "OTSParameterInvalid",
            Self::OTSConditionCheckFail => "OTSConditionCheckFail",
            Self::OTSObjectNotExist => "OTSObjectNotExist",
            Self::OTSObjectAlreadyExist => "OTSObjectAlreadyExist",
            Self::OTSServerBusy => "OTSServerBusy",
            Self::OTSTimeout => "OTSTimeout",
            Self::OTSPartitionUnavailable => "OTSPartitionUnavailable",
            Self::OTSQuotaExhausted => "OTSQuotaExhausted",
            Self::OTSRowOperationConflict => "OTSRowOperationConflict",
            Self::OTSSessionNotExist => "OTSSessionNotExist",
            Self::OTSAuthFailed => "OTSAuthFailed",
            Self::OTSInternalServerError => "OTSInternalServerError",
            Self::ConnectionError => "ConnectionError",
        }
    }

    /// Parse a service error code string.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "OTSParameterInvalid" => Some(Self::OTSParameterInvalid),
            "OTSConditionCheckFail" => Some(Self::OTSConditionCheckFail),
            "OTSObjectNotExist" => Some(Self::OTSObjectNotExist),
            "OTSObjectAlreadyExist" => Some(Self::OTSObjectAlreadyExist),
            "OTSServerBusy" => Some(Self::OTSServerBusy),
            "OTSTimeout" => Some(Self::OTSTimeout),
            "OTSPartitionUnavailable" => Some(Self::OTSPartitionUnavailable),
            "OTSQuotaExhausted" => Some(Self::OTSQuotaExhausted),
            "OTSRowOperationConflict" => Some(Self::OTSRowOperationConflict),
            "OTSSessionNotExist" => Some(Self::OTSSessionNotExist),
            "OTSAuthFailed" => Some(Self::OTSAuthFailed),
            "OTSInternalServerError" => Some(Self::OTSInternalServerError),
            "ConnectionError" => Some(Self::ConnectionError),
            _ => None,
        }
    }
}

impl fmt::Display for TransportErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by a transport binding.
#[derive(Debug)]
pub struct TransportError {
    /// The service error code.
    pub code: TransportErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransportError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl TransportError {
    /// Create a new `TransportError` from an error code.
    #[must_use]
    pub fn new(code: TransportErrorCode) -> Self {
        Self {
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `TransportError` with a custom message.
    #[must_use]
    pub fn with_message(code: TransportErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the service might accept the same request later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            TransportErrorCode::OTSServerBusy
                | TransportErrorCode::OTSTimeout
                | TransportErrorCode::OTSPartitionUnavailable
                | TransportErrorCode::OTSQuotaExhausted
                | TransportErrorCode::OTSRowOperationConflict
                | TransportErrorCode::OTSInternalServerError
                | TransportErrorCode::ConnectionError
        )
    }

    // -- Convenience constructors --

    /// Write condition not satisfied.
    #[must_use]
    pub fn condition_check_failed(message: impl Into<String>) -> Self {
        Self::with_message(TransportErrorCode::OTSConditionCheckFail, message)
    }

    /// Table or row not found.
    #[must_use]
    pub fn object_not_exist(message: impl Into<String>) -> Self {
        Self::with_message(TransportErrorCode::OTSObjectNotExist, message)
    }

    /// Table already exists.
    #[must_use]
    pub fn object_already_exist(message: impl Into<String>) -> Self {
        Self::with_message(TransportErrorCode::OTSObjectAlreadyExist, message)
    }

    /// Parameter rejected.
    #[must_use]
    pub fn parameter_invalid(message: impl Into<String>) -> Self {
        Self::with_message(TransportErrorCode::OTSParameterInvalid, message)
    }

    /// Internal service error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(TransportErrorCode::OTSInternalServerError, message)
    }
}

/// Create a `TransportError` from an error code.
///
/// # Examples
///
/// ```
/// use tablestore_model::transport_error;
/// use tablestore_model::error::TransportErrorCode;
///
/// let err = transport_error!(OTSServerBusy);
/// assert_eq!(err.code, TransportErrorCode::OTSServerBusy);
///
/// let err = transport_error!(OTSObjectNotExist, "table users not found");
/// assert_eq!(err.message, "table users not found");
/// ```
#[macro_export]
macro_rules! transport_error {
    ($code:ident) => {
        $crate::error::TransportError::new($crate::error::TransportErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::TransportError::with_message(
            $crate::error::TransportErrorCode::$code,
            $msg,
        )
    };
}
