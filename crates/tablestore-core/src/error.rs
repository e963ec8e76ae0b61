//! Core error type for table store request assembly.
//!
//! Every variant except `Transport` is raised before the transport is
//! called. Transport failures pass through untouched.

use tablestore_model::error::TransportError;

/// Errors produced while compiling expressions, merging options, or
/// submitting requests.
#[derive(Debug, thiserror::Error)]
pub enum TableStoreError {
    /// Row existence symbol is not one of `ignore`, `expect_exist`, `expect_not_exist`.
    #[error("Invalid row existence: {0}")]
    InvalidExistence(String),
    /// Inline column option block is malformed.
    #[error("Invalid filter expression: {0}")]
    InvalidFilterExpression(String),
    /// An expression references a binding that was not supplied.
    #[error("Unbound variable '{name}' in expression: {expression}")]
    UnboundVariable {
        /// The missing binding.
        name: String,
        /// The comparison that referenced it.
        expression: String,
    },
    /// Filter text failed to parse or uses an unknown operator.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    /// Return type symbol is not one of `none`, `pk`, `after_modify`.
    #[error("Invalid return type: {0}")]
    InvalidReturnType(String),
    /// Direction symbol is not one of `forward`, `backward`.
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    /// Batch write kind is not one of `put`, `update`, `delete`.
    #[error("Invalid operation kind: {0}")]
    InvalidOperationKind(String),
    /// Time range is neither a single instant nor a start/end pair.
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
    /// Option value does not fit the shape of its target field.
    #[error("Invalid value for option '{key}': {value}")]
    InvalidOptionValue {
        /// Option key.
        key: String,
        /// Description of the rejected value.
        value: String,
    },
    /// No transport is registered for the instance.
    #[error("Unknown instance: {0}")]
    UnknownInstance(String),
    /// Transport answered with a response of the wrong kind.
    #[error("Unexpected response for {operation}: got {received}")]
    UnexpectedResponse {
        /// Operation that was submitted.
        operation: String,
        /// Kind of response that came back.
        received: String,
    },
    /// Error reported by the transport binding.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl TableStoreError {
    /// Shape mismatch for an option value.
    #[must_use]
    pub fn invalid_option(key: &str, value: &tablestore_model::OptionValue) -> Self {
        Self::InvalidOptionValue {
            key: key.to_owned(),
            value: format!("{} {value:?}", value.kind()),
        }
    }

    /// Whether the error was raised locally, before any transport call.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

/// Result alias for table store core operations.
pub type TableStoreResult<T> = Result<T, TableStoreError>;
