//! Error types for the DNS Services reconciler
//!
//! [`Error`] is what callers of the provider see. [`ClientError`] is what a
//! [`ZoneClient`](crate::traits::ZoneClient) returns; the provider wraps it
//! with the operation that issued the call.

use std::fmt;

use thiserror::Error;

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// The desired record or zone failed validation. Checked before any I/O.
    #[error("invalid dns input data: {0}")]
    InvalidInput(ValidationErrors),

    /// No zone client is registered for the zone id
    #[error("unknown zone: {0}")]
    UnknownZone(String),

    /// Reading records from the remote service failed
    #[error("{operation}: failed to {call} dns records: {source}")]
    RemoteReadFailed {
        /// Caller-facing operation (ensure, delete, lookup, ...)
        operation: &'static str,
        /// Zone client call that failed
        call: &'static str,
        source: ClientError,
    },

    /// Creating, updating or deleting a remote record failed
    #[error("{operation}: failed to {call} the dns record: {source}")]
    RemoteWriteFailed {
        /// Caller-facing operation (ensure, delete, ...)
        operation: &'static str,
        /// Zone client call that failed
        call: &'static str,
        source: ClientError,
    },

    /// The remote service returned a record whose payload cannot be parsed
    #[error("malformed remote record {record_id}: {reason}")]
    MalformedRemoteRecord {
        /// Remote record id
        record_id: String,
        /// What was wrong with the payload
        reason: String,
    },

    /// Provider configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more zone clients failed the startup probe
    #[error("failed to validate dns services: {}", .0.join(", "))]
    ZoneValidation(Vec<String>),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed remote record error
    pub fn malformed(record_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRemoteRecord {
            record_id: record_id.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn read(operation: &'static str, call: &'static str, source: ClientError) -> Self {
        Self::RemoteReadFailed {
            operation,
            call,
            source,
        }
    }

    pub(crate) fn write(operation: &'static str, call: &'static str, source: ClientError) -> Self {
        Self::RemoteWriteFailed {
            operation,
            call,
            source,
        }
    }

    /// Validation messages, if this is an [`Error::InvalidInput`]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Every validation problem found on a single call
///
/// Displays a single problem as-is and several as `[a, b]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Record a problem
    pub fn push(&mut self, msg: impl Into<String>) {
        self.0.push(msg.into());
    }

    /// Whether no problem was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded problems
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Recorded problems in the order they were found
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when empty, otherwise [`Error::InvalidInput`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [single] => f.write_str(single),
            many => write!(f, "[{}]", many.join(", ")),
        }
    }
}

/// Errors reported by a zone client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The remote service answered 404
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote service answered with any other non-success status
    #[error("status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },

    /// The request never produced a response
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ClientError {
    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether the remote service reported the resource as absent
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Status { status, .. } => *status == 404,
            Self::Transport(_) => false,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}
