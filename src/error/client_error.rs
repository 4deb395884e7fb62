use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use super::TransportError;

/// Logical client operation, used to label wrapped transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetProviders,
    GetChannels,
    SendNotification,
}

impl Operation {
    /// Stable, human-readable failure message for this operation
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::GetProviders => "failed to get providers",
            Operation::GetChannels => "failed to get channels",
            Operation::SendNotification => "failed to send notification",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Error returned by every public client operation.
///
/// The underlying [`TransportError`] is never discarded: it is available
/// through [`std::error::Error::source`] and [`ClientError::transport`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Client could not be created from the given configuration
    #[error("failed to create client")]
    Construction {
        #[source]
        source: TransportError,
    },

    /// Request rejected before anything was sent
    #[error("invalid notification request: {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    /// A round trip for the named operation failed
    #[error("{operation}")]
    Operation {
        operation: Operation,
        #[source]
        source: TransportError,
    },
}

impl ClientError {
    pub(crate) fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Operation that failed, if the error came from a round trip
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ClientError::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Wrapped transport failure, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            ClientError::Construction { source } | ClientError::Operation { source, .. } => {
                Some(source)
            }
            ClientError::InvalidRequest { .. } => None,
        }
    }

    /// HTTP status of the failed response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        self.transport().and_then(TransportError::status)
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
