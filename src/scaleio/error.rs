//! Error types for the ScaleIO gateway client.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors raised while resolving volumes through the ScaleIO gateway.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScaleIoError {
    /// Raised when the gateway cannot be reached.
    #[error("ScaleIO gateway unreachable: {0}")]
    Transport(#[from] TransportError),
    /// Raised when `/api/login` rejects the configured credentials.
    #[error("ScaleIO login failed with status {status}")]
    Login {
        /// Status returned by the login endpoint.
        status: u16,
    },
    /// Raised when a request is still rejected after logging in again.
    #[error("ScaleIO gateway rejected the refreshed token with status {status}")]
    Unauthorized {
        /// Status returned by the retried request.
        status: u16,
    },
    /// Raised when a successful response carries no usable value.
    #[error("unexpected {endpoint} response body: {body:?}")]
    MalformedBody {
        /// Endpoint that produced the body.
        endpoint: String,
        /// Raw body text.
        body: String,
    },
}
