//! Error types for the OpenStack inventory client.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors raised while talking to Keystone or Cinder.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum OpenStackError {
    /// Raised when an OpenStack endpoint cannot be reached.
    #[error("OpenStack unreachable: {0}")]
    Transport(#[from] TransportError),
    /// Raised when Keystone rejects the configured credentials.
    #[error("Keystone authentication failed with status {status}: {message}")]
    Authentication {
        /// Status returned by Keystone.
        status: u16,
        /// Error text extracted from the response.
        message: String,
    },
    /// Raised when Keystone accepts the credentials but returns no token.
    #[error("Keystone response did not include an X-Subject-Token header")]
    MissingToken,
    /// Raised when the service catalog has no usable block storage endpoint.
    #[error("no public block storage endpoint in the service catalog{region_hint}")]
    EndpointNotFound {
        /// Region suffix for the message, empty when no region was requested.
        region_hint: String,
    },
    /// Raised when Cinder refuses the volume listing.
    #[error("volume listing failed with status {status}: {message}")]
    Listing {
        /// Status returned by Cinder.
        status: u16,
        /// Error text extracted from the response.
        message: String,
    },
    /// Raised when a response body does not match the expected schema.
    #[error("failed to parse {resource} response: {message}")]
    Parse {
        /// Resource being parsed (for example `token`).
        resource: String,
        /// Parser error message.
        message: String,
    },
}
