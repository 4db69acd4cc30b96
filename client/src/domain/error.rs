//! Client error taxonomy.
//!
//! Construction problems and per-call failures are kept apart so callers can
//! tell a misconfigured client from a failed round trip. Absence of a record
//! is never an error: lookups report it as `Ok(None)`.

use thiserror::Error;

use super::ports::TransportError;

/// Errors surfaced by the news canister client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsClientError {
    /// The service address is not a well-formed principal.
    #[error("cannot resolve canister address '{address}': {reason}")]
    AddressResolution {
        /// Address text as supplied by the caller.
        address: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The transport is missing or could not be configured.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A remote call failed.
    #[error("remote call '{method}' failed")]
    RemoteInvocation {
        /// Remote method name.
        method: &'static str,
        /// Underlying failure.
        #[source]
        cause: InvocationFailure,
    },
}

impl NewsClientError {
    /// Convenience constructor for [`NewsClientError::AddressResolution`].
    pub fn address_resolution(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AddressResolution {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`NewsClientError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`NewsClientError::RemoteInvocation`].
    pub fn remote_invocation(method: &'static str, cause: impl Into<InvocationFailure>) -> Self {
        Self::RemoteInvocation {
            method,
            cause: cause.into(),
        }
    }

    /// Return the failed call's cause, if this is a remote invocation error.
    pub fn invocation_cause(&self) -> Option<&InvocationFailure> {
        match self {
            Self::RemoteInvocation { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Why a remote call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationFailure {
    /// The transport failed, timed out, or the remote side rejected the call.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Arguments could not be encoded as Candid.
    #[error("failed to encode arguments: {message}")]
    Encode {
        /// Codec diagnostic.
        message: String,
    },

    /// The reply did not decode into the declared result shape.
    #[error("failed to decode reply: {message}")]
    Decode {
        /// Codec diagnostic.
        message: String,
    },
}

impl InvocationFailure {
    /// Convenience constructor for [`InvocationFailure::Encode`].
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`InvocationFailure::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Borrow the transport error, when the failure came from the transport.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}
