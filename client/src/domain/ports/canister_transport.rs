//! Driven port for delivering encoded calls to a canister.
//!
//! The client owns method selection and Candid encoding; the transport only
//! moves bytes to the addressed canister and back.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CallMode, CanisterId};

/// IC reject code reported when the canister itself rejects a call.
pub const CANISTER_REJECT_CODE: u8 = 4;

/// One encoded call addressed to a canister method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanisterRequest {
    /// Target canister.
    pub canister_id: CanisterId,
    /// Remote method name as declared in the service descriptor.
    pub method: &'static str,
    /// Whether the call may be served as a read-only query.
    pub mode: CallMode,
    /// Candid-encoded argument tuple.
    pub arg: Vec<u8>,
}

define_port_error! {
    /// Errors surfaced while delivering a call to a canister.
    pub enum TransportError {
        /// Network transport failed before receiving a reply.
        Transport {
            /// Failure description from the transport.
            message: String
        } => "canister transport failed: {message}",
        /// No reply arrived before the transport deadline.
        Timeout {
            /// Failure description from the transport.
            message: String
        } => "canister call timed out: {message}",
        /// The replica or canister rejected the call.
        Rejected {
            /// IC reject code (1 sys-fatal through 5 canister-error).
            code: u8,
            /// Reject message reported by the remote side.
            message: String
        } => "canister rejected call with code {code}: {message}",
    }
}

impl TransportError {
    /// Return whether the failure was reported by the remote side rather
    /// than the local transport.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Port for invoking canister methods.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CanisterTransport: Send + Sync {
    /// Deliver one call and return the Candid-encoded reply.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use newshub_client::domain::{CallMode, CanisterId};
    /// use newshub_client::domain::ports::{CanisterRequest, CanisterTransport};
    ///
    /// let reply = transport
    ///     .invoke(&CanisterRequest {
    ///         canister_id: CanisterId::parse("bkyz2-fmaaa-aaaaa-qaaaq-cai")?,
    ///         method: "getAllUsers",
    ///         mode: CallMode::Query,
    ///         arg: candid::encode_args(())?,
    ///     })
    ///     .await?;
    /// ```
    async fn invoke(&self, request: &CanisterRequest) -> Result<Vec<u8>, TransportError>;
}
