//! Internet Computer agent adapters.
//!
//! This module provides the production implementation of the
//! `CanisterTransport` port.

mod transport;

pub use transport::{AgentTransport, AgentTransportConfig};
