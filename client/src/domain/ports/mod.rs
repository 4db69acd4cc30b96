//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod canister_transport;
mod news_service;

#[cfg(test)]
pub use canister_transport::MockCanisterTransport;
pub use canister_transport::{
    CANISTER_REJECT_CODE, CanisterRequest, CanisterTransport, TransportError,
};
#[cfg(test)]
pub use news_service::MockNewsService;
pub use news_service::NewsService;
