//! Typed client for the newshub news-publishing canister.
//!
//! The crate is split along a hexagonal boundary: `domain` holds the records,
//! the service descriptor, the ports, and the client; `outbound` holds the
//! `ic-agent` transport adapter; `config` and `bootstrap` wire settings into a
//! ready client.

mod bootstrap;
pub mod codec;
pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use config::ClientSettings;
pub use domain::ports::NewsService;
pub use domain::{NewsAppClient, NewsClientError};
