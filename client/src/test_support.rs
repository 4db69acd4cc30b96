//! Test utilities for the client crate.
//!
//! This module provides transport doubles shared by unit tests (in `src/`)
//! and integration tests (in `tests/`). It is only compiled with the
//! `test-support` feature.

use std::sync::Arc;

use candid::Principal;

use crate::domain::ports::CanisterTransport;
use crate::domain::{CanisterId, NewsAppClient};

pub mod failing_transport;
pub mod in_memory_canister;

pub use failing_transport::FailingTransport;
pub use in_memory_canister::{InMemoryNewsCanister, RecordedCall};

/// Principal used by test clients (`bkyz2-fmaaa-aaaaa-qaaaq-cai`).
pub const TEST_CANISTER_ID: &str = "bkyz2-fmaaa-aaaaa-qaaaq-cai";

/// Raw bytes of [`TEST_CANISTER_ID`].
const TEST_CANISTER_BYTES: [u8; 10] = [0x80, 0, 0, 0, 0, 0x10, 0, 1, 1, 1];

/// [`TEST_CANISTER_ID`] as a parsed address.
pub const TEST_CANISTER: CanisterId =
    CanisterId::from_principal(Principal::from_slice(&TEST_CANISTER_BYTES));

/// Bind `transport` to [`TEST_CANISTER_ID`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use newshub_client::test_support::{InMemoryNewsCanister, news_client};
///
/// let client = news_client(Arc::new(InMemoryNewsCanister::default()));
/// assert_eq!(client.canister_id().to_string(), "bkyz2-fmaaa-aaaaa-qaaaq-cai");
/// ```
pub fn news_client(transport: Arc<dyn CanisterTransport>) -> NewsAppClient {
    NewsAppClient::new(transport, TEST_CANISTER)
}
