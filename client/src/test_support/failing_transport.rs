//! Transport double that fails every call.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{CanisterRequest, CanisterTransport, TransportError};

/// Transport that answers every invocation with the same error.
#[derive(Debug)]
pub struct FailingTransport {
    error: TransportError,
    attempts: AtomicUsize,
}

impl FailingTransport {
    /// Fail every call with `error`.
    pub fn new(error: TransportError) -> Self {
        Self {
            error,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of invocations received so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CanisterTransport for FailingTransport {
    async fn invoke(&self, _request: &CanisterRequest) -> Result<Vec<u8>, TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
