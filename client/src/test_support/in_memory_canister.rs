//! In-memory stand-in for the news canister.
//!
//! The double decodes Candid arguments and encodes Candid replies exactly as
//! the deployed canister would, so the client's codec path is exercised end
//! to end without a replica. Every create mints a fresh UUID; nothing is
//! deduplicated.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use candid::CandidType;
use candid::utils::ArgumentDecoder;
use uuid::Uuid;

use crate::codec::{ArticleRecord, JournalistRecord, UserRecord};
use crate::domain::ports::{
    CANISTER_REJECT_CODE, CanisterRequest, CanisterTransport, TransportError,
};
use crate::domain::{CallMode, NewsMethod};

/// IC reject code for a trapped or misbehaving canister.
const CANISTER_ERROR_CODE: u8 = 5;

/// Principal text used as the caller when none is configured.
pub const ANONYMOUS_CALLER: &str = "2vxsx-fae";

/// One call observed by the double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Remote method name.
    pub method: &'static str,
    /// Mode the client requested.
    pub mode: CallMode,
}

#[derive(Debug)]
struct StoredUser {
    owner: String,
    record: UserRecord,
}

#[derive(Debug, Default)]
struct CanisterState {
    users: Vec<StoredUser>,
    journalists: Vec<JournalistRecord>,
}

/// News canister served from memory.
#[derive(Debug)]
pub struct InMemoryNewsCanister {
    caller: String,
    state: Mutex<CanisterState>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for InMemoryNewsCanister {
    fn default() -> Self {
        Self::with_caller(ANONYMOUS_CALLER)
    }
}

impl InMemoryNewsCanister {
    /// Serve calls as if they were signed by `caller`.
    ///
    /// Users created through this double are owned by `caller`, and
    /// `getUser` returns the first of them.
    pub fn with_caller(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            state: Mutex::new(CanisterState::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, in arrival order.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of users currently stored.
    pub fn user_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .len()
    }

    fn record(&self, request: &CanisterRequest) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: request.method,
                mode: request.mode,
            });
    }

    fn serve(&self, method: NewsMethod, arg: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match method {
            NewsMethod::GetUser => {
                decode_args::<()>(arg)?;
                let user = state
                    .users
                    .iter()
                    .find(|stored| stored.owner == self.caller)
                    .map(|stored| stored.record.clone());
                encode_reply(&user)
            }
            NewsMethod::GetAllUsers => {
                decode_args::<()>(arg)?;
                let users = state
                    .users
                    .iter()
                    .map(|stored| stored.record.clone())
                    .collect::<Vec<_>>();
                encode_reply(&users)
            }
            NewsMethod::CreateUser => {
                let (name, email) = decode_args::<(String, String)>(arg)?;
                state.users.push(StoredUser {
                    owner: self.caller.clone(),
                    record: UserRecord {
                        id: fresh_id(),
                        name,
                        email,
                        requested_topics: Vec::new(),
                    },
                });
                empty_reply()
            }
            NewsMethod::RequestTopic => {
                let (user_id, topic) = decode_args::<(String, String)>(arg)?;
                let stored = state
                    .users
                    .iter_mut()
                    .find(|stored| stored.record.id == user_id)
                    .ok_or_else(|| reject(format!("user {user_id} not found")))?;
                stored.record.requested_topics.push(topic);
                empty_reply()
            }
            NewsMethod::GetAllJournalists => {
                decode_args::<()>(arg)?;
                encode_reply(&state.journalists)
            }
            NewsMethod::GetJournalistById => {
                let (journalist_id,) = decode_args::<(String,)>(arg)?;
                let journalist = state
                    .journalists
                    .iter()
                    .find(|journalist| journalist.id == journalist_id)
                    .cloned();
                encode_reply(&journalist)
            }
            NewsMethod::CreateJournalist => {
                let (name, email) = decode_args::<(String, String)>(arg)?;
                state.journalists.push(JournalistRecord {
                    id: fresh_id(),
                    name,
                    email,
                    articles: Vec::new(),
                });
                empty_reply()
            }
            NewsMethod::UploadArticle => {
                let (journalist_id, title, content, topic) =
                    decode_args::<(String, String, String, String)>(arg)?;
                let journalist = state
                    .journalists
                    .iter_mut()
                    .find(|journalist| journalist.id == journalist_id)
                    .ok_or_else(|| reject(format!("journalist {journalist_id} not found")))?;
                journalist.articles.push(ArticleRecord {
                    id: fresh_id(),
                    title,
                    content,
                    topic,
                    journalist_id,
                });
                empty_reply()
            }
        }
    }
}

#[async_trait]
impl CanisterTransport for InMemoryNewsCanister {
    async fn invoke(&self, request: &CanisterRequest) -> Result<Vec<u8>, TransportError> {
        self.record(request);
        let method = NewsMethod::from_name(request.method).ok_or_else(|| {
            TransportError::rejected(
                CANISTER_ERROR_CODE,
                format!("canister has no method '{}'", request.method),
            )
        })?;
        if request.mode.is_query() && !method.mode().is_query() {
            return Err(TransportError::rejected(
                CANISTER_ERROR_CODE,
                format!("canister has no query method '{}'", request.method),
            ));
        }
        self.serve(method, &request.arg)
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn reject(message: String) -> TransportError {
    TransportError::rejected(CANISTER_REJECT_CODE, message)
}

fn decode_args<T>(arg: &[u8]) -> Result<T, TransportError>
where
    T: for<'de> ArgumentDecoder<'de>,
{
    candid::decode_args(arg).map_err(|error| {
        TransportError::rejected(CANISTER_ERROR_CODE, format!("invalid arguments: {error}"))
    })
}

fn encode_reply<T: CandidType>(value: &T) -> Result<Vec<u8>, TransportError> {
    candid::encode_one(value).map_err(|error| {
        TransportError::rejected(CANISTER_ERROR_CODE, format!("invalid reply: {error}"))
    })
}

fn empty_reply() -> Result<Vec<u8>, TransportError> {
    candid::encode_args(()).map_err(|error| {
        TransportError::rejected(CANISTER_ERROR_CODE, format!("invalid reply: {error}"))
    })
}
