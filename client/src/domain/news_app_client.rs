//! Typed client for the news canister.
//!
//! The client owns no state beyond its transport handle and target
//! address. Each method encodes its arguments, dispatches one call in the
//! mode the descriptor declares, and decodes the reply. Failures are never
//! retried or replaced with fallback values.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use candid::utils::ArgumentEncoder;
use candid::{CandidType, IDLArgs, IDLValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::ports::{CanisterRequest, CanisterTransport, NewsService};
use super::{
    CanisterId, InvocationFailure, Journalist, JournalistId, NewsClientError, NewsMethod, User,
    UserId,
};
use crate::codec::{JournalistRecord, UserRecord};

/// Client bound to one news canister through a shared transport.
///
/// Cloning is cheap; clones share the transport handle.
#[derive(Clone)]
pub struct NewsAppClient {
    transport: Arc<dyn CanisterTransport>,
    canister_id: CanisterId,
}

impl NewsAppClient {
    /// Bind a transport to a parsed canister address.
    pub fn new(transport: Arc<dyn CanisterTransport>, canister_id: CanisterId) -> Self {
        Self {
            transport,
            canister_id,
        }
    }

    /// Start building a client from unvalidated parts.
    pub fn builder() -> NewsAppClientBuilder {
        NewsAppClientBuilder::default()
    }

    /// Address of the bound canister.
    pub fn canister_id(&self) -> CanisterId {
        self.canister_id
    }

    async fn call(
        &self,
        method: NewsMethod,
        args: impl ArgumentEncoder,
    ) -> Result<Vec<u8>, NewsClientError> {
        let arg = candid::encode_args(args).map_err(|error| {
            NewsClientError::remote_invocation(
                method.name(),
                InvocationFailure::encode(error.to_string()),
            )
        })?;
        let request = CanisterRequest {
            canister_id: self.canister_id,
            method: method.name(),
            mode: method.mode(),
            arg,
        };

        debug!(
            method = method.name(),
            mode = ?request.mode,
            canister = %self.canister_id,
            "dispatching canister call"
        );
        self.transport.invoke(&request).await.map_err(|error| {
            warn!(method = method.name(), %error, "canister call failed");
            NewsClientError::remote_invocation(method.name(), error)
        })
    }
}

impl fmt::Debug for NewsAppClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsAppClient")
            .field("canister_id", &self.canister_id)
            .finish_non_exhaustive()
    }
}

fn decode_reply<T>(method: NewsMethod, reply: &[u8]) -> Result<T, NewsClientError>
where
    T: CandidType + DeserializeOwned,
{
    candid::decode_one(reply).map_err(|error| decode_failure(method, error))
}

/// Decode an `opt` reply strictly.
///
/// The reply must hold exactly one `opt` value whose payload decodes as `T`.
/// Candid's optional coercion is bypassed so a mismatched shape is a decode
/// failure rather than `None`.
fn decode_optional_reply<T>(method: NewsMethod, reply: &[u8]) -> Result<Option<T>, NewsClientError>
where
    T: CandidType + DeserializeOwned,
{
    let IDLArgs { args } =
        IDLArgs::from_bytes(reply).map_err(|error| decode_failure(method, error))?;
    let value = match <[IDLValue; 1]>::try_from(args) {
        Ok([value]) => value,
        Err(args) => {
            return Err(decode_failure(
                method,
                format!("expected one reply value, found {}", args.len()),
            ));
        }
    };
    match value {
        IDLValue::None => Ok(None),
        IDLValue::Opt(inner) => {
            let payload = IDLArgs::new(&[*inner])
                .to_bytes()
                .map_err(|error| decode_failure(method, error))?;
            decode_reply(method, &payload).map(Some)
        }
        other => Err(decode_failure(
            method,
            format!("expected an opt reply, found {}", other.value_ty()),
        )),
    }
}

fn decode_empty_reply(method: NewsMethod, reply: &[u8]) -> Result<(), NewsClientError> {
    candid::decode_args::<()>(reply).map_err(|error| decode_failure(method, error))
}

fn decode_failure(method: NewsMethod, error: impl fmt::Display) -> NewsClientError {
    warn!(method = method.name(), %error, "canister reply did not decode");
    NewsClientError::remote_invocation(method.name(), InvocationFailure::decode(error.to_string()))
}

#[async_trait]
impl NewsService for NewsAppClient {
    async fn get_user(&self) -> Result<Option<User>, NewsClientError> {
        let method = NewsMethod::GetUser;
        let reply = self.call(method, ()).await?;
        let record: Option<UserRecord> = decode_optional_reply(method, &reply)?;
        Ok(record.map(User::from))
    }

    async fn get_all_users(&self) -> Result<Vec<User>, NewsClientError> {
        let method = NewsMethod::GetAllUsers;
        let reply = self.call(method, ()).await?;
        let records: Vec<UserRecord> = decode_reply(method, &reply)?;
        Ok(records.into_iter().map(User::from).collect())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<(), NewsClientError> {
        let method = NewsMethod::CreateUser;
        let reply = self.call(method, (name, email)).await?;
        decode_empty_reply(method, &reply)
    }

    async fn request_topic(&self, user_id: &UserId, topic: &str) -> Result<(), NewsClientError> {
        let method = NewsMethod::RequestTopic;
        let reply = self.call(method, (user_id.as_str(), topic)).await?;
        decode_empty_reply(method, &reply)
    }

    async fn get_all_journalists(&self) -> Result<Vec<Journalist>, NewsClientError> {
        let method = NewsMethod::GetAllJournalists;
        let reply = self.call(method, ()).await?;
        let records: Vec<JournalistRecord> = decode_reply(method, &reply)?;
        Ok(records.into_iter().map(Journalist::from).collect())
    }

    async fn get_journalist_by_id(
        &self,
        journalist_id: &JournalistId,
    ) -> Result<Option<Journalist>, NewsClientError> {
        let method = NewsMethod::GetJournalistById;
        let reply = self.call(method, (journalist_id.as_str(),)).await?;
        let record: Option<JournalistRecord> = decode_optional_reply(method, &reply)?;
        Ok(record.map(Journalist::from))
    }

    async fn create_journalist(&self, name: &str, email: &str) -> Result<(), NewsClientError> {
        let method = NewsMethod::CreateJournalist;
        let reply = self.call(method, (name, email)).await?;
        decode_empty_reply(method, &reply)
    }

    async fn upload_article(
        &self,
        journalist_id: &JournalistId,
        title: &str,
        content: &str,
        topic: &str,
    ) -> Result<(), NewsClientError> {
        let method = NewsMethod::UploadArticle;
        let reply = self
            .call(method, (journalist_id.as_str(), title, content, topic))
            .await?;
        decode_empty_reply(method, &reply)
    }
}

/// Builder validating the transport and address before binding a client.
#[derive(Default)]
pub struct NewsAppClientBuilder {
    transport: Option<Arc<dyn CanisterTransport>>,
    canister_id: Option<String>,
}

impl NewsAppClientBuilder {
    /// Use `transport` for every call.
    pub fn transport(mut self, transport: Arc<dyn CanisterTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Target the canister with this textual principal.
    pub fn canister_id(mut self, canister_id: impl Into<String>) -> Self {
        self.canister_id = Some(canister_id.into());
        self
    }

    /// Validate the parts and bind the client.
    ///
    /// # Errors
    ///
    /// Returns [`NewsClientError::Configuration`] when no transport or no
    /// canister id was supplied, and [`NewsClientError::AddressResolution`]
    /// when the canister id does not parse.
    pub fn build(self) -> Result<NewsAppClient, NewsClientError> {
        let transport = self
            .transport
            .ok_or_else(|| NewsClientError::configuration("transport handle is missing"))?;
        let raw_id = self
            .canister_id
            .ok_or_else(|| NewsClientError::configuration("canister id is not set"))?;
        let canister_id = CanisterId::parse(&raw_id)?;
        Ok(NewsAppClient::new(transport, canister_id))
    }
}

#[cfg(test)]
mod tests {
    //! Dispatch and decoding coverage against a mocked transport.

    use super::*;
    use crate::codec::ArticleRecord;
    use crate::domain::CallMode;
    use crate::domain::ports::{MockCanisterTransport, TransportError};
    use rstest::{fixture, rstest};

    const CANISTER: &str = "bkyz2-fmaaa-aaaaa-qaaaq-cai";

    #[fixture]
    fn canister_id() -> CanisterId {
        CanisterId::parse(CANISTER).expect("fixture principal is valid")
    }

    fn client_with(mock: MockCanisterTransport, canister_id: CanisterId) -> NewsAppClient {
        NewsAppClient::new(Arc::new(mock), canister_id)
    }

    fn expect_call(
        mock: &mut MockCanisterTransport,
        method: &'static str,
        mode: CallMode,
        reply: Result<Vec<u8>, TransportError>,
    ) {
        mock.expect_invoke()
            .withf(move |request| request.method == method && request.mode == mode)
            .times(1)
            .return_once(move |_| reply);
    }

    fn empty_reply() -> Vec<u8> {
        candid::encode_args(()).expect("encode empty reply")
    }

    fn journalist_record(id: &str) -> JournalistRecord {
        JournalistRecord {
            id: id.to_owned(),
            name: "Ida Tarbell".to_owned(),
            email: "ida@example.com".to_owned(),
            articles: vec![ArticleRecord {
                id: "a-1".to_owned(),
                title: "Standard Oil".to_owned(),
                content: "History of the company.".to_owned(),
                topic: "business".to_owned(),
                journalist_id: id.to_owned(),
            }],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn get_user_reports_absence_as_none(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one(None::<UserRecord>).expect("encode none");
        expect_call(&mut mock, "getUser", CallMode::Query, Ok(reply));

        let user = client_with(mock, canister_id)
            .get_user()
            .await
            .expect("absence is not an error");
        assert!(user.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn get_all_users_decodes_records(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one(vec![UserRecord {
            id: "u-1".to_owned(),
            name: "Nellie Bly".to_owned(),
            email: "nellie@example.com".to_owned(),
            requested_topics: vec!["travel".to_owned()],
        }])
        .expect("encode users");
        expect_call(&mut mock, "getAllUsers", CallMode::Query, Ok(reply));

        let users = client_with(mock, canister_id)
            .get_all_users()
            .await
            .expect("users decode");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name(), "Nellie Bly");
        assert!(users[0].has_requested("travel"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_calls_forward_arguments_in_declared_order(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        mock.expect_invoke()
            .withf(move |request| {
                let decoded = candid::decode_args::<(String, String, String, String)>(&request.arg);
                request.method == "uploadArticle"
                    && request.mode == CallMode::Update
                    && request.canister_id == canister_id
                    && decoded.is_ok_and(|args| {
                        args == (
                            "j-9".to_owned(),
                            "Title".to_owned(),
                            "Body".to_owned(),
                            "science".to_owned(),
                        )
                    })
            })
            .times(1)
            .return_once(|_| Ok(empty_reply()));

        client_with(mock, canister_id)
            .upload_article(&JournalistId::from("j-9"), "Title", "Body", "science")
            .await
            .expect("upload succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn request_topic_forwards_repeated_topics_verbatim(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        mock.expect_invoke()
            .withf(|request| {
                request.method == "requestTopic"
                    && candid::decode_args::<(String, String)>(&request.arg)
                        .is_ok_and(|args| args == ("u-1".to_owned(), "sport".to_owned()))
            })
            .times(2)
            .returning(|_| Ok(empty_reply()));

        let client = client_with(mock, canister_id);
        let user_id = UserId::from("u-1");
        client.request_topic(&user_id, "sport").await.expect("first request");
        client.request_topic(&user_id, "sport").await.expect("second request");
    }

    #[rstest]
    #[tokio::test]
    async fn get_journalist_by_id_maps_nested_articles(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one(Some(journalist_record("j-1"))).expect("encode journalist");
        expect_call(&mut mock, "getJournalistById", CallMode::Query, Ok(reply));

        let journalist = client_with(mock, canister_id)
            .get_journalist_by_id(&JournalistId::from("j-1"))
            .await
            .expect("lookup succeeds")
            .expect("journalist present");
        assert_eq!(journalist.articles().len(), 1);
        assert_eq!(journalist.articles()[0].journalist_id().as_str(), "j-1");
    }

    #[rstest]
    #[case::transport(TransportError::transport("connection reset"))]
    #[case::timeout(TransportError::timeout("deadline exceeded"))]
    #[case::rejected(TransportError::rejected(5_u8, "canister trapped"))]
    #[tokio::test]
    async fn transport_failures_become_remote_invocation_errors(
        canister_id: CanisterId,
        #[case] failure: TransportError,
    ) {
        let mut mock = MockCanisterTransport::new();
        let returned = failure.clone();
        expect_call(&mut mock, "getAllJournalists", CallMode::Query, Err(returned));

        let error = client_with(mock, canister_id)
            .get_all_journalists()
            .await
            .expect_err("failure must propagate");
        assert_eq!(
            error,
            NewsClientError::remote_invocation("getAllJournalists", failure),
        );
    }

    #[rstest]
    #[tokio::test]
    async fn mismatched_reply_shape_is_a_decode_failure(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one("not a user list").expect("encode text");
        expect_call(&mut mock, "getAllUsers", CallMode::Query, Ok(reply));

        let error = client_with(mock, canister_id)
            .get_all_users()
            .await
            .expect_err("decode must fail");
        assert!(
            matches!(
                error.invocation_cause(),
                Some(InvocationFailure::Decode { .. })
            ),
            "expected decode cause, got {error:?}",
        );
    }

    #[rstest]
    #[case::text(candid::encode_one("not a user").expect("encode text"))]
    #[case::opt_text(candid::encode_one(Some("not a user")).expect("encode opt text"))]
    #[case::empty(candid::encode_args(()).expect("encode empty reply"))]
    #[tokio::test]
    async fn malformed_optional_user_reply_is_not_absence(
        canister_id: CanisterId,
        #[case] reply: Vec<u8>,
    ) {
        let mut mock = MockCanisterTransport::new();
        expect_call(&mut mock, "getUser", CallMode::Query, Ok(reply));

        let error = client_with(mock, canister_id)
            .get_user()
            .await
            .expect_err("malformed reply must not resolve to None");
        assert!(matches!(
            error,
            NewsClientError::RemoteInvocation {
                method: "getUser",
                cause: InvocationFailure::Decode { .. },
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn journalist_lookup_rejects_a_user_shaped_reply(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one(Some(UserRecord {
            id: "u-1".to_owned(),
            name: "Nellie Bly".to_owned(),
            email: "nellie@example.com".to_owned(),
            requested_topics: Vec::new(),
        }))
        .expect("encode opt user");
        expect_call(&mut mock, "getJournalistById", CallMode::Query, Ok(reply));

        let error = client_with(mock, canister_id)
            .get_journalist_by_id(&JournalistId::from("j-1"))
            .await
            .expect_err("wrong record type must not resolve to None");
        assert!(matches!(
            error,
            NewsClientError::RemoteInvocation {
                method: "getJournalistById",
                cause: InvocationFailure::Decode { .. },
            }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn get_user_decodes_a_present_record(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        let reply = candid::encode_one(Some(UserRecord {
            id: "u-2".to_owned(),
            name: "Ida Tarbell".to_owned(),
            email: "ida@example.com".to_owned(),
            requested_topics: Vec::new(),
        }))
        .expect("encode opt user");
        expect_call(&mut mock, "getUser", CallMode::Query, Ok(reply));

        let user = client_with(mock, canister_id)
            .get_user()
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(user.id().as_str(), "u-2");
        assert!(user.requested_topics().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn garbage_bytes_are_a_decode_failure(canister_id: CanisterId) {
        let mut mock = MockCanisterTransport::new();
        expect_call(
            &mut mock,
            "createJournalist",
            CallMode::Update,
            Ok(b"garbage".to_vec()),
        );

        let error = client_with(mock, canister_id)
            .create_journalist("Ida", "ida@example.com")
            .await
            .expect_err("decode must fail");
        assert!(matches!(
            error,
            NewsClientError::RemoteInvocation {
                method: "createJournalist",
                cause: InvocationFailure::Decode { .. },
            }
        ));
    }

    #[test]
    fn builder_requires_a_transport() {
        let error = NewsAppClient::builder()
            .canister_id(CANISTER)
            .build()
            .expect_err("missing transport must fail");
        assert!(matches!(error, NewsClientError::Configuration { .. }));
    }

    #[test]
    fn builder_requires_a_canister_id() {
        let error = NewsAppClient::builder()
            .transport(Arc::new(MockCanisterTransport::new()))
            .build()
            .expect_err("missing canister id must fail");
        assert!(matches!(error, NewsClientError::Configuration { .. }));
    }

    #[test]
    fn builder_rejects_malformed_addresses() {
        let error = NewsAppClient::builder()
            .transport(Arc::new(MockCanisterTransport::new()))
            .canister_id("definitely not a principal")
            .build()
            .expect_err("malformed address must fail");
        assert!(matches!(error, NewsClientError::AddressResolution { .. }));
    }

    #[rstest]
    fn builder_binds_parsed_address(canister_id: CanisterId) {
        let client = NewsAppClient::builder()
            .transport(Arc::new(MockCanisterTransport::new()))
            .canister_id(CANISTER)
            .build()
            .expect("valid parts build");
        assert_eq!(client.canister_id(), canister_id);
    }
}
