//! Domain primitives and the news canister client.
//!
//! Purpose: Define the records exchanged with the news canister, the
//! service descriptor both ends agree on, and the client that dispatches
//! typed calls through the transport port.
//!
//! Public surface:
//! - NewsAppClient — typed client bound to one canister.
//! - NewsMethod / CallMode — descriptor table for the remote methods.
//! - User, Journalist, Article — immutable record snapshots.
//! - NewsClientError — construction and invocation failures.

pub mod canister_id;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod journalist;
pub mod news_app_client;
pub mod ports;
pub mod user;

pub use self::canister_id::CanisterId;
pub use self::descriptor::{CallMode, IdlType, MethodSignature, NewsMethod, service_definition};
pub use self::error::{InvocationFailure, NewsClientError};
pub use self::ids::{ArticleId, JournalistId, UserId};
pub use self::journalist::{Article, Journalist};
pub use self::news_app_client::{NewsAppClient, NewsAppClientBuilder};
pub use self::user::User;

/// Convenient client result alias.
pub type ClientResult<T> = Result<T, NewsClientError>;
