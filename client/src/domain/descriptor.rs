//! Service descriptor for the news canister.
//!
//! The descriptor is the schema both ends agree on: method names, Candid
//! argument and result types, and whether each method is a query. The
//! client dispatches through [`NewsMethod`] so a name or mode can only come
//! from this table.

use std::fmt;

/// How the replica processes a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallMode {
    /// Read-only call that may be answered by a single replica.
    Query,
    /// State-changing call that goes through consensus.
    Update,
}

impl CallMode {
    /// Return whether calls in this mode leave remote state untouched.
    pub fn is_query(self) -> bool {
        matches!(self, Self::Query)
    }
}

/// Candid type reference used in method signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdlType {
    /// Candid `text`.
    Text,
    /// Candid `opt T`.
    Opt(Box<IdlType>),
    /// Candid `vec T`.
    Vec(Box<IdlType>),
    /// Reference to a record declared in the service definition.
    Named(&'static str),
}

impl IdlType {
    fn opt(inner: Self) -> Self {
        Self::Opt(Box::new(inner))
    }

    fn vec(inner: Self) -> Self {
        Self::Vec(Box::new(inner))
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Opt(inner) => write!(f, "opt {inner}"),
            Self::Vec(inner) => write!(f, "vec {inner}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Argument and result shape of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Argument types in call order.
    pub args: Vec<IdlType>,
    /// Result types in reply order.
    pub results: Vec<IdlType>,
    /// Query or update processing.
    pub mode: CallMode,
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) -> ({})",
            join_types(&self.args),
            join_types(&self.results)
        )?;
        if self.mode.is_query() {
            f.write_str(" query")?;
        }
        Ok(())
    }
}

fn join_types(types: &[IdlType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Methods exposed by the news canister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsMethod {
    /// `getUser : () -> (opt User) query`
    GetUser,
    /// `getAllUsers : () -> (vec User) query`
    GetAllUsers,
    /// `createUser : (text, text) -> ()`
    CreateUser,
    /// `requestTopic : (text, text) -> ()`
    RequestTopic,
    /// `getAllJournalists : () -> (vec Journalist) query`
    GetAllJournalists,
    /// `getJournalistById : (text) -> (opt Journalist) query`
    GetJournalistById,
    /// `createJournalist : (text, text) -> ()`
    CreateJournalist,
    /// `uploadArticle : (text, text, text, text) -> ()`
    UploadArticle,
}

impl NewsMethod {
    /// Every method in declaration order.
    pub const ALL: [Self; 8] = [
        Self::GetUser,
        Self::GetAllUsers,
        Self::CreateUser,
        Self::RequestTopic,
        Self::GetAllJournalists,
        Self::GetJournalistById,
        Self::CreateJournalist,
        Self::UploadArticle,
    ];

    /// Remote method name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetUser => "getUser",
            Self::GetAllUsers => "getAllUsers",
            Self::CreateUser => "createUser",
            Self::RequestTopic => "requestTopic",
            Self::GetAllJournalists => "getAllJournalists",
            Self::GetJournalistById => "getJournalistById",
            Self::CreateJournalist => "createJournalist",
            Self::UploadArticle => "uploadArticle",
        }
    }

    /// Resolve a remote method name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }

    /// Processing mode declared for the method.
    pub const fn mode(self) -> CallMode {
        match self {
            Self::GetUser | Self::GetAllUsers | Self::GetAllJournalists | Self::GetJournalistById => {
                CallMode::Query
            }
            Self::CreateUser
            | Self::RequestTopic
            | Self::CreateJournalist
            | Self::UploadArticle => CallMode::Update,
        }
    }

    /// Full argument and result shape.
    pub fn signature(self) -> MethodSignature {
        let (args, results) = match self {
            Self::GetUser => (vec![], vec![IdlType::opt(IdlType::Named("User"))]),
            Self::GetAllUsers => (vec![], vec![IdlType::vec(IdlType::Named("User"))]),
            Self::CreateUser | Self::RequestTopic | Self::CreateJournalist => {
                (vec![IdlType::Text, IdlType::Text], vec![])
            }
            Self::GetAllJournalists => (vec![], vec![IdlType::vec(IdlType::Named("Journalist"))]),
            Self::GetJournalistById => (
                vec![IdlType::Text],
                vec![IdlType::opt(IdlType::Named("Journalist"))],
            ),
            Self::UploadArticle => (vec![IdlType::Text; 4], vec![]),
        };
        MethodSignature {
            args,
            results,
            mode: self.mode(),
        }
    }
}

impl fmt::Display for NewsMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const RECORD_DEFINITIONS: &str = "\
type Article = record {
  id : text;
  title : text;
  content : text;
  topic : text;
  journalistId : text;
};
type User = record {
  id : text;
  name : text;
  email : text;
  requestedTopics : vec text;
};
type Journalist = record {
  id : text;
  name : text;
  email : text;
  articles : vec Article;
};
";

/// Render the Candid service definition shared with the canister.
///
/// # Examples
/// ```
/// use newshub_client::domain::service_definition;
///
/// let did = service_definition();
/// assert!(did.contains("  getUser : () -> (opt User) query;"));
/// assert!(did.contains("  uploadArticle : (text, text, text, text) -> ();"));
/// ```
pub fn service_definition() -> String {
    let methods = NewsMethod::ALL
        .into_iter()
        .map(|method| format!("  {} : {};", method.name(), method.signature()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{RECORD_DEFINITIONS}service : {{\n{methods}\n}}\n")
}
