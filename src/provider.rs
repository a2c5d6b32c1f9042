use async_trait::async_trait;
use chrono::Duration;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::session::SessionClaims;

pub mod local;

/// An error reported by the identity/document-store provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// An account with this email address already exists.
    #[error("email already in use")]
    EmailAlreadyExists,

    /// The identity token is malformed, expired, or has a bad signature.
    #[error("invalid identity token")]
    InvalidToken,

    /// The session cookie is malformed or has a bad signature.
    #[error("invalid session cookie")]
    InvalidSession,

    /// The session cookie has expired.
    #[error("session cookie expired")]
    SessionExpired,

    /// The session was revoked after the cookie was issued.
    #[error("session revoked")]
    SessionRevoked,

    /// A document could not be converted to or from its typed form.
    #[error("document serialization failed: {0}")]
    Serialization(String),

    /// The provider backend could not be reached or failed internally.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// An account as the identity provider sees it, before any profile
/// document exists for it.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The provider-assigned unique identifier.
    pub uid: String,
    /// The email address the account was registered with.
    pub email: String,
}

/// The identity side of the provider: account lookup and the signed
/// session-cookie primitive.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks up an account by email address. `None` when no account exists.
    async fn get_user_by_email(&self, email: &str)
        -> std::result::Result<Option<AuthAccount>, ProviderError>;

    /// Exchanges a short-lived identity token for a signed session cookie
    /// valid for `expires_in`.
    async fn create_session_cookie(
        &self,
        id_token: &str,
        expires_in: Duration,
    ) -> std::result::Result<String, ProviderError>;

    /// Verifies a session cookie and returns its claims. With
    /// `check_revoked` set, a cookie issued before the account's last
    /// revocation fails even if it has not expired.
    async fn verify_session_cookie(
        &self,
        cookie: &str,
        check_revoked: bool,
    ) -> std::result::Result<SessionClaims, ProviderError>;

    /// Revokes every session cookie issued to `uid` so far.
    async fn revoke_sessions(&self, uid: &str) -> std::result::Result<(), ProviderError>;
}

/// A single document read from the store.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document's key within its collection.
    pub id: String,
    /// The document's fields.
    pub fields: Map<String, Value>,
}

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A single filter clause of a [`Query`].
#[derive(Debug, Clone)]
pub enum Filter {
    /// Field equals value. Documents missing the field do not match.
    Eq(String, Value),
    /// Field differs from value. Documents missing the field do not match.
    Ne(String, Value),
}

/// A query over one collection: filters, one optional order-by, and an
/// optional limit, composed builder-style like the provider SDK does it.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.to_string(), value.into()));
        self
    }

    pub fn where_ne(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Ne(field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// The document side of the provider: keyed reads/writes and filtered,
/// ordered, limited collection queries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches one document by key. `None` when it does not exist.
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> std::result::Result<Option<Document>, ProviderError>;

    /// Writes a document under `id`, replacing any existing fields.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> std::result::Result<(), ProviderError>;

    /// Runs a query against a collection. A backend that cannot satisfy the
    /// composite filter/order shape must reject it rather than return
    /// partial results.
    async fn query(
        &self,
        collection: &str,
        query: Query,
    ) -> std::result::Result<Vec<Document>, ProviderError>;
}
