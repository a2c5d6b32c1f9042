//! In-process provider backend used in development and tests.
//!
//! Session cookies are HS256 JWTs signed with the configured key; documents
//! live in an in-memory collection map. The query evaluator handles the
//! composite filter/order/limit shapes the query layer issues, so no
//! separate index provisioning is needed here.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::session::SessionClaims;
use crate::provider::{
    AuthAccount, Direction, Document, DocumentStore, Filter, IdentityProvider, ProviderError,
    Query,
};

/// How long an identity token stays valid.
const ID_TOKEN_TTL_SECS: i64 = 3600;

const TOKEN_KIND_ID: &str = "id";
const TOKEN_KIND_SESSION: &str = "session";

/// The claims carried by both identity tokens and session cookies.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// The account uid.
    sub: String,
    /// The account email.
    email: String,
    /// Issued-at, unix seconds.
    iat: i64,
    /// Expiration, unix seconds.
    exp: i64,
    /// Token id.
    jti: String,
    /// Distinguishes identity tokens from session cookies so one cannot
    /// stand in for the other.
    kind: String,
}

/// The local identity/document-store backend.
pub struct LocalProvider {
    signing_key: Vec<u8>,
    /// Registered accounts, keyed by uid.
    accounts: RwLock<HashMap<String, AuthAccount>>,
    /// Per-uid revocation watermark: cookies issued at or before this
    /// instant fail verification with `check_revoked`.
    revoked_at: RwLock<HashMap<String, i64>>,
    /// Collections of documents, keyed by collection name then document id.
    collections: RwLock<HashMap<String, BTreeMap<String, Map<String, Value>>>>,
}

impl LocalProvider {
    /// Creates an empty provider signing tokens with `signing_key`.
    pub fn new(signing_key: Vec<u8>) -> Self {
        Self {
            signing_key,
            accounts: RwLock::new(HashMap::new()),
            revoked_at: RwLock::new(HashMap::new()),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an identity account, the step the client SDK performs
    /// before the backend ever sees the uid.
    pub fn register_account(&self, uid: &str, email: &str) -> Result<(), ProviderError> {
        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        if accounts.values().any(|account| account.email == email) {
            return Err(ProviderError::EmailAlreadyExists);
        }
        accounts.insert(
            uid.to_string(),
            AuthAccount {
                uid: uid.to_string(),
                email: email.to_string(),
            },
        );
        Ok(())
    }

    /// Issues a short-lived identity token for a registered account, the
    /// credential the client normally obtains by signing in.
    pub fn issue_id_token(&self, uid: &str) -> Result<String, ProviderError> {
        let accounts = self.accounts.read().expect("accounts lock poisoned");
        let account = accounts
            .get(uid)
            .ok_or_else(|| ProviderError::Unavailable(format!("unknown uid: {uid}")))?;

        let now = Utc::now().timestamp();
        self.sign(&TokenClaims {
            sub: account.uid.clone(),
            email: account.email.clone(),
            iat: now,
            exp: now + ID_TOKEN_TTL_SECS,
            jti: Uuid::new_v4().to_string(),
            kind: TOKEN_KIND_ID.to_string(),
        })
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, ProviderError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| ProviderError::Unavailable(format!("token signing failed: {e}")))
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.signing_key),
            &validation,
        )
        .map(|data| data.claims)
    }
}

fn filter_matches(fields: &Map<String, Value>, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, value) => fields.get(field) == Some(value),
        Filter::Ne(field, value) => fields
            .get(field)
            .map(|actual| actual != value)
            .unwrap_or(false),
    }
}

/// Orders two field values. Cross-type comparisons do not occur in
/// practice (a field holds one type per collection) and compare equal.
fn cmp_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(f64::NAN)
            .total_cmp(&y.as_f64().unwrap_or(f64::NAN)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => std::cmp::Ordering::Equal,
    }
}

#[async_trait]
impl IdentityProvider for LocalProvider {
    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthAccount>, ProviderError> {
        let accounts = self.accounts.read().expect("accounts lock poisoned");
        Ok(accounts
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn create_session_cookie(
        &self,
        id_token: &str,
        expires_in: Duration,
    ) -> Result<String, ProviderError> {
        let claims = self
            .decode_claims(id_token)
            .map_err(|_| ProviderError::InvalidToken)?;
        if claims.kind != TOKEN_KIND_ID {
            return Err(ProviderError::InvalidToken);
        }

        let now = Utc::now().timestamp();
        self.sign(&TokenClaims {
            sub: claims.sub,
            email: claims.email,
            iat: now,
            exp: now + expires_in.num_seconds(),
            jti: Uuid::new_v4().to_string(),
            kind: TOKEN_KIND_SESSION.to_string(),
        })
    }

    async fn verify_session_cookie(
        &self,
        cookie: &str,
        check_revoked: bool,
    ) -> Result<SessionClaims, ProviderError> {
        let claims = self.decode_claims(cookie).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ProviderError::SessionExpired,
            _ => ProviderError::InvalidSession,
        })?;
        if claims.kind != TOKEN_KIND_SESSION {
            return Err(ProviderError::InvalidSession);
        }

        if check_revoked {
            let revoked_at = self.revoked_at.read().expect("revocation lock poisoned");
            if revoked_at
                .get(&claims.sub)
                .is_some_and(|instant| claims.iat <= *instant)
            {
                return Err(ProviderError::SessionRevoked);
            }
        }

        Ok(SessionClaims {
            uid: claims.sub,
            email: claims.email,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    async fn revoke_sessions(&self, uid: &str) -> Result<(), ProviderError> {
        self.revoked_at
            .write()
            .expect("revocation lock poisoned")
            .insert(uid.to_string(), Utc::now().timestamp());
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalProvider {
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, ProviderError> {
        let collections = self.collections.read().expect("collections lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), ProviderError> {
        let mut collections = self.collections.write().expect("collections lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: Query,
    ) -> Result<Vec<Document>, ProviderError> {
        let collections = self.collections.read().expect("collections lock poisoned");
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|(_, fields)| {
                        query
                            .filters
                            .iter()
                            .all(|filter| filter_matches(fields, filter))
                    })
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            // Documents without the ordering field drop out of the result,
            // matching the provider SDK's orderBy semantics.
            documents.retain(|document| document.fields.contains_key(field));
            documents.sort_by(|a, b| cmp_values(&a.fields[field], &b.fields[field]));
            if *direction == Direction::Descending {
                documents.reverse();
            }
        }

        if let Some(n) = query.limit {
            documents.truncate(n);
        }

        Ok(documents)
    }
}
