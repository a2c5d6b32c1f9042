use serde::Serialize;
use serde_json::{Map, Value};
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::models::user::User;
use crate::provider::ProviderError;
use crate::state::AppState;

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

const USERS_COLLECTION: &str = "users";

/// The outcome of a sign-up or sign-in attempt, shaped for the frontend to
/// display as-is.
#[derive(Debug, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    fn ok(message: &str) -> Self {
        AuthOutcome {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(message: &str) -> Self {
        AuthOutcome {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Creates the profile document for an account the identity provider has
/// already issued a uid for.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `uid` - The provider-assigned uid.
/// * `name` - The user's full name.
/// * `email` - The user's email address.
///
/// # Returns
///
/// An `AuthOutcome`; provider failures are logged here and never propagate.
pub async fn sign_up(state: &AppState, uid: &str, name: &str, email: &str) -> AuthOutcome {
    let existing = match state.store.get(USERS_COLLECTION, uid).await {
        Ok(existing) => existing,
        Err(e) => return creation_failure(e),
    };

    if existing.is_some() {
        return AuthOutcome::failed("User already exists. Please sign in instead.");
    }

    let mut fields = Map::new();
    fields.insert("name".to_string(), Value::String(name.to_string()));
    fields.insert("email".to_string(), Value::String(email.to_string()));

    match state.store.set(USERS_COLLECTION, uid, fields).await {
        Ok(()) => {
            tracing::info!("✅ User registered: {}", uid);
            AuthOutcome::ok("Account created successfully, please sign in.")
        }
        Err(e) => creation_failure(e),
    }
}

fn creation_failure(e: ProviderError) -> AuthOutcome {
    tracing::error!("❌ Error creating a user: {}", e);
    match e {
        ProviderError::EmailAlreadyExists => AuthOutcome::failed("This email is already in use"),
        _ => AuthOutcome::failed("Failed to create an account"),
    }
}

/// Authenticates a user by email and identity token, setting the session
/// cookie on success.
pub async fn sign_in(
    state: &AppState,
    cookies: &Cookies,
    email: &str,
    id_token: &str,
) -> AuthOutcome {
    let account = match state.auth.get_user_by_email(email).await {
        Ok(account) => account,
        Err(e) => {
            tracing::error!("❌ Error signing in: {}", e);
            return AuthOutcome::failed("Failed to sign in");
        }
    };

    if account.is_none() {
        return AuthOutcome::failed("User not found. Please sign up first.");
    }

    match set_session_cookie(state, cookies, id_token).await {
        Ok(()) => {
            tracing::info!("✅ Session cookie issued for: {}", email);
            AuthOutcome::ok("Signed in successfully.")
        }
        Err(e) => {
            tracing::error!("❌ Error signing in: {}", e);
            AuthOutcome::failed("Failed to sign in")
        }
    }
}

/// Exchanges an identity token for a session cookie and adds it to the
/// response. If the exchange fails no cookie is set and the error
/// propagates to the caller.
pub async fn set_session_cookie(
    state: &AppState,
    cookies: &Cookies,
    id_token: &str,
) -> Result<(), ProviderError> {
    let expires_in = chrono::Duration::days(state.config.session_duration_days);
    let value = state.auth.create_session_cookie(id_token, expires_in).await?;

    cookies.add(session_cookie(
        value,
        expires_in.num_seconds(),
        state.config.is_production(),
    ));
    Ok(())
}

/// Builds the session cookie with its required attributes.
fn session_cookie(value: String, max_age_secs: i64, is_production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);

    cookie.set_http_only(true);

    if is_production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie.set_path("/");

    cookie
}

/// Resolves the current user from the session cookie.
///
/// Total by design: an absent, expired, tampered, or revoked cookie all
/// read as "logged out" rather than an error. The log lines below are the
/// only place the cases stay distinguishable for operators.
pub async fn current_user(state: &AppState, cookies: &Cookies) -> Option<User> {
    let cookie = match cookies.get(SESSION_COOKIE) {
        Some(cookie) => cookie,
        None => {
            tracing::debug!("No session cookie on request");
            return None;
        }
    };

    let claims = match state.auth.verify_session_cookie(cookie.value(), true).await {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Session cookie rejected: {}", e);
            return None;
        }
    };

    match state.store.get(USERS_COLLECTION, &claims.uid).await {
        Ok(Some(document)) => match User::from_document(document) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!("❌ Malformed user document for {}: {}", claims.uid, e);
                None
            }
        },
        Ok(None) => {
            tracing::warn!("Valid session for deleted user: {}", claims.uid);
            None
        }
        Err(e) => {
            tracing::error!("❌ Error fetching user {}: {}", claims.uid, e);
            None
        }
    }
}

/// Whether the request carries a session that resolves to a user.
pub async fn is_authenticated(state: &AppState, cookies: &Cookies) -> bool {
    current_user(state, cookies).await.is_some()
}

/// Clears the session cookie.
pub fn sign_out(cookies: &Cookies) {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_max_age(Duration::seconds(0));
    cookie.set_path("/");
    cookies.remove(cookie);
}
