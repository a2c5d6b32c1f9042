use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::{
    error::Result,
    models::user::User,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
};

/// The request payload for account creation.
#[derive(Deserialize, Debug)]
pub struct SignUpRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
}

/// The request payload for signing in.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub id_token: String,
}

/// The response payload for the current-user probe.
#[derive(Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// Handles account creation for a uid the identity provider already issued.
#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Response> {
    tracing::info!("📝 Sign-up attempt for uid: {}", payload.uid);
    validate_uid(&payload.uid)?;
    validate_name(&payload.name)?;
    validate_email(&payload.email)?;

    let outcome =
        auth_service::sign_up(&state, &payload.uid, &payload.name, &payload.email).await;

    // Provider-side failures still answer 200: the outcome body is the
    // contract, the frontend displays its message either way.
    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)).into_response())
}

/// Handles sign-in: exchanges the identity token for the session cookie.
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<SignInRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Sign-in attempt for: {}", payload.email);
    validate_email(&payload.email)?;
    validate_id_token(&payload.id_token)?;

    let outcome = auth_service::sign_in(&state, &cookies, &payload.email, &payload.id_token).await;

    Ok((StatusCode::OK, Json(outcome)).into_response())
}

/// Handles sign-out by clearing the session cookie.
#[axum::debug_handler]
pub async fn sign_out(cookies: Cookies) -> Response {
    auth_service::sign_out(&cookies);
    tracing::info!("👋 Session cookie cleared");

    let outcome = auth_service::AuthOutcome {
        success: true,
        message: "Signed out successfully.".to_string(),
    };

    (StatusCode::OK, Json(outcome)).into_response()
}

/// Reports whether the request resolves to a signed-in user.
///
/// Always answers 200; an absent or rejected session is not an error here.
#[axum::debug_handler]
pub async fn me(State(state): State<AppState>, cookies: Cookies) -> Json<MeResponse> {
    let user = auth_service::current_user(&state, &cookies).await;

    Json(MeResponse {
        authenticated: user.is_some(),
        user,
    })
}
