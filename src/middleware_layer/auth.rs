use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{services::auth as auth_service, state::AppState};

/// A middleware that requires a valid session to be present.
///
/// On success the resolved user is attached to the request as an extension;
/// otherwise the request is rejected without ever surfacing why the session
/// was not accepted.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    tracing::debug!("🔐 Checking authentication...");

    let user = auth_service::current_user(&state, &cookies)
        .await
        .ok_or_else(|| {
            tracing::warn!("❌ Unauthenticated request to protected route");
            StatusCode::FORBIDDEN
        })?;

    tracing::debug!("✅ User authenticated: {}", user.id);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
