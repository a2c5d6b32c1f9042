use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    error::Result,
    models::{interview::Interview, user::User},
    services::interviews as interview_service,
    state::AppState,
};

/// The response payload for the dashboard: the caller's own interviews and
/// the finalized interviews of other users.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_interviews: Vec<Interview>,
    pub latest_interviews: Vec<Interview>,
}

/// Fetches both dashboard interview lists concurrently.
///
/// Join semantics: both queries must succeed; either failure fails the
/// whole render, no partial results.
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<DashboardResponse>> {
    tracing::debug!("📋 Fetching dashboard interviews for: {}", user.id);

    let (user_interviews, latest_interviews) = tokio::try_join!(
        interview_service::list_owned(state.store.as_ref(), &user.id),
        interview_service::list_available(state.store.as_ref(), &user.id, None),
    )?;

    Ok(Json(DashboardResponse {
        user_interviews,
        latest_interviews,
    }))
}
