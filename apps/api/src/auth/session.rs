use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use stratum_application::ResolvedSession;
use stratum_core::{AppError, SessionClaims, UserId};
use tower_sessions::Session;
use tracing::info;

use crate::dto::{EstablishSessionRequest, UserContextResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_CLAIMS_KEY;

/// Establishes a cookie session for a provisioned user.
///
/// Stands in for the external identity provider: the caller proves
/// possession of the bootstrap token and names the user. Claims are built
/// from the stored user record, not from the request.
pub async fn establish_session_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<EstablishSessionRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let claims = claims_for_user(&state, &payload.user_id).await?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_CLAIMS_KEY, &claims)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session claims: {error}")))?;

    info!(user_id = %claims.user_id(), org_id = %claims.org_id(), "session established");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> ApiResult<Json<UserContextResponse>> {
    let context = state
        .permission_guard
        .resolve_context(&ResolvedSession::new(Some(claims)))
        .await?;

    Ok(Json(UserContextResponse::from(&context)))
}

async fn claims_for_user(state: &AppState, user_id: &str) -> ApiResult<SessionClaims> {
    let user_id = UserId::parse(user_id)?;
    let user = state
        .user_repository
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown user".to_owned()))?;

    Ok(SessionClaims::new(
        user.id(),
        user.email().as_str(),
        user.org_id(),
        user.role_id(),
    ))
}
