use axum::Json;
use axum::extract::{Extension, State};
use stratum_application::ResolvedSession;
use stratum_core::SessionClaims;

use crate::dto::{AccessCheckRequest, AccessCheckResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn access_check_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(payload): Json<AccessCheckRequest>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let session = ResolvedSession::new(Some(claims));
    let guard = &state.permission_guard;

    let context = match payload.resource.as_deref() {
        Some(resource) => {
            guard
                .check_action_permission(&session, &payload.module, resource, &payload.action)
                .await?
        }
        None => {
            let context = guard.resolve_context(&session).await?;
            guard
                .authorize(&context, &payload.module, &payload.action)
                .await?;
            context
        }
    };

    Ok(Json(AccessCheckResponse {
        allowed: true,
        user_id: context.user().id().to_string(),
    }))
}
