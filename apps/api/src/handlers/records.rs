use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use stratum_application::ResolvedSession;
use stratum_core::{OrgId, SessionClaims, UserId};

use crate::dto::{RecordVisibilityQuery, RecordVisibilityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

const RECORDS_MODULE: &str = "records";
const READ_ACTION: &str = "read";

/// Reports whether a record owned by `owner_id` in `org_id` is in the caller's team scope.
///
/// The caller needs `records:read`. A record of another organization is
/// answered as not found unless the caller holds a system role.
pub async fn record_visibility_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(owner_id): Path<String>,
    Query(query): Query<RecordVisibilityQuery>,
) -> ApiResult<Json<RecordVisibilityResponse>> {
    let owner_id = UserId::parse(&owner_id)?;
    let record_org_id = OrgId::parse(&query.org_id)?;

    let guard = &state.permission_guard;
    let context = guard
        .resolve_context(&ResolvedSession::new(Some(claims)))
        .await?;
    guard.authorize(&context, RECORDS_MODULE, READ_ACTION).await?;
    guard
        .ensure_record_access(
            &context,
            record_org_id,
            RECORDS_MODULE,
            READ_ACTION,
            &owner_id.to_string(),
        )
        .await?;

    Ok(Json(RecordVisibilityResponse {
        owner_id: owner_id.to_string(),
        visible: context.is_system() || context.can_view_owned_by(owner_id),
    }))
}
