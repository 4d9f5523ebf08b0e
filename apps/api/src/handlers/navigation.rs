use axum::Json;
use axum::extract::State;
use stratum_application::SessionResolver;
use tower_sessions::Session;

use crate::auth::TowerSessionResolver;
use crate::dto::NavItemResponse;
use crate::state::AppState;

/// Returns the suite menu filtered for the caller; anonymous callers get `[]`.
pub async fn navigation_handler(
    State(state): State<AppState>,
    session: Session,
) -> Json<Vec<NavItemResponse>> {
    Json(navigation_response(&state, &TowerSessionResolver::new(session)).await)
}

pub(crate) async fn navigation_response(
    state: &AppState,
    session: &dyn SessionResolver,
) -> Vec<NavItemResponse> {
    state
        .permission_guard
        .navigation_for(session, &state.navigation)
        .await
        .iter()
        .map(NavItemResponse::from)
        .collect()
}
