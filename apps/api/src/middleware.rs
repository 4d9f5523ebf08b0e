use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use stratum_application::{AccessDenial, SessionResolver};
use stratum_core::AppError;
use tower_sessions::Session;

use crate::auth::TowerSessionResolver;
use crate::error::ApiResult;
use crate::state::AppState;

/// Rejects requests without session claims and exposes the claims as an extension.
pub async fn require_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let claims = TowerSessionResolver::new(session)
        .resolve_session()
        .await?
        .ok_or(AccessDenial::NoSession)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if headers
            .get("sec-fetch-site")
            .is_some_and(|fetch_site| fetch_site == HeaderValue::from_static("cross-site"))
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !is_allowed_origin(&state.frontend_url, origin, referer) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

/// The referer must be the frontend origin itself or a path below it, so a
/// host that merely starts with the same characters is refused.
fn is_allowed_origin(allowed_origin: &str, origin: &str, referer: &str) -> bool {
    let allowed_origin = allowed_origin.trim_end_matches('/');
    if allowed_origin.is_empty() {
        return false;
    }

    origin == allowed_origin
        || referer
            .strip_prefix(allowed_origin)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
