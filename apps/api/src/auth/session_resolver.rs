use async_trait::async_trait;
use stratum_application::SessionResolver;
use stratum_core::{AppError, AppResult, SessionClaims};
use tower_sessions::Session;

use super::SESSION_CLAIMS_KEY;

/// Session resolver reading claims from the request's cookie session.
pub struct TowerSessionResolver {
    session: Session,
}

impl TowerSessionResolver {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionResolver for TowerSessionResolver {
    async fn resolve_session(&self) -> AppResult<Option<SessionClaims>> {
        self.session
            .get::<SessionClaims>(SESSION_CLAIMS_KEY)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read session claims: {error}")))
    }
}
