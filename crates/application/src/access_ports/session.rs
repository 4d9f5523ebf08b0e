use async_trait::async_trait;
use stratum_core::{AppResult, SessionClaims};

/// Request-scoped port that yields the verified caller identity.
///
/// Implementations wrap whatever carries the inbound credential (cookie
/// session, bearer token) and are constructed per request. `Ok(None)` means
/// no valid credential was presented.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolves claims for the current request.
    async fn resolve_session(&self) -> AppResult<Option<SessionClaims>>;
}

/// Session resolver over claims that were already extracted at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSession(Option<SessionClaims>);

impl ResolvedSession {
    /// Wraps claims resolved elsewhere.
    #[must_use]
    pub fn new(claims: Option<SessionClaims>) -> Self {
        Self(claims)
    }

    /// Returns a resolver for a request without credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SessionResolver for ResolvedSession {
    async fn resolve_session(&self) -> AppResult<Option<SessionClaims>> {
        Ok(self.0.clone())
    }
}
