use std::sync::Arc;

use chrono::Utc;
use stratum_core::{AppError, AppResult, OrgId, SessionClaims, UserId};
use stratum_domain::{AccessOutcome, NavItem};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    AuditEvent, AuditRepository, ResolvedSession, SessionResolver, UserContext,
    UserContextBuilder, filter_navigation,
};


/// Structured denial returned by every guard entry point.
///
/// Denials never carry record identifiers, so a caller cannot learn which
/// records exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenial {
    /// No valid credential was presented.
    #[error("authentication required")]
    NoSession,

    /// A credential was presented but no user context could be built for it.
    #[error("no user context is available for this session")]
    NoUserContext,

    /// The caller lacks the requested grant.
    #[error("missing permission '{module}:{action}'")]
    PermissionDenied {
        /// Module of the refused action.
        module: String,
        /// Refused action.
        action: String,
    },

    /// The target record belongs to another organization.
    #[error("record is outside the caller's organization")]
    TenantMismatch,
}

impl AccessDenial {
    /// Returns the audit outcome recorded for this denial.
    #[must_use]
    pub fn outcome(&self) -> AccessOutcome {
        match self {
            Self::NoSession | Self::PermissionDenied { .. } => AccessOutcome::Denied,
            Self::NoUserContext => AccessOutcome::NoUserContext,
            Self::TenantMismatch => AccessOutcome::TenantMismatch,
        }
    }
}

impl From<AccessDenial> for AppError {
    fn from(value: AccessDenial) -> Self {
        match value {
            AccessDenial::NoSession => Self::Unauthorized(value.to_string()),
            AccessDenial::NoUserContext | AccessDenial::PermissionDenied { .. } => {
                Self::Forbidden(value.to_string())
            }
            AccessDenial::TenantMismatch => Self::NotFound("record not found".to_owned()),
        }
    }
}

/// Entry point deciding allow or deny for every server-side operation.
///
/// Administrators hold no special branch here: an administrator's grants
/// resolve to an all-allowed permission map, so the same lookup answers.
#[derive(Clone)]
pub struct PermissionGuard {
    context_builder: UserContextBuilder,
    audit_repository: Arc<dyn AuditRepository>,
}

impl PermissionGuard {
    /// Creates a guard from a context builder and an audit sink.
    #[must_use]
    pub fn new(
        context_builder: UserContextBuilder,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            context_builder,
            audit_repository,
        }
    }

    /// Resolves the caller's context for the current request.
    ///
    /// Session verification runs under the same lookup timeout as the
    /// context lookups; a stalled or failing resolver counts as no session.
    pub async fn resolve_context(
        &self,
        session: &dyn SessionResolver,
    ) -> Result<UserContext, AccessDenial> {
        let timeout = self.context_builder.lookup_timeout();
        let claims = match tokio::time::timeout(timeout, session.resolve_session()).await {
            Ok(Ok(Some(claims))) => claims,
            Ok(Ok(None)) => return Err(AccessDenial::NoSession),
            Ok(Err(error)) => {
                warn!(%error, "session resolution failed");
                return Err(AccessDenial::NoSession);
            }
            Err(_) => {
                warn!(
                    timeout_ms = timeout.as_millis(),
                    "session resolution timed out"
                );
                return Err(AccessDenial::NoSession);
            }
        };

        self.context_for_claims(&claims).await
    }

    /// Decides whether the context may perform `action` module-wide on `module`.
    pub async fn authorize(
        &self,
        context: &UserContext,
        module: &str,
        action: &str,
    ) -> Result<(), AccessDenial> {
        let allowed = context.permissions().is_allowed(module, action);
        self.decide(context, module, None, action, allowed).await
    }

    /// Decides whether the context may perform `action` on `resource` inside `module`.
    pub async fn authorize_on(
        &self,
        context: &UserContext,
        module: &str,
        resource: &str,
        action: &str,
    ) -> Result<(), AccessDenial> {
        let allowed = context.permissions().is_allowed_on(module, resource, action);
        self.decide(context, module, Some(resource), action, allowed)
            .await
    }

    /// Resolves the session, builds the context and checks one action.
    ///
    /// This is the guard data operations call first; on success the
    /// returned context carries the user and the tenant/team scope to apply.
    pub async fn check_action_permission(
        &self,
        session: &dyn SessionResolver,
        module: &str,
        resource: &str,
        action: &str,
    ) -> Result<UserContext, AccessDenial> {
        let context = self.resolve_context(session).await?;
        self.authorize_on(&context, module, resource, action).await?;
        Ok(context)
    }

    /// Page-boundary variant that fails with an [`AppError`] on denial.
    ///
    /// Missing claims map to `Unauthorized` (redirect to login); every other
    /// denial maps to `Forbidden`.
    pub async fn assert_permission(
        &self,
        claims: Option<&SessionClaims>,
        module: &str,
        action: &str,
    ) -> AppResult<UserContext> {
        let session = ResolvedSession::new(claims.cloned());
        let context = self.resolve_context(&session).await?;
        self.authorize(&context, module, action).await?;
        Ok(context)
    }

    /// Ensures a record in `record_org_id` may be touched by the context.
    ///
    /// Only designated system roles cross organizations; a tenant-level
    /// wildcard grant does not.
    pub async fn ensure_record_access(
        &self,
        context: &UserContext,
        record_org_id: OrgId,
        module: &str,
        action: &str,
        target_id: &str,
    ) -> Result<(), AccessDenial> {
        if record_org_id == context.org_id() || context.is_system() {
            return Ok(());
        }

        info!(
            actor = %context.user().id(),
            org_id = %context.org_id(),
            module,
            action,
            "cross-tenant record access refused"
        );
        self.record(AuditEvent {
            org_id: context.org_id(),
            actor: context.user().id(),
            module: module.to_owned(),
            resource: None,
            action: action.to_owned(),
            target_id: Some(target_id.to_owned()),
            outcome: AccessDenial::TenantMismatch.outcome(),
            occurred_at: Utc::now(),
        })
        .await;

        Err(AccessDenial::TenantMismatch)
    }

    /// Filters a menu tree for the current request.
    ///
    /// Callers without a session or context receive an empty menu.
    pub async fn navigation_for(
        &self,
        session: &dyn SessionResolver,
        items: &[NavItem],
    ) -> Vec<NavItem> {
        match self.resolve_context(session).await {
            Ok(context) => filter_navigation(items, Some(context.permissions())),
            Err(_) => filter_navigation(items, None),
        }
    }

    async fn context_for_claims(
        &self,
        claims: &SessionClaims,
    ) -> Result<UserContext, AccessDenial> {
        match self.context_builder.build(claims.user_id()).await {
            Ok(Some(context)) => {
                if context.org_id() != claims.org_id() {
                    warn!(
                        user_id = %claims.user_id(),
                        claimed_org_id = %claims.org_id(),
                        org_id = %context.org_id(),
                        "session claims name a different organization than the user record"
                    );
                }
                Ok(context)
            }
            Ok(None) => {
                self.record_missing_context(claims.user_id(), claims.org_id())
                    .await;
                Err(AccessDenial::NoUserContext)
            }
            Err(error) => {
                warn!(user_id = %claims.user_id(), %error, "failed to build user context");
                self.record_missing_context(claims.user_id(), claims.org_id())
                    .await;
                Err(AccessDenial::NoUserContext)
            }
        }
    }

    async fn decide(
        &self,
        context: &UserContext,
        module: &str,
        resource: Option<&str>,
        action: &str,
        allowed: bool,
    ) -> Result<(), AccessDenial> {
        let decision = if allowed {
            Ok(())
        } else {
            Err(AccessDenial::PermissionDenied {
                module: module.to_owned(),
                action: action.to_owned(),
            })
        };
        let outcome = match &decision {
            Ok(()) => AccessOutcome::Allowed,
            Err(denial) => denial.outcome(),
        };

        self.record(AuditEvent {
            org_id: context.org_id(),
            actor: context.user().id(),
            module: module.to_owned(),
            resource: resource.map(ToOwned::to_owned),
            action: action.to_owned(),
            target_id: None,
            outcome,
            occurred_at: Utc::now(),
        })
        .await;

        if decision.is_err() {
            info!(
                actor = %context.user().id(),
                org_id = %context.org_id(),
                module,
                action,
                "permission denied"
            );
        }

        decision
    }

    async fn record_missing_context(&self, user_id: UserId, claimed_org_id: OrgId) {
        self.record(AuditEvent {
            org_id: claimed_org_id,
            actor: user_id,
            module: "session".to_owned(),
            resource: None,
            action: "resolve".to_owned(),
            target_id: None,
            outcome: AccessDenial::NoUserContext.outcome(),
            occurred_at: Utc::now(),
        })
        .await;
    }

    async fn record(&self, event: AuditEvent) {
        let outcome = event.outcome;
        if let Err(error) = self.audit_repository.append_event(event).await {
            error!(%error, outcome = outcome.as_str(), "failed to persist access audit event");
        }
    }
}
