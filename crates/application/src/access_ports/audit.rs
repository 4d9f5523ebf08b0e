use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stratum_core::{AppResult, OrgId, UserId};
use stratum_domain::AccessOutcome;

/// Immutable audit entry emitted for every access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Organization scope for the event.
    pub org_id: OrgId,
    /// User that attempted the action.
    pub actor: UserId,
    /// Module of the attempted action.
    pub module: String,
    /// Resource inside the module, when the check was resource-scoped.
    pub resource: Option<String>,
    /// Attempted action.
    pub action: String,
    /// Identifier of the targeted record, when known.
    pub target_id: Option<String>,
    /// Decision taken by the guard.
    pub outcome: AccessOutcome,
    /// Decision timestamp.
    pub occurred_at: DateTime<Utc>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
