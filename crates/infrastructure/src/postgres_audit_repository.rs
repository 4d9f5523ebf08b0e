use async_trait::async_trait;
use sqlx::PgPool;

use stratum_application::{AuditEvent, AuditRepository};
use stratum_core::{AppError, AppResult};

/// PostgreSQL-backed append-only access audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_audit_entries (
                org_id,
                actor_id,
                module,
                resource,
                action,
                target_id,
                outcome,
                occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.org_id.as_uuid())
        .bind(event.actor.as_uuid())
        .bind(event.module)
        .bind(event.resource)
        .bind(event.action)
        .bind(event.target_id)
        .bind(event.outcome.as_str())
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
