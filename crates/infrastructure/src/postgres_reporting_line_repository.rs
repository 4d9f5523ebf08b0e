use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use stratum_application::ReportingLineRepository;
use stratum_core::{AppError, AppResult, OrgId, UserId};
use stratum_domain::ReportingLine;

/// PostgreSQL-backed repository exposing the `manager_id` edges of an organization.
#[derive(Clone)]
pub struct PostgresReportingLineRepository {
    pool: PgPool,
}

impl PostgresReportingLineRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportingLineRow {
    id: uuid::Uuid,
    manager_id: Option<uuid::Uuid>,
}

#[async_trait]
impl ReportingLineRepository for PostgresReportingLineRepository {
    async fn list_reporting_lines(&self, org_id: OrgId) -> AppResult<Vec<ReportingLine>> {
        let rows = sqlx::query_as::<_, ReportingLineRow>(
            r#"
            SELECT id, manager_id
            FROM users
            WHERE org_id = $1
            "#,
        )
        .bind(org_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load reporting lines for organization '{org_id}': {error}"
            ))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| ReportingLine {
                user_id: UserId::from_uuid(row.id),
                manager_id: row.manager_id.map(UserId::from_uuid),
            })
            .collect())
    }
}
