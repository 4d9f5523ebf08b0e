use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use stratum_application::RolePermissionRepository;
use stratum_core::{AppError, AppResult, RoleId};

/// PostgreSQL-backed repository for role grant lookups.
#[derive(Clone)]
pub struct PostgresRolePermissionRepository {
    pool: PgPool,
}

impl PostgresRolePermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GrantRow {
    grant_key: String,
}

#[async_trait]
impl RolePermissionRepository for PostgresRolePermissionRepository {
    async fn list_grant_keys_for_role(&self, role_id: RoleId) -> AppResult<Vec<String>> {
        // Keys come back as authored; parsing and rejection happen in the map builder.
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT grant_key
            FROM role_grants
            WHERE role_id = $1
            ORDER BY grant_key
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load grants for role '{role_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(|row| row.grant_key).collect())
    }
}
