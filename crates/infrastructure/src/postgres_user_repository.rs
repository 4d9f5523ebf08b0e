//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use stratum_application::UserRepository;
use stratum_core::{AppError, AppResult, OrgId, RoleId, UserId};
use stratum_domain::{EmailAddress, User};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    org_id: uuid::Uuid,
    role_id: uuid::Uuid,
    manager_id: Option<uuid::Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|error| {
            AppError::Internal(format!("invalid stored email for user '{}': {error}", row.id))
        })?;

        User::new(
            UserId::from_uuid(row.id),
            email,
            OrgId::from_uuid(row.org_id),
            RoleId::from_uuid(row.role_id),
            row.manager_id.map(UserId::from_uuid),
        )
        .map_err(|error| AppError::Internal(format!("invalid stored user '{}': {error}", row.id)))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, org_id, role_id, manager_id
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by id: {error}")))?;

        row.map(User::try_from).transpose()
    }
}
