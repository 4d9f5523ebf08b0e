use std::collections::HashMap;

use async_trait::async_trait;
use stratum_application::{
    AuditEvent, AuditRepository, ReportingLineRepository, RolePermissionRepository,
    UserRepository,
};
use stratum_core::{AppResult, OrgId, RoleId, UserId};
use stratum_domain::{ReportingLine, Role, User};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory user, role and hierarchy directory.
///
/// Reporting lines are derived from the stored users, so the directory can
/// never disagree with itself about who reports to whom.
#[derive(Debug, Default)]
pub struct InMemoryAccessDirectory {
    users: RwLock<HashMap<UserId, User>>,
    role_grants: RwLock<HashMap<RoleId, Vec<String>>>,
}

impl InMemoryAccessDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    pub async fn upsert_user(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }

    /// Removes a user record, returning whether it existed.
    pub async fn remove_user(&self, user_id: UserId) -> bool {
        self.users.write().await.remove(&user_id).is_some()
    }

    /// Stores a validated role's grant keys.
    pub async fn upsert_role(&self, role: &Role) {
        self.set_role_grant_keys(role.id(), role.grant_keys()).await;
    }

    /// Stores raw grant keys for a role, as an external editor would author them.
    pub async fn set_role_grant_keys(
        &self,
        role_id: RoleId,
        grant_keys: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.role_grants
            .write()
            .await
            .insert(role_id, grant_keys.into_iter().map(Into::into).collect());
    }
}

#[async_trait]
impl UserRepository for InMemoryAccessDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl RolePermissionRepository for InMemoryAccessDirectory {
    async fn list_grant_keys_for_role(&self, role_id: RoleId) -> AppResult<Vec<String>> {
        Ok(self
            .role_grants
            .read()
            .await
            .get(&role_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReportingLineRepository for InMemoryAccessDirectory {
    async fn list_reporting_lines(&self, org_id: OrgId) -> AppResult<Vec<ReportingLine>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.org_id() == org_id)
            .map(|user| ReportingLine {
                user_id: user.id(),
                manager_id: user.manager_id(),
            })
            .collect())
    }
}

/// In-memory append-only access audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events of one organization, oldest first.
    pub async fn events_for_org(&self, org_id: OrgId) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.org_id == org_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditLog {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
