use std::collections::HashMap;

use async_trait::async_trait;
use stratum_core::{AppResult, OrgId, RoleId, UserId};
use stratum_domain::{EmailAddress, ReportingLine, User};
use tokio::sync::Mutex;

use crate::{
    AuditEvent, AuditRepository, ReportingLineRepository, RolePermissionRepository, UserRepository,
};

#[derive(Default)]
pub(crate) struct FakeDirectory {
    users: Mutex<HashMap<UserId, User>>,
    grants: Mutex<HashMap<RoleId, Vec<String>>>,
    lines: Mutex<HashMap<OrgId, Vec<ReportingLine>>>,
}

impl FakeDirectory {
    pub(crate) async fn add_user(&self, user: User) {
        self.add_lines(
            user.org_id(),
            [ReportingLine {
                user_id: user.id(),
                manager_id: user.manager_id(),
            }],
        )
        .await;
        self.users.lock().await.insert(user.id(), user);
    }

    pub(crate) async fn add_lines(
        &self,
        org_id: OrgId,
        lines: impl IntoIterator<Item = ReportingLine>,
    ) {
        self.lines
            .lock()
            .await
            .entry(org_id)
            .or_default()
            .extend(lines);
    }

    pub(crate) async fn set_grants(&self, role_id: RoleId, keys: &[&str]) {
        self.grants
            .lock()
            .await
            .insert(role_id, keys.iter().map(|key| (*key).to_owned()).collect());
    }
}

#[async_trait]
impl UserRepository for FakeDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl RolePermissionRepository for FakeDirectory {
    async fn list_grant_keys_for_role(&self, role_id: RoleId) -> AppResult<Vec<String>> {
        Ok(self
            .grants
            .lock()
            .await
            .get(&role_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReportingLineRepository for FakeDirectory {
    async fn list_reporting_lines(&self, org_id: OrgId) -> AppResult<Vec<ReportingLine>> {
        Ok(self
            .lines
            .lock()
            .await
            .get(&org_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

pub(crate) fn user(
    email: &str,
    org_id: OrgId,
    role_id: RoleId,
    manager_id: Option<UserId>,
) -> User {
    let email = EmailAddress::new(email).unwrap_or_else(|_| unreachable!());
    User::new(UserId::new(), email, org_id, role_id, manager_id).unwrap_or_else(|_| unreachable!())
}
