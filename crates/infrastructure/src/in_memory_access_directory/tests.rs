use std::sync::Arc;

use stratum_application::{
    AuditRepository, AuthorizationConfig, PermissionGuard, ReportingLineRepository,
    ResolvedSession, RolePermissionRepository, SubordinateResolver, UserContextBuilder,
    UserRepository,
};
use stratum_core::{OrgId, RoleId, SessionClaims, UserId};
use stratum_domain::{AccessOutcome, EmailAddress, Role, User};

use super::{InMemoryAccessDirectory, InMemoryAuditLog};

fn user(email: &str, org_id: OrgId, role_id: RoleId, manager_id: Option<UserId>) -> User {
    let email = EmailAddress::new(email).unwrap_or_else(|_| unreachable!());
    User::new(UserId::new(), email, org_id, role_id, manager_id).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn reporting_lines_are_scoped_to_the_organization() {
    let directory = InMemoryAccessDirectory::new();
    let (org1, org2) = (OrgId::new(), OrgId::new());
    let manager = user("m@acme.example", org1, RoleId::new(), None);
    let report = user("r@acme.example", org1, RoleId::new(), Some(manager.id()));
    let stranger = user("s@other.example", org2, RoleId::new(), None);
    let report_id = report.id();
    directory.upsert_user(manager).await;
    directory.upsert_user(report).await;
    directory.upsert_user(stranger).await;

    let lines = directory.list_reporting_lines(org1).await.unwrap_or_default();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|line| line.user_id == report_id));
}

#[tokio::test]
async fn unknown_role_has_no_grants() {
    let directory = InMemoryAccessDirectory::new();
    let grants = directory.list_grant_keys_for_role(RoleId::new()).await;
    assert!(grants.is_ok_and(|grants| grants.is_empty()));
}

#[tokio::test]
async fn removed_user_is_no_longer_found() {
    let directory = InMemoryAccessDirectory::new();
    let member = user("m@acme.example", OrgId::new(), RoleId::new(), None);
    let member_id = member.id();
    directory.upsert_user(member).await;

    assert!(directory.remove_user(member_id).await);
    assert!(directory.find_user(member_id).await.unwrap_or_default().is_none());
}

#[tokio::test]
async fn guard_over_directory_enforces_grants_and_tenants() {
    let directory = Arc::new(InMemoryAccessDirectory::new());
    let audit_log = Arc::new(InMemoryAuditLog::new());
    let org1 = OrgId::new();

    let buyer_role = Role::new(RoleId::new(), "Buyer", ["vendor:read", "vendor:create"]);
    assert!(buyer_role.is_ok());
    let buyer_role = buyer_role.unwrap_or_else(|_| unreachable!());
    directory.upsert_role(&buyer_role).await;

    let buyer = user("buyer@acme.example", org1, buyer_role.id(), None);
    let claims = SessionClaims::new(buyer.id(), "buyer@acme.example", org1, buyer_role.id());
    directory.upsert_user(buyer).await;

    let guard = PermissionGuard::new(
        UserContextBuilder::new(
            directory.clone(),
            directory.clone(),
            SubordinateResolver::new(directory.clone()),
            AuthorizationConfig::default(),
        ),
        audit_log.clone(),
    );
    let session = ResolvedSession::new(Some(claims));

    let allowed = guard
        .check_action_permission(&session, "vendor", "vendor", "create")
        .await;
    assert!(allowed.is_ok());

    let denied = guard
        .check_action_permission(&session, "vendor", "vendor", "delete")
        .await;
    assert!(denied.is_err());

    let outcomes: Vec<AccessOutcome> = audit_log
        .events_for_org(org1)
        .await
        .iter()
        .map(|event| event.outcome)
        .collect();
    assert_eq!(outcomes, vec![AccessOutcome::Allowed, AccessOutcome::Denied]);
}

#[tokio::test]
async fn audit_log_filters_by_organization() {
    let audit_log = InMemoryAuditLog::new();
    let org1 = OrgId::new();

    let event = stratum_application::AuditEvent {
        org_id: org1,
        actor: UserId::new(),
        module: "sales".to_owned(),
        resource: None,
        action: "read".to_owned(),
        target_id: None,
        outcome: AccessOutcome::Allowed,
        occurred_at: Default::default(),
    };
    assert!(audit_log.append_event(event).await.is_ok());

    assert_eq!(audit_log.events_for_org(org1).await.len(), 1);
    assert!(audit_log.events_for_org(OrgId::new()).await.is_empty());
}
