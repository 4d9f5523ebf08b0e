use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use stratum_core::{AppError, AppResult, OrgId, UserId};
use stratum_domain::{PermissionGrant, PermissionMap, PermissionMapBuilder, User};
use tracing::warn;

use crate::{AuthorizationConfig, RolePermissionRepository, SubordinateResolver, UserRepository};


/// Identity, permissions and team scope of the caller for one request.
///
/// Built fresh per request and dropped at its end; never cached or shared
/// between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    user: User,
    permissions: PermissionMap,
    subordinates: BTreeSet<UserId>,
    org_id: OrgId,
    is_system: bool,
}

impl UserContext {
    pub(crate) fn new(
        user: User,
        permissions: PermissionMap,
        subordinates: BTreeSet<UserId>,
        is_system: bool,
    ) -> Self {
        let org_id = user.org_id();
        Self {
            user,
            permissions,
            subordinates,
            org_id,
            is_system,
        }
    }

    /// Returns the caller's user record.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Returns the caller's resolved permission map.
    #[must_use]
    pub fn permissions(&self) -> &PermissionMap {
        &self.permissions
    }

    /// Returns users transitively reporting to the caller.
    #[must_use]
    pub fn subordinates(&self) -> &BTreeSet<UserId> {
        &self.subordinates
    }

    /// Returns the tenant the caller belongs to, taken from the user record.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Returns whether the caller holds a designated system role.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the caller together with everyone reporting to them.
    #[must_use]
    pub fn team_member_ids(&self) -> BTreeSet<UserId> {
        let mut members = self.subordinates.clone();
        members.insert(self.user.id());
        members
    }

    /// Returns whether a record owned by `owner_id` falls in the caller's team scope.
    #[must_use]
    pub fn can_view_owned_by(&self, owner_id: UserId) -> bool {
        owner_id == self.user.id() || self.subordinates.contains(&owner_id)
    }
}

/// Composes user, role grants and hierarchy lookups into a [`UserContext`].
#[derive(Clone)]
pub struct UserContextBuilder {
    users: Arc<dyn UserRepository>,
    role_permissions: Arc<dyn RolePermissionRepository>,
    subordinate_resolver: SubordinateResolver,
    config: Arc<AuthorizationConfig>,
}

impl UserContextBuilder {
    /// Creates a builder from its collaborators.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        role_permissions: Arc<dyn RolePermissionRepository>,
        subordinate_resolver: SubordinateResolver,
        config: AuthorizationConfig,
    ) -> Self {
        Self {
            users,
            role_permissions,
            subordinate_resolver,
            config: Arc::new(config),
        }
    }

    /// Returns the timeout applied to each external lookup.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        self.config.lookup_timeout()
    }

    /// Builds the context for `user_id`.
    ///
    /// Returns `Ok(None)` when the user record does not exist. The role and
    /// organization are always read from the user record, never from
    /// session claims. Grant and hierarchy lookups run concurrently, each
    /// under the configured timeout.
    pub async fn build(&self, user_id: UserId) -> AppResult<Option<UserContext>> {
        let timeout = self.config.lookup_timeout();

        let Some(user) = within(timeout, "user", self.users.find_user(user_id)).await? else {
            return Ok(None);
        };

        let (grant_keys, subordinates) = tokio::try_join!(
            within(
                timeout,
                "role grants",
                self.role_permissions.list_grant_keys_for_role(user.role_id()),
            ),
            within(
                timeout,
                "subordinates",
                self.subordinate_resolver
                    .subordinates_of(user.org_id(), user.id()),
            ),
        )?;

        let mut builder = PermissionMapBuilder::new();
        builder.add_grant_keys(&grant_keys);

        if !builder.rejected_keys().is_empty() {
            warn!(
                role_id = %user.role_id(),
                rejected = ?builder.rejected_keys(),
                "skipping malformed grant keys"
            );
        }

        if self.config.is_bootstrap_admin(user.email().as_str()) {
            warn!(
                user_id = %user.id(),
                "applying bootstrap administrator grant set"
            );
            builder.add_grants([PermissionGrant::All]);
        }

        let is_system = self.config.is_system_role(user.role_id());

        Ok(Some(UserContext::new(
            user,
            builder.build(),
            subordinates,
            is_system,
        )))
    }
}

async fn within<T>(
    timeout: Duration,
    lookup: &str,
    future: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        AppError::Internal(format!(
            "{lookup} lookup timed out after {}ms",
            timeout.as_millis()
        ))
    })?
}
