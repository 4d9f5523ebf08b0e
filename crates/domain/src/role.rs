use std::collections::BTreeSet;

use stratum_core::{AppResult, NonEmptyString, RoleId};

use crate::{PermissionGrant, validate_grant_keys};

/// Named bundle of grants, read-only from the engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    grants: BTreeSet<PermissionGrant>,
}

impl Role {
    /// Creates a validated role, rejecting any malformed grant key.
    pub fn new<I, S>(id: RoleId, name: impl Into<String>, grant_keys: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            grants: validate_grant_keys(grant_keys)?.into_iter().collect(),
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the role grants.
    #[must_use]
    pub fn grants(&self) -> &BTreeSet<PermissionGrant> {
        &self.grants
    }

    /// Returns the grants in their stored string form.
    #[must_use]
    pub fn grant_keys(&self) -> Vec<String> {
        self.grants.iter().map(ToString::to_string).collect()
    }

    /// Returns whether the role carries the wildcard grant.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.grants.contains(&PermissionGrant::All)
    }
}

#[cfg(test)]
mod tests {
    use stratum_core::RoleId;

    use super::Role;

    #[test]
    fn role_rejects_malformed_grant_at_definition_time() {
        let role = Role::new(RoleId::new(), "manager", ["vendor:read", "vendor-read"]);
        assert!(role.is_err());
    }

    #[test]
    fn role_deduplicates_grants() {
        let role = Role::new(
            RoleId::new(),
            "manager",
            ["vendor:read", "vendor:create", "vendor:read"],
        );
        assert!(role.is_ok());
        let role = role.unwrap_or_else(|_| unreachable!());
        assert_eq!(role.grant_keys(), vec!["vendor:create", "vendor:read"]);
        assert!(!role.is_wildcard());
    }

    #[test]
    fn administrator_role_is_wildcard() {
        let role = Role::new(RoleId::new(), "administrator", ["*"]);
        assert!(role.is_ok_and(|role| role.is_wildcard()));
    }
}
