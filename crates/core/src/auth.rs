use serde::{Deserialize, Serialize};

use crate::{OrgId, RoleId, UserId};

/// Caller identity extracted from a verified session credential.
///
/// Claims are produced once per request by the session layer and are never
/// persisted by the engine. The organization and role carried here are
/// informational only: the authoritative values come from the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    user_id: UserId,
    email: String,
    org_id: OrgId,
    role_id: RoleId,
}

impl SessionClaims {
    /// Creates session claims from verified credential data.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, org_id: OrgId, role_id: RoleId) -> Self {
        Self {
            user_id,
            email: email.into(),
            org_id,
            role_id,
        }
    }

    /// Returns the authenticated user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the email asserted by the credential.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the organization asserted by the credential.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Returns the role asserted by the credential.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }
}
