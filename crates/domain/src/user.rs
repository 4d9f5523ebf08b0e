//! User identity records read by the engine.
//!
//! Users are provisioned by an external flow; the engine only reads them.

use serde::{Deserialize, Serialize};
use stratum_core::{AppError, AppResult, OrgId, RoleId, UserId};

/// Validated, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A user as stored by the provisioning flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    org_id: OrgId,
    role_id: RoleId,
    manager_id: Option<UserId>,
}

impl User {
    /// Creates a user record. `manager_id` of `None` marks the top of the hierarchy.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        org_id: OrgId,
        role_id: RoleId,
        manager_id: Option<UserId>,
    ) -> AppResult<Self> {
        if manager_id == Some(id) {
            return Err(AppError::Validation(format!(
                "user '{id}' cannot be their own manager"
            )));
        }

        Ok(Self {
            id,
            email,
            org_id,
            role_id,
            manager_id,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the organization the user belongs to.
    #[must_use]
    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Returns the role assigned to the user.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Returns the direct manager, if any.
    #[must_use]
    pub fn manager_id(&self) -> Option<UserId> {
        self.manager_id
    }
}

#[cfg(test)]
mod tests {
    use stratum_core::{OrgId, RoleId, UserId};

    use super::{EmailAddress, User};

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("  Buyer@Acme.Example ");
        assert!(email.is_ok());
        assert_eq!(
            email.map(String::from).unwrap_or_default(),
            "buyer@acme.example"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("buyer.acme.example").is_err());
    }

    #[test]
    fn email_with_two_ats_is_rejected() {
        assert!(EmailAddress::new("buyer@ops@acme.example").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("buyer@localhost").is_err());
    }

    #[test]
    fn user_cannot_manage_themselves() {
        let user_id = UserId::new();
        let email = EmailAddress::new("lead@acme.example");
        assert!(email.is_ok());

        let user = User::new(
            user_id,
            email.unwrap_or_else(|_| unreachable!()),
            OrgId::new(),
            RoleId::new(),
            Some(user_id),
        );
        assert!(user.is_err());
    }
}
