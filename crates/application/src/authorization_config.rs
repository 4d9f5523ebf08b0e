use std::collections::BTreeSet;
use std::time::Duration;

use stratum_core::RoleId;

/// Default timeout applied to each external lookup while building a context.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Engine settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationConfig {
    lookup_timeout: Duration,
    system_role_ids: BTreeSet<RoleId>,
    bootstrap_admin_emails: BTreeSet<String>,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            system_role_ids: BTreeSet::new(),
            bootstrap_admin_emails: BTreeSet::new(),
        }
    }
}

impl AuthorizationConfig {
    /// Sets the per-lookup timeout.
    #[must_use]
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Designates roles allowed to act across organizations.
    #[must_use]
    pub fn with_system_role_ids(mut self, role_ids: impl IntoIterator<Item = RoleId>) -> Self {
        self.system_role_ids = role_ids.into_iter().collect();
        self
    }

    /// Sets the emails that receive a wildcard grant set during bootstrap.
    #[must_use]
    pub fn with_bootstrap_admin_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.bootstrap_admin_emails = emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        self
    }

    /// Returns the per-lookup timeout.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Returns whether a role is designated as a system role.
    #[must_use]
    pub fn is_system_role(&self, role_id: RoleId) -> bool {
        self.system_role_ids.contains(&role_id)
    }

    /// Returns whether an email is listed as a bootstrap administrator.
    #[must_use]
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.bootstrap_admin_emails
            .contains(email.trim().to_lowercase().as_str())
    }
}
