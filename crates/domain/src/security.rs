use serde::{Deserialize, Serialize};

/// Outcome recorded for one access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The caller held the requested grant.
    Allowed,
    /// The caller lacked the requested grant.
    Denied,
    /// A session was present but no user context could be built.
    NoUserContext,
    /// The target record belongs to another organization.
    TenantMismatch,
}

impl AccessOutcome {
    /// Returns a stable storage value for this outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::NoUserContext => "no_user_context",
            Self::TenantMismatch => "tenant_mismatch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AccessOutcome;

    #[test]
    fn storage_values_are_snake_case() {
        assert_eq!(AccessOutcome::TenantMismatch.as_str(), "tenant_mismatch");
        assert_eq!(AccessOutcome::NoUserContext.as_str(), "no_user_context");
    }
}
