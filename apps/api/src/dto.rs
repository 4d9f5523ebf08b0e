use serde::{Deserialize, Serialize};
use stratum_application::UserContext;
use stratum_domain::NavItem;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Request establishing a cookie session for a provisioned user.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/establish-session-request.ts")]
pub struct EstablishSessionRequest {
    pub user_id: String,
    pub token: String,
}

/// Summary of the caller's resolved context.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/user-context-response.ts")]
pub struct UserContextResponse {
    pub user_id: String,
    pub email: String,
    pub org_id: String,
    pub role_id: String,
    /// Granted keys, `["*"]` for an all-allowed map.
    pub permissions: Vec<String>,
    pub subordinate_ids: Vec<String>,
    pub is_system: bool,
}

impl From<&UserContext> for UserContextResponse {
    fn from(context: &UserContext) -> Self {
        let user = context.user();
        Self {
            user_id: user.id().to_string(),
            email: user.email().as_str().to_owned(),
            org_id: context.org_id().to_string(),
            role_id: user.role_id().to_string(),
            permissions: context.permissions().granted_keys(),
            subordinate_ids: context
                .subordinates()
                .iter()
                .map(ToString::to_string)
                .collect(),
            is_system: context.is_system(),
        }
    }
}

/// Menu entry visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "api-types/nav-item-response.ts")]
pub struct NavItemResponse {
    pub key: String,
    pub label: String,
    pub href: Option<String>,
    pub permission: String,
    pub children: Vec<NavItemResponse>,
}

impl From<&NavItem> for NavItemResponse {
    fn from(item: &NavItem) -> Self {
        Self {
            key: item.key().as_str().to_owned(),
            label: item.label().as_str().to_owned(),
            href: item.href().map(ToOwned::to_owned),
            permission: item.permission().to_string(),
            children: item.children().iter().map(Self::from).collect(),
        }
    }
}

/// Request asking whether the caller may perform one action.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "api-types/access-check-request.ts")]
pub struct AccessCheckRequest {
    pub module: String,
    /// Resource inside the module; omitted for module-wide checks.
    pub resource: Option<String>,
    pub action: String,
}

/// Successful access check.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/access-check-response.ts")]
pub struct AccessCheckResponse {
    pub allowed: bool,
    pub user_id: String,
}

/// Query naming the organization that owns a record.
#[derive(Debug, Deserialize)]
pub struct RecordVisibilityQuery {
    pub org_id: String,
}

/// Whether a record falls in the caller's team scope.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api-types/record-visibility-response.ts")]
pub struct RecordVisibilityResponse {
    pub owner_id: String,
    pub visible: bool,
}
