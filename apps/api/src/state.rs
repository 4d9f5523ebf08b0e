use std::sync::Arc;

use stratum_application::{PermissionGuard, UserRepository};
use stratum_domain::NavItem;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub permission_guard: PermissionGuard,
    pub user_repository: Arc<dyn UserRepository>,
    pub navigation: Arc<Vec<NavItem>>,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
