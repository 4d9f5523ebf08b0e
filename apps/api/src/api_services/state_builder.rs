use std::sync::Arc;

use sqlx::PgPool;
use stratum_application::{
    PermissionGuard, RolePermissionRepository, SubordinateResolver, UserContextBuilder,
};
use stratum_core::AppError;
use stratum_infrastructure::{
    CachedRolePermissionRepository, PostgresAuditRepository, PostgresReportingLineRepository,
    PostgresRolePermissionRepository, PostgresUserRepository,
};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::navigation_catalog::default_navigation;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));

    let role_permissions: Arc<dyn RolePermissionRepository> = {
        let repository: Arc<dyn RolePermissionRepository> =
            Arc::new(PostgresRolePermissionRepository::new(pool.clone()));
        if config.role_grant_cache_ttl.is_zero() {
            repository
        } else {
            info!(
                ttl_seconds = config.role_grant_cache_ttl.as_secs(),
                "role grant cache enabled"
            );
            Arc::new(CachedRolePermissionRepository::new(
                repository,
                config.role_grant_cache_ttl,
            ))
        }
    };

    let subordinate_resolver =
        SubordinateResolver::new(Arc::new(PostgresReportingLineRepository::new(pool.clone())));
    let context_builder = UserContextBuilder::new(
        user_repository.clone(),
        role_permissions,
        subordinate_resolver,
        config.authorization.clone(),
    );
    let permission_guard =
        PermissionGuard::new(context_builder, Arc::new(PostgresAuditRepository::new(pool)));

    Ok(AppState {
        permission_guard,
        user_repository,
        navigation: Arc::new(default_navigation()?),
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    })
}
