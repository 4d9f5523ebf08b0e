use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use stratum_application::RolePermissionRepository;
use stratum_core::{AppResult, RoleId};

use super::CachedRolePermissionRepository;

#[derive(Default)]
struct CountingRolePermissions {
    calls: AtomicUsize,
}

#[async_trait]
impl RolePermissionRepository for CountingRolePermissions {
    async fn list_grant_keys_for_role(&self, _role_id: RoleId) -> AppResult<Vec<String>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec!["vendor:read".to_owned(), format!("report:v{call}")])
    }
}

#[tokio::test(start_paused = true)]
async fn serves_cached_grants_until_expiry() {
    let inner = Arc::new(CountingRolePermissions::default());
    let cache = CachedRolePermissionRepository::new(inner.clone(), Duration::from_secs(30));
    let role_id = RoleId::new();

    let first = cache.list_grant_keys_for_role(role_id).await.unwrap_or_default();
    let second = cache.list_grant_keys_for_role(role_id).await.unwrap_or_default();
    assert_eq!(first, second);
    assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(31)).await;

    let refreshed = cache.list_grant_keys_for_role(role_id).await.unwrap_or_default();
    assert_ne!(refreshed, first);
    assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn zero_ttl_always_reads_through() {
    let inner = Arc::new(CountingRolePermissions::default());
    let cache = CachedRolePermissionRepository::new(inner.clone(), Duration::ZERO);
    let role_id = RoleId::new();

    let _ = cache.list_grant_keys_for_role(role_id).await;
    let _ = cache.list_grant_keys_for_role(role_id).await;
    assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn entries_are_keyed_by_role() {
    let inner = Arc::new(CountingRolePermissions::default());
    let cache = CachedRolePermissionRepository::new(inner.clone(), Duration::from_secs(30));

    let _ = cache.list_grant_keys_for_role(RoleId::new()).await;
    let _ = cache.list_grant_keys_for_role(RoleId::new()).await;
    assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalidate_forces_a_fresh_read() {
    let inner = Arc::new(CountingRolePermissions::default());
    let cache = CachedRolePermissionRepository::new(inner.clone(), Duration::from_secs(30));
    let role_id = RoleId::new();

    let _ = cache.list_grant_keys_for_role(role_id).await;
    cache.invalidate(role_id).await;
    let _ = cache.list_grant_keys_for_role(role_id).await;
    assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
}
