use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stratum_application::RolePermissionRepository;
use stratum_core::{AppResult, RoleId};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct GrantCacheEntry {
    grant_keys: Vec<String>,
    expires_at: Instant,
}

/// Time-bounded cache in front of a role grant repository.
///
/// Entries are keyed by role id only. User, organization and hierarchy data
/// are never cached here and are read fresh for every request. A zero TTL
/// disables caching entirely.
pub struct CachedRolePermissionRepository {
    inner: Arc<dyn RolePermissionRepository>,
    ttl: Duration,
    entries: RwLock<HashMap<RoleId, GrantCacheEntry>>,
}

impl CachedRolePermissionRepository {
    /// Wraps `inner` with a cache holding entries for `ttl`.
    #[must_use]
    pub fn new(inner: Arc<dyn RolePermissionRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drops the cached grants of one role, e.g. after its grants were edited.
    pub async fn invalidate(&self, role_id: RoleId) {
        if self.entries.write().await.remove(&role_id).is_some() {
            debug!(%role_id, "invalidated cached role grants");
        }
    }

    async fn cached(&self, role_id: RoleId) -> Option<Vec<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(&role_id) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.grant_keys.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(&role_id)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(&role_id);
        }

        None
    }
}

#[async_trait]
impl RolePermissionRepository for CachedRolePermissionRepository {
    async fn list_grant_keys_for_role(&self, role_id: RoleId) -> AppResult<Vec<String>> {
        if self.ttl.is_zero() {
            return self.inner.list_grant_keys_for_role(role_id).await;
        }

        if let Some(grant_keys) = self.cached(role_id).await {
            return Ok(grant_keys);
        }

        let grant_keys = self.inner.list_grant_keys_for_role(role_id).await?;

        let now = Instant::now();
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        self.entries.write().await.insert(
            role_id,
            GrantCacheEntry {
                grant_keys: grant_keys.clone(),
                expires_at,
            },
        );

        Ok(grant_keys)
    }
}
