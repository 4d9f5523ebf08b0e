use std::collections::{BTreeMap, BTreeSet};

use crate::{PermissionGrant, PermissionKey};

/// Resolved, request-scoped union of a caller's grants.
///
/// A map is immutable once built. Lookups default to deny; a map built from
/// any wildcard grant answers every lookup with `true`, including modules
/// that did not exist when the map was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMap {
    all_allowed: bool,
    modules: BTreeMap<String, ModuleGrants>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ModuleGrants {
    actions: BTreeSet<String>,
    resource_actions: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionMap {
    /// Returns a map that allows everything.
    #[must_use]
    pub fn all_allowed() -> Self {
        Self {
            all_allowed: true,
            modules: BTreeMap::new(),
        }
    }

    /// Builds a map from typed grant sets, one set per contributing role.
    #[must_use]
    pub fn from_grant_sets<I, G>(grant_sets: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = PermissionGrant>,
    {
        let mut builder = PermissionMapBuilder::new();
        for grants in grant_sets {
            builder.add_grants(grants);
        }

        builder.build()
    }

    /// Returns whether the map short-circuits every lookup to `true`.
    #[must_use]
    pub fn is_all_allowed(&self) -> bool {
        self.all_allowed
    }

    /// Returns whether `action` is granted module-wide on `module`.
    #[must_use]
    pub fn is_allowed(&self, module: &str, action: &str) -> bool {
        if self.all_allowed {
            return true;
        }

        self.modules
            .get(module)
            .is_some_and(|grants| grants.actions.contains(action))
    }

    /// Returns whether `action` is granted on `resource` inside `module`.
    ///
    /// A module-wide grant covers every resource of the module.
    #[must_use]
    pub fn is_allowed_on(&self, module: &str, resource: &str, action: &str) -> bool {
        if self.all_allowed {
            return true;
        }

        self.modules.get(module).is_some_and(|grants| {
            grants.actions.contains(action)
                || grants
                    .resource_actions
                    .get(resource)
                    .is_some_and(|actions| actions.contains(action))
        })
    }

    /// Returns whether the map allows a parsed permission key.
    #[must_use]
    pub fn allows(&self, key: &PermissionKey) -> bool {
        match key.resource() {
            Some(resource) => self.is_allowed_on(key.module(), resource, key.action()),
            None => self.is_allowed(key.module(), key.action()),
        }
    }

    /// Returns the materialized grant keys in stable order.
    ///
    /// An all-allowed map reports only the wildcard key.
    #[must_use]
    pub fn granted_keys(&self) -> Vec<String> {
        if self.all_allowed {
            return vec![PermissionGrant::All.to_string()];
        }

        let mut keys = Vec::new();
        for (module, grants) in &self.modules {
            for action in &grants.actions {
                keys.push(format!("{module}:{action}"));
            }
            for (resource, actions) in &grants.resource_actions {
                for action in actions {
                    keys.push(format!("{module}:{resource}:{action}"));
                }
            }
        }

        keys
    }
}

/// Accumulates one or more grant sets into a [`PermissionMap`].
///
/// Stored grant keys that fail to parse are skipped and remembered so the
/// caller can log them; a malformed key never fails construction and never
/// allows anything.
#[derive(Debug, Default)]
pub struct PermissionMapBuilder {
    map: PermissionMap,
    rejected_keys: Vec<String>,
}

impl PermissionMapBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one typed grant set.
    pub fn add_grants<G>(&mut self, grants: G) -> &mut Self
    where
        G: IntoIterator<Item = PermissionGrant>,
    {
        for grant in grants {
            self.add_grant(grant);
        }

        self
    }

    /// Adds one set of stored grant keys, skipping malformed entries.
    pub fn add_grant_keys<K, S>(&mut self, keys: K) -> &mut Self
    where
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            match PermissionGrant::parse(key.as_ref()) {
                Ok(grant) => self.add_grant(grant),
                Err(_) => self.rejected_keys.push(key.as_ref().to_owned()),
            }
        }

        self
    }

    /// Returns the stored keys skipped so far.
    #[must_use]
    pub fn rejected_keys(&self) -> &[String] {
        self.rejected_keys.as_slice()
    }

    /// Finishes construction.
    #[must_use]
    pub fn build(self) -> PermissionMap {
        self.map
    }

    fn add_grant(&mut self, grant: PermissionGrant) {
        if self.map.all_allowed {
            return;
        }

        match grant {
            PermissionGrant::All => {
                self.map.all_allowed = true;
                self.map.modules.clear();
            }
            PermissionGrant::Scoped(key) => {
                let module = self.map.modules.entry(key.module().to_owned()).or_default();
                match key.resource() {
                    Some(resource) => {
                        module
                            .resource_actions
                            .entry(resource.to_owned())
                            .or_default()
                            .insert(key.action().to_owned());
                    }
                    None => {
                        module.actions.insert(key.action().to_owned());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{PermissionMap, PermissionMapBuilder};
    use crate::{PermissionGrant, PermissionKey};

    fn grants(keys: &[&str]) -> Vec<PermissionGrant> {
        keys.iter()
            .filter_map(|key| PermissionGrant::parse(key).ok())
            .collect()
    }

    #[test]
    fn empty_map_denies_everything() {
        let map = PermissionMap::from_grant_sets(Vec::<Vec<PermissionGrant>>::new());
        assert!(!map.is_allowed("vendor", "read"));
        assert!(!map.is_allowed_on("vendor", "vendor", "read"));
        assert!(!map.is_all_allowed());
    }

    #[test]
    fn grant_union_across_roles() {
        let map = PermissionMap::from_grant_sets([grants(&["a:read"]), grants(&["b:write"])]);

        assert!(map.is_allowed("a", "read"));
        assert!(map.is_allowed("b", "write"));
        assert!(!map.is_allowed("a", "write"));
        assert!(!map.is_allowed("b", "read"));
    }

    #[test]
    fn wildcard_in_any_role_allows_unknown_modules() {
        let map = PermissionMap::from_grant_sets([grants(&["vendor:read"]), grants(&["*"])]);

        assert!(map.is_all_allowed());
        assert!(map.is_allowed("payroll", "approve"));
        assert!(map.is_allowed_on("store", "register", "close"));
        assert_eq!(map.granted_keys(), vec!["*".to_owned()]);
    }

    #[test]
    fn module_grant_covers_every_resource() {
        let map = PermissionMap::from_grant_sets([grants(&["vendor:read"])]);

        assert!(map.is_allowed_on("vendor", "vendor", "read"));
        assert!(map.is_allowed_on("vendor", "contract", "read"));
        assert!(!map.is_allowed_on("vendor", "vendor", "delete"));
    }

    #[test]
    fn resource_grant_stays_on_its_resource() {
        let map = PermissionMap::from_grant_sets([grants(&["sales:lead:assign"])]);

        assert!(map.is_allowed_on("sales", "lead", "assign"));
        assert!(!map.is_allowed_on("sales", "order", "assign"));
        assert!(!map.is_allowed("sales", "assign"));

        let key = PermissionKey::parse("sales:lead:assign");
        assert!(key.is_ok());
        assert!(map.allows(&key.unwrap_or_else(|_| unreachable!())));
    }

    #[test]
    fn malformed_stored_keys_are_skipped_and_reported() {
        let mut builder = PermissionMapBuilder::new();
        builder.add_grant_keys(["vendor:read", "vendor", "", "po:approve"]);

        assert_eq!(builder.rejected_keys(), ["vendor".to_owned(), String::new()]);

        let map = builder.build();
        assert!(map.is_allowed("vendor", "read"));
        assert!(map.is_allowed("po", "approve"));
        assert!(!map.is_allowed("vendor", "vendor"));
    }

    #[test]
    fn granted_keys_are_listed_in_stable_order() {
        let map = PermissionMap::from_grant_sets([grants(&[
            "vendor:create",
            "inventory:viewStock",
            "vendor:read",
            "sales:lead:assign",
        ])]);

        assert_eq!(
            map.granted_keys(),
            vec![
                "inventory:viewStock".to_owned(),
                "sales:lead:assign".to_owned(),
                "vendor:create".to_owned(),
                "vendor:read".to_owned(),
            ]
        );
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-zA-Z0-9_]{0,8}"
    }

    proptest! {
        #[test]
        fn default_deny_without_matching_grant(
            granted_module in segment(),
            granted_action in segment(),
            module in segment(),
            action in segment()
        ) {
            prop_assume!(granted_module != module || granted_action != action);
            let key = format!("{granted_module}:{granted_action}");
            let map = PermissionMap::from_grant_sets([grants(&[key.as_str()])]);

            prop_assert!(!map.is_allowed(&module, &action));
        }

        #[test]
        fn wildcard_supremacy(module in segment(), resource in segment(), action in segment()) {
            let map = PermissionMap::from_grant_sets([grants(&["*"])]);

            prop_assert!(map.is_allowed(&module, &action));
            prop_assert!(map.is_allowed_on(&module, &resource, &action));
        }

        #[test]
        fn union_allows_each_contributing_grant(
            left in proptest::collection::vec((segment(), segment()), 0..6),
            right in proptest::collection::vec((segment(), segment()), 0..6)
        ) {
            let to_keys = |pairs: &Vec<(String, String)>| -> Vec<String> {
                pairs.iter().map(|(module, action)| format!("{module}:{action}")).collect()
            };
            let left_keys = to_keys(&left);
            let right_keys = to_keys(&right);

            let mut builder = PermissionMapBuilder::new();
            builder.add_grant_keys(&left_keys).add_grant_keys(&right_keys);
            let map = builder.build();

            for (module, action) in left.iter().chain(right.iter()) {
                prop_assert!(map.is_allowed(module, action));
            }
        }
    }
}
