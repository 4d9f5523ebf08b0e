use stratum_domain::{NavItem, PermissionMap};

/// Returns the menu entries the permission map allows, in input order.
///
/// A missing map (unauthenticated caller) yields no entries and an
/// all-allowed map yields the tree unchanged. Nested entries are filtered
/// the same way; a parent the map does not allow is still kept as a section
/// header when at least one of its descendants survives.
///
/// This only decides what to show. Hiding an entry does not forbid the
/// operation behind it; that operation must still pass the permission guard.
#[must_use]
pub fn filter_navigation(items: &[NavItem], permissions: Option<&PermissionMap>) -> Vec<NavItem> {
    let Some(permissions) = permissions else {
        return Vec::new();
    };

    if permissions.is_all_allowed() {
        return items.to_vec();
    }

    items
        .iter()
        .filter_map(|item| {
            let children = filter_navigation(item.children(), Some(permissions));
            (permissions.allows(item.permission()) || !children.is_empty())
                .then(|| item.clone().with_children(children))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use stratum_domain::{NavItem, PermissionGrant, PermissionMap};

    use super::filter_navigation;

    fn item(key: &str, permission: &str) -> NavItem {
        NavItem::new(key, key, Some(format!("/{key}")), permission)
            .unwrap_or_else(|_| unreachable!())
    }

    fn map(keys: &[&str]) -> PermissionMap {
        PermissionMap::from_grant_sets([keys
            .iter()
            .filter_map(|key| PermissionGrant::parse(key).ok())
            .collect::<Vec<_>>()])
    }

    #[test]
    fn keeps_only_allowed_items_in_order() {
        let items = vec![item("item1", "mod:a"), item("item2", "mod:b"), item("item3", "mod:c")];

        let filtered = filter_navigation(&items, Some(&map(&["mod:b"])));
        assert_eq!(filtered, vec![item("item2", "mod:b")]);
    }

    #[test]
    fn missing_map_yields_nothing() {
        let items = vec![item("item1", "mod:a"), item("item2", "mod:b")];
        assert!(filter_navigation(&items, None).is_empty());
    }

    #[test]
    fn all_allowed_map_returns_items_unchanged() {
        let items = vec![item("item1", "mod:a"), item("item2", "mod:b"), item("item3", "mod:c")];

        let filtered = filter_navigation(&items, Some(&PermissionMap::all_allowed()));
        assert_eq!(filtered, items);
    }

    #[test]
    fn preserves_relative_order_of_survivors() {
        let items = vec![
            item("vendors", "vendor:read"),
            item("stock", "inventory:viewStock"),
            item("payroll", "hrms:payroll:read"),
            item("orders", "sales:read"),
        ];

        let filtered = filter_navigation(
            &items,
            Some(&map(&["sales:read", "vendor:read", "hrms:payroll:read"])),
        );
        let keys: Vec<&str> = filtered.iter().map(|item| item.key().as_str()).collect();
        assert_eq!(keys, vec!["vendors", "payroll", "orders"]);
    }

    #[test]
    fn filters_children_below_each_parent() {
        let tree = vec![
            item("inventory", "inventory:read").with_children(vec![
                item("stock", "inventory:viewStock"),
                item("transfers", "inventory:transfer:create"),
            ]),
            item("sales", "sales:read").with_children(vec![item("orders", "sales:order:read")]),
        ];

        let filtered = filter_navigation(
            &tree,
            Some(&map(&["inventory:read", "inventory:transfer:create", "sales:read"])),
        );

        let keys: Vec<&str> = filtered.iter().map(|item| item.key().as_str()).collect();
        assert_eq!(keys, vec!["inventory", "sales"]);
        let children: Vec<&str> = filtered[0]
            .children()
            .iter()
            .map(|item| item.key().as_str())
            .collect();
        assert_eq!(children, vec!["transfers"]);
        assert!(filtered[1].children().is_empty());
    }

    #[test]
    fn child_grant_keeps_its_section_header() {
        let tree = vec![
            item("inventory", "inventory:read")
                .with_children(vec![item("stock", "inventory:viewStock")]),
            item("hrms", "hrms:read").with_children(vec![
                item("payroll", "hrms:payroll:read"),
                item("leave", "hrms:leave:approve"),
            ]),
        ];

        let filtered = filter_navigation(&tree, Some(&map(&["hrms:leave:approve"])));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].key().as_str(), "hrms");
        let children: Vec<&str> = filtered[0]
            .children()
            .iter()
            .map(|item| item.key().as_str())
            .collect();
        assert_eq!(children, vec!["leave"]);
    }

    #[test]
    fn header_survives_through_a_deep_descendant() {
        let tree = vec![item("hrms", "hrms:read").with_children(vec![
            item("people", "hrms:people:read")
                .with_children(vec![item("leave", "hrms:leave:approve")]),
        ])];

        let filtered = filter_navigation(&tree, Some(&map(&["hrms:leave:approve"])));

        assert_eq!(filtered.len(), 1);
        let people = &filtered[0].children()[0];
        assert_eq!(people.key().as_str(), "people");
        assert_eq!(people.children()[0].key().as_str(), "leave");
    }
}
