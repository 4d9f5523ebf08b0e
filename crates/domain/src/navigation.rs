use serde::Serialize;
use stratum_core::{AppResult, NonEmptyString};

use crate::PermissionKey;

/// Declarative menu entry guarded by a permission key.
///
/// Visibility of a menu entry is a presentation hint only. The operation
/// behind every entry is checked again by the permission guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    key: NonEmptyString,
    label: NonEmptyString,
    href: Option<String>,
    permission: PermissionKey,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NavItem>,
}

impl NavItem {
    /// Creates a validated menu entry.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        href: Option<String>,
        permission: &str,
    ) -> AppResult<Self> {
        let href = href.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            key: NonEmptyString::new(key)?,
            label: NonEmptyString::new(label)?,
            href,
            permission: PermissionKey::parse(permission)?,
            children: Vec::new(),
        })
    }

    /// Returns the entry with nested children, kept in the given order.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }

    /// Returns the stable entry key.
    #[must_use]
    pub fn key(&self) -> &NonEmptyString {
        &self.key
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &NonEmptyString {
        &self.label
    }

    /// Returns the link target, if the entry is navigable.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Returns the permission key guarding the entry.
    #[must_use]
    pub fn permission(&self) -> &PermissionKey {
        &self.permission
    }

    /// Returns the nested entries.
    #[must_use]
    pub fn children(&self) -> &[NavItem] {
        self.children.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::NavItem;

    #[test]
    fn nav_item_requires_a_valid_permission_key() {
        assert!(NavItem::new("vendors", "Vendors", None, "").is_err());
        assert!(NavItem::new("vendors", "Vendors", None, "*").is_err());
        assert!(NavItem::new("vendors", "Vendors", None, "vendor:read").is_ok());
    }

    #[test]
    fn blank_href_is_dropped() {
        let item = NavItem::new("vendors", "Vendors", Some("  ".to_owned()), "vendor:read");
        assert!(item.is_ok_and(|item| item.href().is_none()));
    }

    #[test]
    fn serializes_permission_as_key_string() {
        let item = NavItem::new("po", "Purchase orders", Some("/po".to_owned()), "po:approve");
        assert!(item.is_ok());
        let json = serde_json::to_value(item.unwrap_or_else(|_| unreachable!()));
        assert!(json.is_ok());
        let json = json.unwrap_or_default();
        assert_eq!(json["permission"], "po:approve");
        assert!(json.get("children").is_none());
    }
}
