//! Grant keys authored by administrators when defining roles.
//!
//! A grant key is a colon-delimited string: `module:action` or
//! `module:resource:action`, e.g. `vendor:read`, `po:approve`,
//! `inventory:stock:adjust`. The single character `*` is the wildcard grant.
//! These strings are the only persisted artifact of the engine, so the
//! accepted shapes must stay stable.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stratum_core::{AppError, AppResult};

/// Reserved grant key meaning unconditional allow across all modules and actions.
pub const WILDCARD_GRANT: &str = "*";

/// A non-wildcard permission key naming a module, an optional resource and an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionKey {
    module: String,
    resource: Option<String>,
    action: String,
}

impl PermissionKey {
    /// Parses `module:action` or `module:resource:action`.
    ///
    /// Keys compare as exact strings, so surrounding whitespace is rejected
    /// rather than normalised.
    pub fn parse(value: &str) -> AppResult<Self> {
        if value == WILDCARD_GRANT {
            return Err(AppError::Validation(
                "wildcard is not a valid permission key here".to_owned(),
            ));
        }

        let segments: Vec<&str> = value.split(':').collect();
        let (module, resource, action) = match segments.as_slice() {
            [module, action] => (*module, None, *action),
            [module, resource, action] => (*module, Some(*resource), *action),
            _ => {
                return Err(AppError::Validation(format!(
                    "permission key '{value}' must have the form \
                     'module:action' or 'module:resource:action'"
                )));
            }
        };

        validate_segment(value, "module", module)?;
        if let Some(resource) = resource {
            validate_segment(value, "resource", resource)?;
        }
        validate_segment(value, "action", action)?;

        Ok(Self {
            module: module.to_owned(),
            resource: resource.map(ToOwned::to_owned),
            action: action.to_owned(),
        })
    }

    /// Returns the module segment.
    #[must_use]
    pub fn module(&self) -> &str {
        self.module.as_str()
    }

    /// Returns the resource segment for resource-scoped keys.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the action segment.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }
}

impl Display for PermissionKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.resource {
            Some(resource) => write!(formatter, "{}:{resource}:{}", self.module, self.action),
            None => write!(formatter, "{}:{}", self.module, self.action),
        }
    }
}

impl FromStr for PermissionKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PermissionKey {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<PermissionKey> for String {
    fn from(value: PermissionKey) -> Self {
        value.to_string()
    }
}

/// One grant carried by a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PermissionGrant {
    /// The wildcard grant `*`.
    All,
    /// A module-level or resource-level grant.
    Scoped(PermissionKey),
}

impl PermissionGrant {
    /// Parses a stored grant key.
    pub fn parse(value: &str) -> AppResult<Self> {
        if value == WILDCARD_GRANT {
            return Ok(Self::All);
        }

        PermissionKey::parse(value).map(Self::Scoped)
    }

    /// Returns whether this is the wildcard grant.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Display for PermissionGrant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => formatter.write_str(WILDCARD_GRANT),
            Self::Scoped(key) => Display::fmt(key, formatter),
        }
    }
}

impl FromStr for PermissionGrant {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PermissionGrant {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<PermissionGrant> for String {
    fn from(value: PermissionGrant) -> Self {
        value.to_string()
    }
}

/// Validates grant keys at role-authoring time.
///
/// Every malformed key is reported in a single validation error so that an
/// administrator can fix a role definition in one pass.
pub fn validate_grant_keys<I, S>(keys: I) -> AppResult<Vec<PermissionGrant>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grants = Vec::new();
    let mut rejected = Vec::new();

    for key in keys {
        match PermissionGrant::parse(key.as_ref()) {
            Ok(grant) => grants.push(grant),
            Err(_) => rejected.push(format!("'{}'", key.as_ref())),
        }
    }

    if !rejected.is_empty() {
        return Err(AppError::Validation(format!(
            "malformed grant keys: {}",
            rejected.join(", ")
        )));
    }

    Ok(grants)
}

fn validate_segment(key: &str, label: &str, segment: &str) -> AppResult<()> {
    let mut characters = segment.chars();
    let starts_with_letter = characters
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic());
    let rest_is_valid =
        characters.all(|value| value.is_ascii_alphanumeric() || value == '_' || value == '-');

    if starts_with_letter && rest_is_valid {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "permission key '{key}' has an invalid {label} segment '{segment}'"
    )))
}
