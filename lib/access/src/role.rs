//! Role types for route authorization.
//!
//! Roles are opaque, case-sensitive strings supplied by the identity provider.
//! Two values are reserved: [`ADMIN`] unlocks the admin zone and [`USER`]
//! marks ordinary platform access. Any other string is carried through
//! unchanged; it simply grants nothing the gate knows about.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// The reserved role that grants access to the admin zone.
pub const ADMIN: &str = "admin";

/// The reserved role for ordinary signed-in users.
pub const USER: &str = "user";

/// A single role string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a role from any string. Unknown roles are accepted as-is.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of roles held by one identity.
///
/// Membership tests are exact string comparisons. Nothing is implied: holding
/// `admin` does not add `user` unless the provider supplied both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a role set holding only `user`.
    #[must_use]
    pub fn user() -> Self {
        Self::from_values([USER])
    }

    /// Creates a role set holding `admin` and `user`.
    #[must_use]
    pub fn admin() -> Self {
        Self::from_values([ADMIN, USER])
    }

    /// Creates a role set from raw role strings. Duplicates collapse.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: values.into_iter().map(Role::new).collect(),
        }
    }

    /// Builds a role set from the provider's roles claim.
    ///
    /// When the claim is absent the configured defaults apply. A claim that is
    /// present but empty yields an empty set.
    #[must_use]
    pub fn from_claim(values: Option<Vec<String>>, defaults: &[String]) -> Self {
        match values {
            Some(values) => Self::from_values(values),
            None => Self::from_values(defaults.iter().cloned()),
        }
    }

    /// Returns true if the set contains exactly this role string.
    #[must_use]
    pub fn has(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Returns true if the set contains any of the given roles.
    #[must_use]
    pub fn has_any(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has(r))
    }

    /// Returns true if the set contains the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has(ADMIN)
    }

    /// Returns true if the set contains the user role.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.has(USER)
    }

    /// Iterates over the roles in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.roles {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_exact() {
        assert!(RoleSet::from_values([ADMIN]).is_admin());
        assert!(!RoleSet::from_values(["Admin"]).is_admin());
        assert!(!RoleSet::from_values(["admin "]).is_admin());
    }

    #[test]
    fn role_set_none_is_empty() {
        let roles = RoleSet::none();
        assert!(roles.is_empty());
        assert!(!roles.is_admin());
        assert!(!roles.is_user());
    }

    #[test]
    fn role_set_user_is_not_admin() {
        let roles = RoleSet::user();
        assert!(roles.is_user());
        assert!(!roles.is_admin());
        assert_eq!(roles.len(), 1);
    }

    #[test]
    fn role_set_admin_has_both_roles() {
        let roles = RoleSet::admin();
        assert!(roles.is_admin());
        assert!(roles.is_user());
    }

    #[test]
    fn admin_alone_does_not_imply_user() {
        let roles = RoleSet::from_values(["admin"]);
        assert!(roles.is_admin());
        assert!(!roles.is_user());
    }

    #[test]
    fn membership_is_case_sensitive() {
        let roles = RoleSet::from_values(["ADMIN", "User"]);
        assert!(!roles.is_admin());
        assert!(!roles.is_user());
        assert!(roles.has("ADMIN"));
    }

    #[test]
    fn unknown_roles_are_kept() {
        let roles = RoleSet::from_values(["editor", "billing"]);
        assert!(roles.has("editor"));
        assert!(roles.has("billing"));
        assert!(!roles.is_admin());
    }

    #[test]
    fn duplicates_collapse() {
        let roles = RoleSet::from_values(["user", "user", "admin"]);
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn has_any_matches_one_of() {
        let roles = RoleSet::from_values(["editor"]);
        assert!(!roles.has_any(&[USER, ADMIN]));
        assert!(RoleSet::user().has_any(&[USER, ADMIN]));
        assert!(!RoleSet::user().has_any(&[]));
    }

    #[test]
    fn from_claim_uses_defaults_only_when_absent() {
        let defaults = vec!["user".to_string()];

        let roles = RoleSet::from_claim(None, &defaults);
        assert!(roles.is_user());

        let roles = RoleSet::from_claim(Some(vec![]), &defaults);
        assert!(roles.is_empty());

        let roles = RoleSet::from_claim(Some(vec!["admin".to_string()]), &defaults);
        assert!(roles.is_admin());
        assert!(!roles.is_user());
    }

    #[test]
    fn display_lists_sorted_roles() {
        let roles = RoleSet::from_values(["user", "admin"]);
        assert_eq!(roles.to_string(), "admin, user");
    }

    #[test]
    fn role_set_serializes_as_array() {
        let roles = RoleSet::admin();
        let json = serde_json::to_string(&roles).expect("serialize");
        assert_eq!(json, r#"["admin","user"]"#);

        let parsed: RoleSet = serde_json::from_str(r#"["user","editor"]"#).expect("deserialize");
        assert!(parsed.is_user());
        assert!(parsed.has("editor"));
    }
}
