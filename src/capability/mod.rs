// Capability evaluation: pure predicates over the session's granted
// permission and role sets. Conditional rendering (hiding menu entries,
// gating buttons) goes through these; route generation never does.

use std::collections::HashSet;

/// Wildcard permission identifier granting every permission query
pub const ALL_PERMISSIONS: &str = "*:*:*";

/// Reserved role granting every role query
pub const SUPER_ROLE: &str = "admin";

/// Snapshot of a session's granted capabilities.
///
/// Detached from the session store on purpose: readers evaluate against the
/// snapshot they were handed, so a concurrent logout cannot tear a check in
/// half.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    permissions: HashSet<String>,
    roles: HashSet<String>,
}

impl CapabilitySet {
    pub fn new<P, R>(permissions: P, roles: R) -> Self
    where
        P: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        Self {
            permissions: permissions.into_iter().collect(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }

    /// True when the permission is granted, or the wildcard is held.
    ///
    /// With the wildcard present every query passes, including unrelated or
    /// empty-string identifiers.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(ALL_PERMISSIONS) || self.permissions.contains(permission)
    }

    /// True when at least one of the listed permissions is granted.
    /// An empty list never passes.
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// True when every listed permission is granted.
    /// Vacuously true on an empty list.
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }

    /// True when the role is granted, or the super-admin role is held
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(SUPER_ROLE) || self.roles.contains(role)
    }

    /// True when at least one of the listed roles is granted.
    /// An empty list never passes.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }

    pub fn permissions(&self) -> &HashSet<String> {
        &self.permissions
    }

    pub fn roles(&self) -> &HashSet<String> {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(perms: &[&str], roles: &[&str]) -> CapabilitySet {
        CapabilitySet::new(
            perms.iter().map(|s| s.to_string()),
            roles.iter().map(|s| s.to_string()),
        )
    }

    #[test]
    fn exact_permission_match() {
        let caps = set(&["system:user:list"], &[]);
        assert!(caps.has_permission("system:user:list"));
        assert!(!caps.has_permission("system:user:add"));
    }

    #[test]
    fn wildcard_grants_any_query() {
        let caps = set(&[ALL_PERMISSIONS], &[]);
        assert!(caps.has_permission("system:user:list"));
        assert!(caps.has_permission("anything:at:all"));
        assert!(caps.has_permission(""));
    }

    #[test]
    fn any_requires_one_match() {
        let caps = set(&["system:role:list"], &[]);
        assert!(caps.has_any_permission(&["system:user:list", "system:role:list"]));
        assert!(!caps.has_any_permission(&["system:user:list", "system:user:add"]));
        assert!(!caps.has_any_permission(&[]));
    }

    #[test]
    fn all_requires_every_match() {
        let caps = set(&["a:b:c", "d:e:f"], &[]);
        assert!(caps.has_all_permissions(&["a:b:c", "d:e:f"]));
        assert!(!caps.has_all_permissions(&["a:b:c", "x:y:z"]));
        // `every` over an empty list holds
        assert!(caps.has_all_permissions(&[]));
    }

    #[test]
    fn super_role_grants_any_role() {
        let caps = set(&[], &[SUPER_ROLE]);
        assert!(caps.has_role("auditor"));
        assert!(caps.has_any_role(&["operator"]));

        let plain = set(&[], &["operator"]);
        assert!(plain.has_role("operator"));
        assert!(!plain.has_role("auditor"));
        assert!(!plain.has_any_role(&[]));
    }
}
