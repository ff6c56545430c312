//! Core authorization types

use serde::{Deserialize, Serialize};

/// Unique role identifier
pub type RoleName = String;

/// Security identifier used to match ACL entries
pub type Sid = String;

/// Principal (user, service account, agent) being authorized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier assigned by the host system
    pub id: String,

    /// Security identifier matched against ACEs and resource owners
    pub sid: Sid,

    /// Distinct role names, in the order they are requested from the role repository
    #[serde(default)]
    role_names: Vec<RoleName>,
}

impl Principal {
    /// Create a principal with no roles
    pub fn new(id: impl Into<String>, sid: impl Into<Sid>) -> Self {
        Self {
            id: id.into(),
            sid: sid.into(),
            role_names: Vec::new(),
        }
    }

    /// Add a role name. Names already held are ignored.
    pub fn with_role(mut self, name: impl Into<RoleName>) -> Self {
        let name = name.into();
        if !self.role_names.contains(&name) {
            self.role_names.push(name);
        }
        self
    }

    /// Add several role names, skipping duplicates
    pub fn with_roles<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RoleName>,
    {
        names.into_iter().fold(self, |principal, name| principal.with_role(name))
    }

    pub fn role_names(&self) -> &[RoleName] {
        &self.role_names
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.role_names.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new("user:alice", "sid-alice")
            .with_role("editor")
            .with_role("viewer");

        assert_eq!(principal.id, "user:alice");
        assert_eq!(principal.sid, "sid-alice");
        assert_eq!(principal.role_names(), ["editor", "viewer"]);
        assert!(principal.has_role("viewer"));
        assert!(!principal.has_role("admin"));
    }

    #[test]
    fn test_role_names_are_distinct() {
        let principal = Principal::new("user:bob", "sid-bob")
            .with_roles(["editor", "viewer", "editor"])
            .with_role("viewer");

        assert_eq!(principal.role_names(), ["editor", "viewer"]);
    }

    #[test]
    fn test_principal_without_roles_deserializes() {
        let principal: Principal =
            serde_json::from_str(r#"{"id":"user:carol","sid":"sid-carol"}"#).unwrap();
        assert!(principal.role_names().is_empty());
    }
}
