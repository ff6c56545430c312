//! Role model

use crate::permission::PermissionMask;
use crate::types::RoleName;
use serde::{Deserialize, Serialize};

/// A named set of permissions granting a principal access to system capabilities.
///
/// Administrator roles are ordinary roles with `is_admin` set. The flag does not
/// widen [`Role::has_permission`]; full access for administrators is granted by the
/// access control strategy when it is configured to allow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: RoleName,
    permission_mask: PermissionMask,
    #[serde(default)]
    is_admin: bool,
}

impl Role {
    /// Create a standard role. The reserved sign bit of `mask` is cleared.
    pub fn new(name: impl Into<RoleName>, mask: PermissionMask) -> Self {
        Self {
            name: name.into(),
            permission_mask: mask.sanitized(),
            is_admin: false,
        }
    }

    /// Create an administrator role
    pub fn admin(name: impl Into<RoleName>, mask: PermissionMask) -> Self {
        Self {
            is_admin: true,
            ..Self::new(name, mask)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permission_mask(&self) -> PermissionMask {
        self.permission_mask
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns true if the role's mask contains `permission`
    pub fn has_permission(&self, permission: PermissionMask) -> bool {
        self.permission_mask.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_authorization() {
        let role = Role::new("role", PermissionMask::CREATE);

        assert!(!role.has_permission(PermissionMask::UPDATE));
        assert!(role.has_permission(PermissionMask::CREATE));
        assert!(!role.is_admin());
    }

    #[test]
    fn test_admin_role_mask_is_not_widened() {
        let role = Role::admin("root", PermissionMask::EMPTY);

        assert!(role.is_admin());
        assert!(!role.has_permission(PermissionMask::CREATE));
    }

    #[test]
    fn test_sign_bit_cleared() {
        let role = Role::new("all", PermissionMask::new(-1));
        assert_eq!(role.permission_mask(), PermissionMask::ALL);
        assert!(!role.has_permission(PermissionMask::new(i32::MIN)));
    }

    #[test]
    fn test_role_serialization() {
        let role = Role::new("editor", PermissionMask::READ | PermissionMask::UPDATE);
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, r#"{"name":"editor","permission_mask":6,"is_admin":false}"#);

        let parsed: Role = serde_json::from_str(r#"{"name":"viewer","permission_mask":2}"#).unwrap();
        assert_eq!(parsed, Role::new("viewer", PermissionMask::READ));
    }
}
