//! Access control strategy
//!
//! Combines role checks and resource ACL checks into allow/deny decisions.
//!
//! # Resource check pipeline
//!
//! ```text
//! Start → OwnerCheck ──► Granted
//!             ↓
//!         AdminCheck ──► Granted
//!             ↓
//!         ACLCheck(resource) ──► Granted | Failed
//!             ↓
//!         Climb → ACLCheck(parent) ... → Denied
//! ```
//!
//! Owner and administrator bypass are evaluated once, against the resource passed
//! in. Ancestors reached through ACL inheritance only have their ACLs consulted.

pub mod config;

pub use config::{StrategyConfig, DEFAULT_MAX_INHERITANCE_DEPTH};

use crate::acl::has_permission;
use crate::error::{AuthzError, Result};
use crate::permission::PermissionMask;
use crate::repository::{RoleRepository, SecureResourceRepository};
use crate::resource::SecureResource;
use crate::types::Principal;

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Entry point for RBAC and ACL checks
///
/// Every method returns `Ok(())` when access is granted, `AccessDenied` when it is
/// not, and `LookupFailure` when a collaborator could not answer.
pub trait AccessControlStrategy: Send + Sync {
    /// Check that one of the principal's roles grants `permission`
    fn verify_role_access(&self, principal: &Principal, permission: PermissionMask) -> Result<()>;

    /// Check that the principal may access `resource` in the mode given by `permission`
    fn verify_resource_access(
        &self,
        principal: &Principal,
        permission: PermissionMask,
        resource: &dyn SecureResource,
    ) -> Result<()>;

    /// Load the resource for `resource_id` and check access to it
    fn verify_resource_access_by_id(
        &self,
        principal: &Principal,
        permission: PermissionMask,
        resource_id: &str,
    ) -> Result<()>;
}

/// Default access control strategy
///
/// Holds no per-call state, so one instance can be shared across threads as long
/// as its repositories tolerate concurrent reads.
#[derive(Clone)]
pub struct AccessController {
    resource_repository: Arc<dyn SecureResourceRepository>,
    role_repository: Arc<dyn RoleRepository>,
    config: StrategyConfig,
}

impl AccessController {
    /// Create a strategy. If `allow_full_admin_access` is true, all checks are
    /// bypassed for principals holding an administrator role.
    pub fn new(
        resource_repository: Arc<dyn SecureResourceRepository>,
        role_repository: Arc<dyn RoleRepository>,
        allow_full_admin_access: bool,
    ) -> Self {
        Self::with_config(
            resource_repository,
            role_repository,
            StrategyConfig::default().with_admin_access(allow_full_admin_access),
        )
    }

    pub fn with_config(
        resource_repository: Arc<dyn SecureResourceRepository>,
        role_repository: Arc<dyn RoleRepository>,
        config: StrategyConfig,
    ) -> Self {
        Self {
            resource_repository,
            role_repository,
            config,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Admin probe for resource checks. A failed role lookup counts as "not admin".
    fn is_admin(&self, principal: &Principal) -> bool {
        match self.role_repository.find_roles(principal.role_names()) {
            Ok(roles) => roles.iter().any(|role| role.is_admin()),
            Err(e) => {
                warn!(
                    principal = %principal.id,
                    error = %e,
                    "Role lookup failed during admin check, treating principal as non-admin"
                );
                false
            }
        }
    }

    /// Walks inherited ACLs above `resource`. Returns the native id of the last
    /// resource examined when nothing grants access.
    ///
    /// Ancestors are told apart by allocation, so distinct resources sharing a
    /// native id are both examined. Every ancestor stays alive until the climb
    /// ends, which keeps addresses in `visited` from being reused.
    fn climb_inherited_acls(
        &self,
        principal: &Principal,
        permission: PermissionMask,
        resource: &dyn SecureResource,
    ) -> Result<Option<String>> {
        let mut last_examined = resource.native_id().to_string();
        let mut visited = HashSet::from([address_of(resource)]);
        let mut climbed: Vec<Arc<dyn SecureResource>> = Vec::new();
        let mut next = self.next_inherited(resource)?;
        let mut depth = 0;

        while let Some(ancestor) = next {
            if depth >= self.config.max_inheritance_depth {
                warn!(
                    resource = %resource.native_id(),
                    max_depth = self.config.max_inheritance_depth,
                    "ACL inheritance climb reached depth limit"
                );
                break;
            }
            if !visited.insert(address_of(ancestor.as_ref())) {
                warn!(
                    resource = %resource.native_id(),
                    ancestor = %ancestor.native_id(),
                    "Cycle detected in resource parent chain"
                );
                break;
            }
            depth += 1;
            last_examined = ancestor.native_id().to_string();

            trace!(ancestor = %last_examined, depth, "Checking inherited ACL");
            let granted = has_permission(&principal.sid, permission, ancestor.as_ref())
                .map_err(|e| e.into_lookup(format!("acl of {}", last_examined)))?;
            if granted {
                debug!(
                    principal = %principal.id,
                    resource = %resource.native_id(),
                    granted_by = %last_examined,
                    "Resource access granted by inherited ACL"
                );
                return Ok(None);
            }
            next = self.next_inherited(ancestor.as_ref())?;
            climbed.push(ancestor);
        }

        Ok(Some(last_examined))
    }

    /// Parent of `resource` when its ACL is inherited
    ///
    /// A parent named by id is loaded from the resource repository so the climb
    /// sees its current ACL. The attached parent is used when the repository does
    /// not hold it. A named parent found in neither place is a lookup failure.
    fn next_inherited(&self, resource: &dyn SecureResource) -> Result<Option<Arc<dyn SecureResource>>> {
        if !resource.inherits_parent_acl() {
            return Ok(None);
        }
        let Some(parent_id) = resource.parent_id() else {
            return Ok(resource.parent());
        };

        match self.resource_repository.find_resource(parent_id) {
            Ok(parent) => Ok(Some(parent)),
            Err(e) => match resource.parent() {
                Some(parent) => {
                    trace!(parent = %parent_id, error = %e, "Parent not in repository, using attached parent");
                    Ok(Some(parent))
                }
                None => {
                    debug!(resource = %resource.native_id(), parent = %parent_id, error = %e, "Parent could not be resolved");
                    Err(e.into_lookup(format!("parent {} of {}", parent_id, resource.native_id())))
                }
            },
        }
    }
}

/// Identity of a resource allocation, ignoring the vtable
fn address_of(resource: &dyn SecureResource) -> *const () {
    resource as *const _ as *const ()
}

impl AccessControlStrategy for AccessController {
    fn verify_role_access(&self, principal: &Principal, permission: PermissionMask) -> Result<()> {
        let roles = self
            .role_repository
            .find_roles(principal.role_names())
            .map_err(|e| {
                debug!(principal = %principal.id, error = %e, "Could not verify role access");
                e.into_lookup(format!("roles of {}", principal.id))
            })?;

        for role in &roles {
            if self.config.allow_full_admin_access && role.is_admin() {
                debug!(principal = %principal.id, role = %role.name(), "Role access granted to administrator");
                return Ok(());
            }
            if role.has_permission(permission) {
                debug!(principal = %principal.id, role = %role.name(), %permission, "Role access granted");
                return Ok(());
            }
        }

        debug!(principal = %principal.id, %permission, "Role access denied");
        Err(AuthzError::permission_denied(&principal.id, permission))
    }

    fn verify_resource_access(
        &self,
        principal: &Principal,
        permission: PermissionMask,
        resource: &dyn SecureResource,
    ) -> Result<()> {
        let owner_sid = resource.owner_sid();
        if !owner_sid.is_empty() && owner_sid == principal.sid {
            debug!(principal = %principal.id, resource = %resource.native_id(), "Resource access granted to owner");
            return Ok(());
        }

        if self.config.allow_full_admin_access && self.is_admin(principal) {
            debug!(principal = %principal.id, resource = %resource.native_id(), "Resource access granted to administrator");
            return Ok(());
        }

        let granted = has_permission(&principal.sid, permission, resource)
            .map_err(|e| e.into_lookup(format!("acl of {}", resource.native_id())))?;
        if granted {
            debug!(principal = %principal.id, resource = %resource.native_id(), %permission, "Resource access granted");
            return Ok(());
        }

        match self.climb_inherited_acls(principal, permission, resource)? {
            None => Ok(()),
            Some(last_examined) => {
                debug!(principal = %principal.id, resource = %last_examined, %permission, "Resource access denied");
                Err(AuthzError::resource_denied(&principal.id, last_examined))
            }
        }
    }

    fn verify_resource_access_by_id(
        &self,
        principal: &Principal,
        permission: PermissionMask,
        resource_id: &str,
    ) -> Result<()> {
        let resource = self.resource_repository.find_resource(resource_id)?;
        self.verify_resource_access(principal, permission, resource.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::{Ace, Acl};
    use crate::error::ErrorKind;
    use crate::repository::{InMemoryResourceRepository, InMemoryRoleRepository};
    use crate::resource::Resource;
    use crate::role::Role;

    fn controller(roles: Vec<Role>, allow_admin: bool) -> AccessController {
        AccessController::new(
            Arc::new(InMemoryResourceRepository::new()),
            Arc::new(InMemoryRoleRepository::with_roles(roles).unwrap()),
            allow_admin,
        )
    }

    #[test]
    fn test_verify_role_access() {
        let strategy = controller(vec![Role::new("testRole", PermissionMask::CREATE)], true);
        let principal = Principal::new("alice", "sid-alice").with_role("testRole");

        let err = strategy.verify_role_access(&principal, PermissionMask::UPDATE).unwrap_err();
        assert_eq!(err, AuthzError::permission_denied("alice", PermissionMask::UPDATE));

        assert!(strategy.verify_role_access(&principal, PermissionMask::CREATE).is_ok());
    }

    #[test]
    fn test_verify_admin_role_access() {
        let roles = vec![Role::admin("testAdminRole", PermissionMask::EMPTY)];
        let principal = Principal::new("alice", "sid-alice").with_role("testAdminRole");

        let strategy = controller(roles.clone(), true);
        assert!(strategy.verify_role_access(&principal, PermissionMask::UPDATE).is_ok());

        let strategy = controller(roles, false);
        let err = strategy.verify_role_access(&principal, PermissionMask::UPDATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }

    #[test]
    fn test_principal_without_roles_is_denied() {
        let strategy = controller(vec![Role::new("testRole", PermissionMask::ALL)], true);
        let principal = Principal::new("alice", "sid-alice");

        let err = strategy.verify_role_access(&principal, PermissionMask::READ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }

    #[test]
    fn test_unresolvable_roles_fail_lookup() {
        let strategy = controller(vec![Role::admin("admin", PermissionMask::ALL)], true);
        let principal = Principal::new("alice", "sid-alice").with_roles(["admin", "ghost"]);

        let err = strategy.verify_role_access(&principal, PermissionMask::READ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LookupFailure);
    }

    #[test]
    fn test_verify_resource_acl() {
        let strategy = controller(vec![], true);
        let principal = Principal::new("alice", "id");
        let resource = Resource::new("id")
            .with_acl(Acl::from_aces([Ace::new("id", PermissionMask::CREATE)]).unwrap());

        let err = strategy
            .verify_resource_access(&principal, PermissionMask::UPDATE, &resource)
            .unwrap_err();
        assert_eq!(err, AuthzError::resource_denied("alice", "id"));

        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::CREATE, &resource)
            .is_ok());
    }

    #[test]
    fn test_verify_inherited_resource_acl() {
        let strategy = controller(vec![], false);
        let principal = Principal::new("alice", "id");
        let parent: Arc<dyn SecureResource> = Arc::new(
            Resource::new("parentId")
                .with_acl(Acl::from_aces([Ace::new("id", PermissionMask::UPDATE)]).unwrap()),
        );
        let acl = || Acl::from_aces([Ace::new("id", PermissionMask::CREATE)]).unwrap();

        let isolated = Resource::new("id").with_acl(acl()).with_parent(&parent);
        let err = strategy
            .verify_resource_access(&principal, PermissionMask::UPDATE, &isolated)
            .unwrap_err();
        assert_eq!(err, AuthzError::resource_denied("alice", "id"));

        let inheriting = Resource::new("id")
            .with_acl(acl())
            .with_parent(&parent)
            .inherit_parent_acl(true);
        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::UPDATE, &inheriting)
            .is_ok());
        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::CREATE, &inheriting)
            .is_ok());

        let err = strategy
            .verify_resource_access(&principal, PermissionMask::DELETE, &inheriting)
            .unwrap_err();
        assert_eq!(err, AuthzError::resource_denied("alice", "parentId"));
    }

    #[test]
    fn test_distinct_ancestors_sharing_an_id_are_examined() {
        let strategy = controller(vec![], false);
        let principal = Principal::new("alice", "s");
        let grandparent: Arc<dyn SecureResource> = Arc::new(
            Resource::new("shared").with_acl(Acl::from_aces([Ace::new("s", PermissionMask::READ)]).unwrap()),
        );
        let parent: Arc<dyn SecureResource> = Arc::new(
            Resource::new("shared").with_parent(&grandparent).inherit_parent_acl(true),
        );
        let child = Resource::new("shared").with_parent(&parent).inherit_parent_acl(true);

        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::READ, &child)
            .is_ok());

        let err = strategy
            .verify_resource_access(&principal, PermissionMask::UPDATE, &child)
            .unwrap_err();
        assert_eq!(err, AuthzError::resource_denied("alice", "shared"));
    }

    #[test]
    fn test_verify_admin_resource_access() {
        let roles = vec![Role::admin("testAdminRole", PermissionMask::EMPTY)];
        let principal = Principal::new("alice", "id").with_role("testAdminRole");
        let resource = Resource::new("id");

        let strategy = controller(roles.clone(), true);
        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::CREATE, &resource)
            .is_ok());

        let strategy = controller(roles, false);
        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::CREATE, &resource)
            .is_err());
    }

    #[test]
    fn test_owner_bypass() {
        let strategy = controller(vec![], false);
        let principal = Principal::new("alice", "sid-alice");

        let owned = Resource::new("doc").with_owner("sid-alice");
        assert!(strategy
            .verify_resource_access(&principal, PermissionMask::DELETE, &owned)
            .is_ok());

        let unowned = Resource::new("doc");
        assert!(strategy
            .verify_resource_access(&Principal::new("nobody", ""), PermissionMask::READ, &unowned)
            .is_err());
    }
}
