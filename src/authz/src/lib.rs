//! # Warden Authorization Core
//!
//! In-process authorization combining role-based access control (RBAC) with
//! resource-level access control lists (ACL).
//!
//! ## Features
//!
//! - **Permission bitmasks** with 31 usable capability bits
//! - **Roles** with an administrator flag and optional full admin bypass
//! - **Concurrent ACLs** holding one entry per security identifier
//! - **Owner bypass** for a resource's recorded owner
//! - **ACL inheritance** up a resource tree, bounded against malformed parent chains
//! - **In-memory repositories** for roles and resources
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warden_authz::{
//!     AccessControlStrategy, AccessController, Ace, Acl, InMemoryResourceRepository,
//!     InMemoryRoleRepository, PermissionMask, Principal, Resource, Role, RoleRepository,
//! };
//!
//! let roles = Arc::new(InMemoryRoleRepository::new());
//! roles.create_role(Role::new("editor", PermissionMask::READ | PermissionMask::UPDATE))?;
//!
//! let strategy = AccessController::new(
//!     Arc::new(InMemoryResourceRepository::new()),
//!     roles,
//!     false,
//! );
//!
//! let alice = Principal::new("user:alice", "sid-alice").with_role("editor");
//! strategy.verify_role_access(&alice, PermissionMask::UPDATE)?;
//!
//! let doc = Resource::new("document:42")
//!     .with_acl(Acl::from_aces([Ace::new("sid-alice", PermissionMask::READ)])?);
//! strategy.verify_resource_access(&alice, PermissionMask::READ, &doc)?;
//! assert!(strategy
//!     .verify_resource_access(&alice, PermissionMask::DELETE, &doc)
//!     .is_err());
//! # Ok::<(), warden_authz::AuthzError>(())
//! ```

pub mod acl;
pub mod error;
pub mod permission;
pub mod repository;
pub mod resource;
pub mod role;
pub mod strategy;
pub mod types;

// Re-export commonly used types
pub use acl::{has_permission, Ace, Acl};
pub use error::{AuthzError, DeniedTarget, EntryKind, ErrorKind, Result};
pub use permission::PermissionMask;
pub use repository::{
    InMemoryResourceRepository, InMemoryRoleRepository, RoleRepository, SecureResourceRepository,
};
pub use resource::{Resource, SecureResource};
pub use role::Role;
pub use strategy::{AccessControlStrategy, AccessController, StrategyConfig};
pub use types::{Principal, RoleName, Sid};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
