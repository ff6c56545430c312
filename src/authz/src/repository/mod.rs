//! Collaborator contracts consumed by the access control strategy
//!
//! Both repositories are synchronous. Implementations backed by a durable store may
//! block; timeouts and retries are theirs to decide.

pub mod memory;

pub use memory::{InMemoryResourceRepository, InMemoryRoleRepository};

use crate::error::Result;
use crate::resource::SecureResource;
use crate::role::Role;
use crate::types::RoleName;
use std::sync::Arc;

/// Role storage
pub trait RoleRepository: Send + Sync {
    /// Resolve every named role, in the order requested.
    ///
    /// All-or-nothing: if any name cannot be resolved the call fails with
    /// `LookupFailure` and returns no roles.
    fn find_roles(&self, names: &[RoleName]) -> Result<Vec<Role>>;

    /// The role with the given name, or `None` if it does not exist
    fn find_role(&self, name: &str) -> Result<Option<Role>>;

    /// Every stored role, ordered by name
    fn find_all(&self) -> Result<Vec<Role>>;

    /// Store a new role. Fails with `DuplicateEntry` if the name is taken.
    fn create_role(&self, role: Role) -> Result<()>;

    /// Replace an existing role. Fails with `NotFound` if the name is unknown.
    fn update_role(&self, role: Role) -> Result<()>;

    /// Remove a role. Fails with `NotFound` if the name is unknown.
    fn delete_role(&self, name: &str) -> Result<()>;
}

/// Secure resource storage keyed by native id
pub trait SecureResourceRepository: Send + Sync {
    /// The resource for `native_id`. Fails with `LookupFailure` if it cannot be resolved.
    fn find_resource(&self, native_id: &str) -> Result<Arc<dyn SecureResource>>;

    /// Store a new resource. Fails with `DuplicateEntry` if the id is taken.
    fn create_resource(&self, resource: Arc<dyn SecureResource>) -> Result<()>;

    /// Replace an existing resource. Fails with `NotFound` if the id is unknown.
    fn update_resource(&self, resource: Arc<dyn SecureResource>) -> Result<()>;

    /// Remove a resource. Fails with `NotFound` if the id is unknown.
    fn delete_resource(&self, native_id: &str) -> Result<()>;
}
