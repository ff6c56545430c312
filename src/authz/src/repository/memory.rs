//! Map-backed repositories
//!
//! Roles sit behind a single `RwLock` so a multi-name lookup sees one consistent
//! snapshot. Resources are independent of each other and use a `DashMap`.

use super::{RoleRepository, SecureResourceRepository};
use crate::error::{AuthzError, EntryKind, Result};
use crate::resource::SecureResource;
use crate::role::Role;
use crate::types::RoleName;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::hash_map;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory role repository
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleName, Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from roles, failing on the first repeated name
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Result<Self> {
        let repository = Self::new();
        for role in roles {
            repository.create_role(role)?;
        }
        Ok(repository)
    }

    pub fn len(&self) -> usize {
        self.roles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.read().is_empty()
    }
}

impl RoleRepository for InMemoryRoleRepository {
    fn find_roles(&self, names: &[RoleName]) -> Result<Vec<Role>> {
        let roles = self.roles.read();
        names
            .iter()
            .map(|name| {
                roles
                    .get(name)
                    .cloned()
                    .ok_or_else(|| AuthzError::lookup(format!("role {}", name), "role does not exist"))
            })
            .collect()
    }

    fn find_role(&self, name: &str) -> Result<Option<Role>> {
        Ok(self.roles.read().get(name).cloned())
    }

    fn find_all(&self) -> Result<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.read().values().cloned().collect();
        roles.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(roles)
    }

    fn create_role(&self, role: Role) -> Result<()> {
        match self.roles.write().entry(role.name().to_string()) {
            hash_map::Entry::Occupied(slot) => {
                Err(AuthzError::duplicate(EntryKind::Role, slot.key().clone()))
            }
            hash_map::Entry::Vacant(slot) => {
                debug!(role = %role.name(), admin = role.is_admin(), "Role created");
                slot.insert(role);
                Ok(())
            }
        }
    }

    fn update_role(&self, role: Role) -> Result<()> {
        let mut roles = self.roles.write();
        match roles.get_mut(role.name()) {
            Some(existing) => {
                debug!(role = %role.name(), "Role updated");
                *existing = role;
                Ok(())
            }
            None => Err(AuthzError::not_found(EntryKind::Role, role.name())),
        }
    }

    fn delete_role(&self, name: &str) -> Result<()> {
        self.roles
            .write()
            .remove(name)
            .map(|_| debug!(role = %name, "Role deleted"))
            .ok_or_else(|| AuthzError::not_found(EntryKind::Role, name))
    }
}

/// In-memory secure resource repository
#[derive(Default)]
pub struct InMemoryResourceRepository {
    resources: DashMap<String, Arc<dyn SecureResource>>,
}

impl InMemoryResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl SecureResourceRepository for InMemoryResourceRepository {
    fn find_resource(&self, native_id: &str) -> Result<Arc<dyn SecureResource>> {
        self.resources
            .get(native_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                AuthzError::lookup(format!("resource {}", native_id), "resource does not exist")
            })
    }

    fn create_resource(&self, resource: Arc<dyn SecureResource>) -> Result<()> {
        match self.resources.entry(resource.native_id().to_string()) {
            Entry::Occupied(slot) => Err(AuthzError::duplicate(EntryKind::Resource, slot.key().clone())),
            Entry::Vacant(slot) => {
                debug!(resource = %resource.native_id(), "Resource created");
                slot.insert(resource);
                Ok(())
            }
        }
    }

    fn update_resource(&self, resource: Arc<dyn SecureResource>) -> Result<()> {
        match self.resources.get_mut(resource.native_id()) {
            Some(mut existing) => {
                debug!(resource = %resource.native_id(), "Resource updated");
                *existing = resource;
                Ok(())
            }
            None => Err(AuthzError::not_found(EntryKind::Resource, resource.native_id())),
        }
    }

    fn delete_resource(&self, native_id: &str) -> Result<()> {
        self.resources
            .remove(native_id)
            .map(|_| debug!(resource = %native_id, "Resource deleted"))
            .ok_or_else(|| AuthzError::not_found(EntryKind::Resource, native_id))
    }
}
