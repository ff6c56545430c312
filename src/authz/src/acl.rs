//! Access control lists
//!
//! An [`Acl`] maps each sid to exactly one [`Ace`]. Entries live in a [`DashMap`], so
//! an ACL shared behind an `Arc` can be mutated from many threads without losing
//! writes, and the duplicate check on insert is atomic with the insert itself.

use crate::error::{AuthzError, EntryKind, Result};
use crate::permission::PermissionMask;
use crate::resource::SecureResource;
use crate::types::Sid;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Access control entry granting one sid a set of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ace {
    sid: Sid,
    permission_mask: PermissionMask,
}

impl Ace {
    /// Create an entry. The reserved sign bit of `mask` is cleared.
    pub fn new(sid: impl Into<Sid>, mask: PermissionMask) -> Self {
        Self {
            sid: sid.into(),
            permission_mask: mask.sanitized(),
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn permission_mask(&self) -> PermissionMask {
        self.permission_mask
    }

    pub fn has_permission(&self, permission: PermissionMask) -> bool {
        self.permission_mask.contains(permission)
    }

    /// Single-bit permissions granted by this entry, lowest bit first
    pub fn permissions(&self) -> Vec<PermissionMask> {
        self.permission_mask.decompose()
    }
}

/// Access control list keyed by sid
#[derive(Debug, Clone, Default)]
pub struct Acl {
    entries: DashMap<Sid, Ace>,
}

impl Acl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ACL from entries, failing on the first repeated sid
    pub fn from_aces(aces: impl IntoIterator<Item = Ace>) -> Result<Self> {
        let acl = Self::new();
        for ace in aces {
            acl.add_ace(ace)?;
        }
        Ok(acl)
    }

    /// Snapshot of all entries in arbitrary order
    pub fn aces(&self) -> Vec<Ace> {
        self.entries.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Add an entry. Fails with `DuplicateEntry` if the sid already has one.
    pub fn add_ace(&self, ace: Ace) -> Result<()> {
        match self.entries.entry(ace.sid.clone()) {
            Entry::Occupied(_) => Err(AuthzError::duplicate(EntryKind::Ace, ace.sid)),
            Entry::Vacant(slot) => {
                slot.insert(ace);
                Ok(())
            }
        }
    }

    /// Remove the entry for `ace.sid`. The mask is not compared.
    pub fn remove_ace(&self, ace: &Ace) -> Result<()> {
        self.entries
            .remove(ace.sid())
            .map(|_| ())
            .ok_or_else(|| AuthzError::not_found(EntryKind::Ace, ace.sid()))
    }

    /// Entry for `sid`, if any
    pub fn ace_for_sid(&self, sid: &str) -> Option<Ace> {
        self.entries.get(sid).map(|entry| entry.value().clone())
    }

    /// True if `sid` has an entry whose mask contains `permission`
    pub fn has_permission(&self, sid: &str, permission: PermissionMask) -> bool {
        self.entries
            .get(sid)
            .map(|entry| entry.has_permission(permission))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checks `resource`'s own ACL for a grant of `permission` to `sid`.
///
/// Returns `Ok(false)` when no entry exists for the sid. Fails only when the resource
/// cannot produce its ACL.
pub fn has_permission(
    sid: &str,
    permission: PermissionMask,
    resource: &dyn SecureResource,
) -> Result<bool> {
    let acl = resource.acl()?;
    Ok(acl.has_permission(sid, permission))
}
