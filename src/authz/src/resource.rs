//! Secure resources
//!
//! A secure resource owns an ACL restricting access to itself. Resources form a tree
//! through parent references; a resource that inherits its parent's ACL lets the
//! access control strategy continue the ACL check at the parent.
//!
//! A parent is named by its native id and may also be attached directly. The
//! strategy resolves a named parent through the resource repository first, so an
//! ancestor replaced in the repository is seen in its current form.

use crate::acl::Acl;
use crate::error::Result;
use crate::types::Sid;
use std::sync::{Arc, Weak};

/// A resource protected by an access control list
pub trait SecureResource: Send + Sync {
    /// Native (external) id of the resource
    fn native_id(&self) -> &str;

    /// The resource's ACL. Fails with `LookupFailure` if it cannot be retrieved.
    fn acl(&self) -> Result<&Acl>;

    /// Sid of the owner, or an empty string when the resource has no owner
    fn owner_sid(&self) -> &str;

    /// Native id of the parent resource, if the parent can be resolved by id
    fn parent_id(&self) -> Option<&str> {
        None
    }

    /// Parent resource, if any is attached and still alive
    fn parent(&self) -> Option<Arc<dyn SecureResource>>;

    /// Whether ACL checks continue at the parent when this ACL grants nothing
    fn inherits_parent_acl(&self) -> bool;
}

/// In-process secure resource value
///
/// The parent is recorded by native id and held weakly; whoever stores the tree
/// (typically a resource repository) keeps ancestors alive.
#[derive(Debug, Default)]
pub struct Resource {
    native_id: String,
    acl: Acl,
    owner_sid: Sid,
    parent_id: Option<String>,
    parent: Option<Weak<dyn SecureResource>>,
    inherits_parent_acl: bool,
}

impl Resource {
    /// Create a resource with an empty ACL, no owner and no parent
    pub fn new(native_id: impl Into<String>) -> Self {
        Self {
            native_id: native_id.into(),
            ..Self::default()
        }
    }

    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = acl;
        self
    }

    pub fn with_owner(mut self, owner_sid: impl Into<Sid>) -> Self {
        self.owner_sid = owner_sid.into();
        self
    }

    pub fn with_parent(mut self, parent: &Arc<dyn SecureResource>) -> Self {
        self.parent_id = Some(parent.native_id().to_string());
        self.parent = Some(Arc::downgrade(parent));
        self
    }

    pub fn inherit_parent_acl(mut self, inherits: bool) -> Self {
        self.inherits_parent_acl = inherits;
        self
    }
}

impl SecureResource for Resource {
    fn native_id(&self) -> &str {
        &self.native_id
    }

    fn acl(&self) -> Result<&Acl> {
        Ok(&self.acl)
    }

    fn owner_sid(&self) -> &str {
        &self.owner_sid
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn parent(&self) -> Option<Arc<dyn SecureResource>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    fn inherits_parent_acl(&self) -> bool {
        self.inherits_parent_acl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acl::Ace;
    use crate::permission::PermissionMask;

    #[test]
    fn test_resource_defaults() {
        let resource = Resource::new("doc-1");

        assert_eq!(resource.native_id(), "doc-1");
        assert_eq!(resource.owner_sid(), "");
        assert!(resource.parent().is_none());
        assert_eq!(resource.parent_id(), None);
        assert!(!resource.inherits_parent_acl());
        assert!(resource.acl().unwrap().is_empty());
    }

    #[test]
    fn test_resource_builder() {
        let parent: Arc<dyn SecureResource> = Arc::new(Resource::new("folder"));
        let acl = Acl::from_aces([Ace::new("sid", PermissionMask::READ)]).unwrap();

        let resource = Resource::new("doc-1")
            .with_acl(acl)
            .with_owner("sid-owner")
            .with_parent(&parent)
            .inherit_parent_acl(true);

        assert_eq!(resource.owner_sid(), "sid-owner");
        assert_eq!(resource.parent_id(), Some("folder"));
        assert!(resource.inherits_parent_acl());
        assert_eq!(resource.parent().map(|p| p.native_id().to_string()), Some("folder".to_string()));
        assert_eq!(resource.acl().unwrap().len(), 1);
    }

    #[test]
    fn test_dropped_parent_is_absent() {
        let parent: Arc<dyn SecureResource> = Arc::new(Resource::new("folder"));
        let resource = Resource::new("doc-1").with_parent(&parent);

        drop(parent);

        assert!(resource.parent().is_none());
        assert_eq!(resource.parent_id(), Some("folder"));
    }
}
