//! Error types for the authorization engine

use crate::permission::PermissionMask;
use std::fmt;
use thiserror::Error;

/// Kind of entry targeted by a mutation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Access control entry within an ACL
    Ace,
    /// Role held by a role repository
    Role,
    /// Secure resource held by a resource repository
    Resource,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ace => write!(f, "ACE"),
            Self::Role => write!(f, "role"),
            Self::Resource => write!(f, "resource"),
        }
    }
}

/// What a denied principal was asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeniedTarget {
    /// A system capability checked against the principal's roles
    Permission(PermissionMask),
    /// Native id of the last resource examined during an ACL check
    Resource(String),
}

impl fmt::Display for DeniedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permission(permission) => write!(f, "{} access", permission),
            Self::Resource(native_id) => write!(f, "access to the resource {}", native_id),
        }
    }
}

/// Authorization engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// A collaborator could not resolve a role, resource or ACL
    #[error("Lookup failed for {subject}: {reason}")]
    LookupFailure { subject: String, reason: String },

    /// The principal holds no grant for the request
    #[error("Principal {principal_id} does not have {target}")]
    AccessDenied {
        principal_id: String,
        target: DeniedTarget,
    },

    /// An entry with the same key already exists
    #[error("The {kind} {key} already exists")]
    DuplicateEntry { kind: EntryKind, key: String },

    /// A mutation targeted an entry that does not exist
    #[error("The {kind} {key} does not exist")]
    NotFound { kind: EntryKind, key: String },
}

/// Error discriminant for callers that only need to branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LookupFailure,
    AccessDenied,
    DuplicateEntry,
    NotFound,
}

impl AuthzError {
    pub fn lookup(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LookupFailure {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub fn permission_denied(principal_id: impl Into<String>, permission: PermissionMask) -> Self {
        Self::AccessDenied {
            principal_id: principal_id.into(),
            target: DeniedTarget::Permission(permission),
        }
    }

    pub fn resource_denied(principal_id: impl Into<String>, native_id: impl Into<String>) -> Self {
        Self::AccessDenied {
            principal_id: principal_id.into(),
            target: DeniedTarget::Resource(native_id.into()),
        }
    }

    pub fn duplicate(kind: EntryKind, key: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            kind,
            key: key.into(),
        }
    }

    pub fn not_found(kind: EntryKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Reports a collaborator error as `LookupFailure`, whatever kind the collaborator chose
    pub fn into_lookup(self, subject: impl Into<String>) -> Self {
        match self {
            Self::LookupFailure { .. } => self,
            other => Self::lookup(subject, other.to_string()),
        }
    }

    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LookupFailure { .. } => ErrorKind::LookupFailure,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// True when the principal was denied rather than the check failing
    pub fn is_access_denied(&self) -> bool {
        self.kind() == ErrorKind::AccessDenied
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
