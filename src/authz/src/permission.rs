//! Permission bitmask model
//!
//! A [`PermissionMask`] is a 32-bit signed set of capability bits. Bits 0..=30 carry
//! capabilities; the sign bit is reserved. Roles and ACEs clear it on construction,
//! and a negative probe never matches any mask.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of capabilities encoded as bit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMask(i32);

impl PermissionMask {
    /// Number of usable capability bits (the sign bit is excluded)
    pub const WIDTH: u32 = i32::BITS - 1;

    /// No capabilities
    pub const EMPTY: Self = Self(0);

    /// Every usable capability
    pub const ALL: Self = Self(i32::MAX);

    pub const CREATE: Self = Self(1);
    pub const READ: Self = Self(1 << 1);
    pub const UPDATE: Self = Self(1 << 2);
    pub const DELETE: Self = Self(1 << 3);

    /// Wraps raw bits as-is. Probes built from negative values are allowed and never match.
    pub const fn new(bits: i32) -> Self {
        Self(bits)
    }

    /// Single-bit permission at position `n`, or `None` at or beyond the sign bit
    pub const fn bit(n: u32) -> Option<Self> {
        if n < Self::WIDTH {
            Some(Self(1 << n))
        } else {
            None
        }
    }

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Copy of this mask with the reserved sign bit cleared
    pub const fn sanitized(self) -> Self {
        Self(self.0 & i32::MAX)
    }

    /// Bitwise union of two masks
    pub const fn combine(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if any bit of `permission` is present in this mask.
    ///
    /// Negative or empty probes always return false.
    pub const fn contains(self, permission: Self) -> bool {
        permission.0 > 0 && self.0 & permission.0 != 0
    }

    /// Splits the mask into single-bit permissions, lowest bit first
    pub fn decompose(self) -> Vec<Self> {
        (0..Self::WIDTH)
            .filter(|n| self.0 & (1 << n) != 0)
            .map(|n| Self(1 << n))
            .collect()
    }
}

impl BitOr for PermissionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

impl BitOrAssign for PermissionMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl From<i32> for PermissionMask {
    fn from(bits: i32) -> Self {
        Self::new(bits)
    }
}

impl fmt::Display for PermissionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
