//! Joint path interner
//!
//! Joint paths such as `"Armature/Hips/Spine/Chest/Shoulder.L"` are authoring
//! details. The animator only ever compares them for equality, so every path is
//! interned once into a compact [`JointId`] that hashes and compares in O(1).

use std::fmt;
use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

/// Process-wide interner shared by every skeleton and timeline.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Interned, opaque identifier of one joint path.
///
/// The path string is never parsed; two ids are equal exactly when their
/// paths are byte-for-byte equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(Spur);

impl JointId {
    /// Interns `path`, returning the existing id if it was seen before.
    #[inline]
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self(INTERNER.get_or_intern(path))
    }

    /// Looks up an already interned path without allocating.
    #[inline]
    #[must_use]
    pub fn get(path: &str) -> Option<Self> {
        INTERNER.get(path).map(Self)
    }

    /// Resolves the id back to its path.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        INTERNER.resolve(&self.0)
    }
}

impl From<&str> for JointId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Debug for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JointId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
