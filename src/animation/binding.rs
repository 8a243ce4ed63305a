use smallvec::SmallVec;

use crate::utils::JointId;

/// A required joint resolved against one live skeleton instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointBinding {
    pub joint: JointId,
    /// Index valid only for the skeleton the binding was built against
    pub index: usize,
}

/// Joints the animator drives, resolved to skeleton indices.
///
/// Rebuilt whenever a new skeleton instance attaches, discarded on detach,
/// never carried over to another instance. Order follows the required joint
/// list, minus joints the skeleton does not have.
#[derive(Debug, Clone, Default)]
pub struct JointIndexBinding {
    entries: SmallVec<[JointBinding; 16]>,
}

impl JointIndexBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding unless `joint` is already bound.
    pub fn push(&mut self, joint: JointId, index: usize) -> bool {
        if self.index_of(joint).is_some() {
            return false;
        }
        self.entries.push(JointBinding { joint, index });
        true
    }

    #[must_use]
    pub fn index_of(&self, joint: JointId) -> Option<usize> {
        self.entries
            .iter()
            .find(|b| b.joint == joint)
            .map(|b| b.index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JointBinding> {
        self.entries.iter()
    }
}
