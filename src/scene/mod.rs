//! Skeleton collaborator surface
//!
//! The animator does not own scenes or models. It drives joint rotations
//! through the [`SkeletonRig`] trait:
//! - JointTransform: per-joint translation, rotation, scale
//! - SkeletonRig: joint lookup by path and transform read/write
//! - Skeleton: in-memory rig used by tools, demos and tests

pub mod skeleton;
pub mod transform;

pub use skeleton::{Joint, RigStatus, Skeleton, SkeletonRig};
pub use transform::JointTransform;

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a live skeleton instance owned by the scene.
    pub struct SkeletonKey;
}
