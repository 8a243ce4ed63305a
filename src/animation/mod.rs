//! Keyframe animation
//!
//! Leaves first:
//! - [`binder`]: joint registry, resolves joint paths against a live skeleton
//! - [`pose`] / [`timeline`]: authored keyframes and the one-shot bootstrap pose
//! - [`easing`]: progress reshaping curves
//! - [`resolver`]: time to bracketing keyframe pair
//! - [`animator`]: per-tick slerp and write-back
//! - [`system`]: the driver feeding deltas and retrying bootstrap

pub mod animator;
pub mod binder;
pub mod binding;
pub mod clock;
pub mod easing;
pub mod interpolate;
pub mod pose;
pub mod resolver;
pub mod system;
pub mod timeline;

pub use animator::{Animator, AnimatorPhase, TickStats};
pub use binder::{Binder, BoundRig};
pub use binding::{JointBinding, JointIndexBinding};
pub use clock::AnimationClock;
pub use easing::Easing;
pub use interpolate::slerp_rotation;
pub use pose::{Keyframe, Pose};
pub use resolver::{KeyframeCursor, Segment, resolve, resolve_with_cursor};
pub use system::{AnimationHandle, AnimationSystem};
pub use timeline::{Timeline, wrap_time};
