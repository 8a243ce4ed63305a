//! Utility Module
//!
//! - [`interner`]: joint path interning into [`JointId`]
//! - [`time`]: frame timer for driving the animation clock
//!
//! # Joint Ids
//!
//! ```rust,ignore
//! use skelanim::utils::JointId;
//!
//! let a = JointId::new("Armature/Hips/Spine");
//! let b = JointId::new("Armature/Hips/Spine");
//! assert_eq!(a, b); // O(1) comparison
//! ```

pub mod interner;
pub mod time;

pub use interner::JointId;
pub use time::FrameTimer;
