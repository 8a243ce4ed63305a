use glam::Quat;
use rustc_hash::FxHashMap;

use crate::utils::JointId;

/// Partial mapping from joints to target rotations.
///
/// Joints absent from a pose are not driven by it. Rotations are stored
/// exactly as given and normalized when interpolated, so a captured live
/// rotation round-trips bit-for-bit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    rotations: FxHashMap<JointId, Quat>,
}

impl Pose {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert keyed by joint path.
    #[must_use]
    pub fn with(mut self, path: &str, rotation: Quat) -> Self {
        self.insert(JointId::new(path), rotation);
        self
    }

    /// Sets (or replaces) the rotation of `joint`.
    pub fn insert(&mut self, joint: JointId, rotation: Quat) -> Option<Quat> {
        self.rotations.insert(joint, rotation)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, joint: JointId) -> Option<Quat> {
        self.rotations.get(&joint).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, joint: JointId) -> bool {
        self.rotations.contains_key(&joint)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointId, Quat)> + '_ {
        self.rotations.iter().map(|(&id, &q)| (id, q))
    }
}

impl FromIterator<(JointId, Quat)> for Pose {
    fn from_iter<I: IntoIterator<Item = (JointId, Quat)>>(iter: I) -> Self {
        let mut pose = Pose::new();
        for (joint, rotation) in iter {
            pose.insert(joint, rotation);
        }
        pose
    }
}

/// Authored `(time, partial pose)` sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Seconds from the start of the loop. Never negative.
    pub time: f32,
    pub pose: Pose,
}

impl Keyframe {
    /// Negative or non-finite times are clamped to 0.
    #[must_use]
    pub fn new(time: f32, pose: Pose) -> Self {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        Self { time, pose }
    }
}
