use glam::Affine3A;
use rustc_hash::FxHashMap;

use crate::scene::transform::JointTransform;
use crate::utils::JointId;

/// Load state of a live skeleton instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigStatus {
    /// The asset is still being wired up; joints may be missing or stale.
    Loading,
    /// Joints can be resolved and their transforms read and written.
    Ready,
    /// The asset failed to load and never will.
    Failed(String),
}

/// The live skeleton surface the animator drives.
///
/// Implemented by whatever owns the joint transforms (a scene graph, an
/// imported model, the in-memory [`Skeleton`] below). The animator only ever
/// resolves joints by [`JointId`] and reads/writes their local transforms.
pub trait SkeletonRig {
    /// Current load state. Bootstrap is retried while this is `Loading`.
    fn status(&self) -> RigStatus;

    /// Resolves a joint path to an index valid for this instance only.
    fn resolve_joint_index(&self, joint: JointId) -> Option<usize>;

    /// Reads the joint's local transform. `None` for an out-of-range index.
    fn joint_transform(&self, index: usize) -> Option<JointTransform>;

    /// Writes the joint's local transform. Out-of-range indices are ignored.
    fn set_joint_transform(&mut self, index: usize, transform: JointTransform);
}

/// One joint of an in-memory [`Skeleton`].
#[derive(Debug, Clone)]
pub struct Joint {
    pub id: JointId,
    /// Parent joint index. Parents always precede their children.
    pub parent: Option<usize>,
    pub transform: JointTransform,
}

/// Simple in-memory skeleton: an ordered joint list plus a path lookup.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,
    joints: Vec<Joint>,
    lookup: FxHashMap<JointId, usize>,
    status: RigStatus,
}

impl Skeleton {
    /// Creates an empty skeleton that is immediately [`RigStatus::Ready`].
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            joints: Vec::new(),
            lookup: FxHashMap::default(),
            status: RigStatus::Ready,
        }
    }

    /// Creates an empty skeleton still in [`RigStatus::Loading`].
    #[must_use]
    pub fn loading(name: &str) -> Self {
        Self {
            status: RigStatus::Loading,
            ..Self::new(name)
        }
    }

    /// Appends a joint and returns its index.
    ///
    /// A `parent` that does not refer to an earlier joint is dropped (the joint
    /// becomes a root) so the parents-before-children order always holds.
    /// Re-adding an existing path re-points the lookup at the new joint.
    pub fn add_joint(
        &mut self,
        path: &str,
        parent: Option<usize>,
        transform: JointTransform,
    ) -> usize {
        let index = self.joints.len();
        let parent = parent.filter(|&p| {
            let valid = p < index;
            if !valid {
                log::warn!("Joint '{path}' has invalid parent index {p}, attaching as root");
            }
            valid
        });
        let id = JointId::new(path);
        self.joints.push(Joint {
            id,
            parent,
            transform,
        });
        self.lookup.insert(id, index);
        index
    }

    pub fn set_status(&mut self, status: RigStatus) {
        self.status = status;
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// Looks up a joint by path string.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<usize> {
        JointId::get(path).and_then(|id| self.lookup.get(&id).copied())
    }

    /// Computes model-space matrices for every joint in a single forward pass.
    #[must_use]
    pub fn compute_world_matrices(&self) -> Vec<Affine3A> {
        let mut world: Vec<Affine3A> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let local = joint.transform.local_matrix();
            let matrix = match joint.parent {
                Some(p) => world[p] * local,
                None => local,
            };
            world.push(matrix);
        }
        world
    }
}

impl SkeletonRig for Skeleton {
    fn status(&self) -> RigStatus {
        self.status.clone()
    }

    fn resolve_joint_index(&self, joint: JointId) -> Option<usize> {
        self.lookup.get(&joint).copied()
    }

    fn joint_transform(&self, index: usize) -> Option<JointTransform> {
        self.joints.get(index).map(|j| j.transform)
    }

    fn set_joint_transform(&mut self, index: usize, transform: JointTransform) {
        if let Some(joint) = self.joints.get_mut(index) {
            joint.transform = transform;
        }
    }
}
