use crate::errors::*;
use crate::math::prelude::*;

use super::manager::TransformManager;
use super::transform::Transform;
use super::TransformHandle;

/// A set of joints living in a `TransformManager`, together with the inverse bind
/// matrices that bring vertices from mesh space into the space of each joint.
///
/// A frame of skinning usually goes like this:
///
/// 1. `apply_pose` writes the sampled local pose of every joint;
/// 2. `TransformManager::update` propagates the world matrices;
/// 3. `compute` produces the bone matrices ready to be uploaded.
#[derive(Debug, Clone)]
pub struct Skeleton {
    joints: Vec<TransformHandle>,
    inverse_binds: Vec<Matrix4<f32>>,
    matrices: Vec<Matrix4<f32>>,
}

impl Skeleton {
    pub fn new(joints: Vec<TransformHandle>, inverse_binds: Vec<Matrix4<f32>>) -> Result<Self> {
        if joints.len() != inverse_binds.len() {
            return Err(Error::JointCountMismatch(joints.len(), inverse_binds.len()));
        }

        let matrices = vec![Matrix4::identity(); joints.len()];
        Ok(Skeleton {
            joints,
            inverse_binds,
            matrices,
        })
    }

    #[inline]
    pub fn joints(&self) -> &[TransformHandle] {
        &self.joints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Writes a local pose, `pose[i]` goes to the i-th joint. Returns the number
    /// of joints that have been written.
    pub fn apply_pose(&self, transforms: &mut TransformManager, pose: &[Transform]) -> usize {
        let mut written = 0;
        for (&joint, &local) in self.joints.iter().zip(pose) {
            if transforms.set_transform(joint, local) {
                written += 1;
            }
        }

        written
    }

    /// Computes the bone matrices from the world matrices of the last update.
    /// Destroyed joints yield identity.
    pub fn compute(&mut self, transforms: &TransformManager) -> &[Matrix4<f32>] {
        for ((joint, inverse_bind), matrix) in self
            .joints
            .iter()
            .zip(&self.inverse_binds)
            .zip(self.matrices.iter_mut())
        {
            *matrix = match transforms.world_matrix(*joint) {
                Some(world) => world * inverse_bind,
                None => Matrix4::identity(),
            };
        }

        &self.matrices
    }

    /// Returns the bone matrices of the last `compute`.
    #[inline]
    pub fn matrices(&self) -> &[Matrix4<f32>] {
        &self.matrices
    }
}
