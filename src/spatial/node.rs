use crate::math::prelude::*;

use super::TransformHandle;

/// `Node` is the record a `TransformManager` keeps for every transform. The
/// parent is stored as a handle instead of a slot, so the record can be moved
/// around the dense array freely without fixing up anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Transform relative to the parent.
    pub local: Matrix4<f32>,
    /// Nil for roots.
    pub parent: TransformHandle,
    /// Transform relative to the scene root, as of the last update.
    pub world: Matrix4<f32>,
}

impl Node {
    pub fn new(local: Matrix4<f32>) -> Self {
        Node {
            local,
            parent: TransformHandle::nil(),
            world: local,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new(Matrix4::identity())
    }
}
