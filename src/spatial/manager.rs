use crate::errors::*;
use crate::math::prelude::*;
use crate::settings::HierarchyParams;
use crate::utils::prelude::ObjectPool;

use super::node::Node;
use super::TransformHandle;

/// A flat transform hierarchy that composes local matrices into world matrices.
///
/// Nodes live densely packed in an `ObjectPool`, and are kept in topological
/// order: a parent always sits in a smaller slot than any of its children. That
/// makes `update` a single forward pass over the array, with no recursion and no
/// per-node bookkeeping. The order is rebuilt lazily, only when the hierarchy has
/// been changed since the last `update`.
///
/// The hierarchy must be kept acyclic by the caller, `set_parent` does not check
/// it. Use `attach` for a checked version.
#[derive(Debug)]
pub struct TransformManager {
    nodes: ObjectPool<TransformHandle, Node>,
    params: HierarchyParams,
    hierarchy_changed: bool,
}

impl Default for TransformManager {
    fn default() -> Self {
        TransformManager::new()
    }
}

impl TransformManager {
    pub fn new() -> Self {
        TransformManager::with_settings(&HierarchyParams::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TransformManager::with_settings(&HierarchyParams {
            capacity,
            ..Default::default()
        })
    }

    pub fn with_settings(params: &HierarchyParams) -> Self {
        TransformManager {
            nodes: ObjectPool::with_capacity(params.capacity),
            params: *params,
            hierarchy_changed: false,
        }
    }

    /// Creates a root transform with `local` matrix.
    pub fn create<T>(&mut self, local: T) -> TransformHandle
    where
        T: Into<Matrix4<f32>>,
    {
        let handle = self.nodes.add(Node::new(local.into()));
        self.hierarchy_changed = true;

        trace!("Creates {}.", handle);
        handle
    }

    /// Destroys a transform. Its children are left in place and become roots.
    pub fn destroy(&mut self, handle: TransformHandle) -> bool {
        if self.nodes.remove(handle).is_some() {
            self.hierarchy_changed = true;

            trace!("Destroys {}.", handle);
            true
        } else {
            false
        }
    }

    /// Removes all the transforms.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.hierarchy_changed = false;
    }

    /// Returns the number of alive transforms.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: TransformHandle) -> bool {
        self.nodes.contains(handle)
    }

    /// Returns true if the hierarchy has been changed since last `update`.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.hierarchy_changed
    }

    /// Returns an iterator of the alive transforms in storage order. After an
    /// `update`, parents always come before their children.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = TransformHandle> + '_ {
        self.nodes.handles().iter().cloned()
    }

    /// Returns the node records in storage order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }
}

impl TransformManager {
    /// Gets the parent. Returns nil for roots, unknown handles, and transforms
    /// whose parent has been destroyed.
    #[inline]
    pub fn parent(&self, handle: TransformHandle) -> TransformHandle {
        self.nodes
            .get(handle)
            .map(|v| v.parent)
            .filter(|&v| self.nodes.contains(v))
            .unwrap_or_default()
    }

    /// Sets the parent of `handle`, pass `None` or a nil handle to detach it.
    ///
    /// No cycle check is performed, making a transform its own ancestor leaves the
    /// hierarchy in an unspecified order.
    pub fn set_parent<T>(&mut self, handle: TransformHandle, parent: T) -> bool
    where
        T: Into<Option<TransformHandle>>,
    {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.parent = parent.into().unwrap_or_default();
                self.hierarchy_changed = true;
                true
            }
            None => false,
        }
    }

    /// Attachs `child` to `parent` after making sure that the hierarchy stays
    /// acyclic.
    pub fn attach<T>(&mut self, child: TransformHandle, parent: T) -> Result<()>
    where
        T: Into<Option<TransformHandle>>,
    {
        if !self.nodes.contains(child) {
            return Err(Error::InvalidHandle(child));
        }

        if let Some(parent) = parent.into() {
            if !self.nodes.contains(parent) {
                return Err(Error::InvalidHandle(parent));
            }

            if parent == child {
                return Err(Error::CanNotAttachSelfAsParent);
            }

            if self.is_ancestor(parent, child) {
                return Err(Error::CyclicHierarchy(child, parent));
            }

            self.set_parent(child, parent);
        } else {
            self.set_parent(child, None);
        }

        Ok(())
    }

    /// Returns true if `handle` is alive and has no alive parent.
    #[inline]
    pub fn is_root(&self, handle: TransformHandle) -> bool {
        self.nodes
            .get(handle)
            .map(|v| !self.nodes.contains(v.parent))
            .unwrap_or(false)
    }

    /// Returns an iterator of its alive ancestors, nearest first.
    #[inline]
    pub fn ancestors(&self, handle: TransformHandle) -> Ancestors {
        Ancestors {
            cursor: self.nodes.get(handle).map(|v| v.parent).unwrap_or_default(),
            budget: self.nodes.len(),
            nodes: &self.nodes,
        }
    }

    /// Return true if `rhs` is one of the ancestors of `lhs`.
    #[inline]
    pub fn is_ancestor(&self, lhs: TransformHandle, rhs: TransformHandle) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns the number of ancestors of `handle`.
    #[inline]
    pub fn depth(&self, handle: TransformHandle) -> Option<usize> {
        if self.nodes.contains(handle) {
            Some(self.ancestors(handle).count())
        } else {
            None
        }
    }
}

/// An iterator of its ancestors. The walk is bounded by the number of alive
/// transforms, so it ends even if the hierarchy is cyclic.
pub struct Ancestors<'a> {
    nodes: &'a ObjectPool<TransformHandle, Node>,
    cursor: TransformHandle,
    budget: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = TransformHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.budget == 0 {
            return None;
        }

        let node = self.nodes.get(self.cursor)?;
        self.budget -= 1;
        Some(::std::mem::replace(&mut self.cursor, node.parent))
    }
}

impl TransformManager {
    /// Gets the matrix in local space.
    #[inline]
    pub fn transform(&self, handle: TransformHandle) -> Option<&Matrix4<f32>> {
        self.nodes.get(handle).map(|v| &v.local)
    }

    /// Sets the matrix in local space. It will be picked up by the next `update`.
    #[inline]
    pub fn set_transform<T>(&mut self, handle: TransformHandle, local: T) -> bool
    where
        T: Into<Matrix4<f32>>,
    {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.local = local.into();
                true
            }
            None => false,
        }
    }

    /// Gets the matrix in world space, as of the last `update`.
    #[inline]
    pub fn world_matrix(&self, handle: TransformHandle) -> Option<&Matrix4<f32>> {
        self.nodes.get(handle).map(|v| &v.world)
    }

    /// Gets the matrix that transforms from world space into the local space of
    /// `handle`. Returns `None` if the world matrix is not invertible.
    #[inline]
    pub fn inverse_world_matrix(&self, handle: TransformHandle) -> Option<Matrix4<f32>> {
        self.world_matrix(handle).and_then(|m| m.invert())
    }

    /// Gets the position in world space, as of the last `update`.
    #[inline]
    pub fn world_position(&self, handle: TransformHandle) -> Option<Point3<f32>> {
        self.world_matrix(handle)
            .map(|m| Point3::new(m.w.x, m.w.y, m.w.z))
    }

    /// Recomputes the world matrices of all the transforms.
    pub fn update(&mut self) {
        if self.hierarchy_changed {
            self.sort_transforms();
            self.hierarchy_changed = false;
        }

        for slot in 0..self.nodes.len() {
            let parent = self.nodes.as_slice()[slot].parent;
            let parent_world = self
                .nodes
                .index(parent)
                .map(|v| self.nodes.as_slice()[v].world);

            let node = &mut self.nodes.as_mut_slice()[slot];
            node.world = match parent_world {
                Some(world) => world * node.local,
                None => node.local,
            };
        }
    }

    // Reorders nodes by depth, so every parent ends up in front of its children.
    fn sort_transforms(&mut self) {
        let len = self.nodes.len();
        let mut levels = Vec::with_capacity(len);

        for &handle in self.nodes.handles() {
            let level = self.ancestors(handle).count();
            if level >= len {
                error!(
                    "{} is its own ancestor, the hierarchy can not be ordered.",
                    handle
                );
            }

            levels.push((level, handle));
        }

        if self.params.stable_sort {
            levels.sort_by_key(|v| v.0);
        } else {
            levels.sort_unstable_by_key(|v| v.0);
        }

        // Slots before `slot` are settled, so the node we need is never behind it.
        for (slot, &(_, handle)) in levels.iter().enumerate() {
            if let Some(current) = self.nodes.index(handle) {
                self.nodes.swap_slots(slot, current);
            }
        }

        debug!(
            "Resorts {} transforms with max depth {}.",
            len,
            levels.last().map(|v| v.0).unwrap_or(0)
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(x, y, z))
    }

    fn assert_topological(tm: &TransformManager) {
        for (slot, handle) in tm.iter().enumerate() {
            for ancestor in tm.ancestors(handle) {
                assert!(tm.nodes.index(ancestor).unwrap() < slot);
            }
        }
    }

    #[test]
    fn parents_come_first() {
        let mut tm = TransformManager::new();
        let c = tm.create(translate(0.0, 0.0, 1.0));
        let b = tm.create(translate(0.0, 1.0, 0.0));
        let a = tm.create(translate(1.0, 0.0, 0.0));

        tm.set_parent(c, b);
        tm.set_parent(b, a);
        assert!(tm.is_dirty());

        tm.update();
        assert!(!tm.is_dirty());
        assert_eq!(tm.iter().collect::<Vec<_>>(), vec![a, b, c]);
        assert_topological(&tm);
        assert_eq!(*tm.world_matrix(c).unwrap(), translate(1.0, 1.0, 1.0));
    }

    #[test]
    fn stable_siblings() {
        let mut tm = TransformManager::new();
        let s1 = tm.create(Matrix4::identity());
        let s2 = tm.create(Matrix4::identity());
        let s3 = tm.create(Matrix4::identity());
        let root = tm.create(Matrix4::identity());

        tm.set_parent(s1, root);
        tm.set_parent(s2, root);
        tm.set_parent(s3, root);
        tm.update();

        assert_eq!(tm.iter().collect::<Vec<_>>(), vec![root, s1, s2, s3]);
    }

    #[test]
    fn unstable_sort_still_topological() {
        let params = HierarchyParams {
            capacity: 8,
            stable_sort: false,
        };

        let mut tm = TransformManager::with_settings(&params);
        let mut handles = Vec::new();
        for i in 0..8 {
            let h = tm.create(translate(i as f32, 0.0, 0.0));
            handles.push(h);
        }

        for i in (1..8).rev() {
            tm.set_parent(handles[i - 1], handles[i]);
        }

        tm.update();
        assert_topological(&tm);
        assert_eq!(tm.iter().next(), Some(handles[7]));
        assert_eq!(*tm.world_matrix(handles[0]).unwrap(), translate(28.0, 0.0, 0.0));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let mut tm = TransformManager::new();
        let a = tm.create(Matrix4::identity());
        let b = tm.create(Matrix4::identity());

        tm.set_parent(a, b);
        tm.set_parent(b, a);
        tm.update();

        assert_eq!(tm.ancestors(a).count(), 2);
        assert_eq!(tm.len(), 2);
    }
}
