use super::handle::HandleLike;
use super::handle_pool::HandlePool;

/// A named object collections. Every time u add or remove a value, a attached
/// `Handle` will be created/ freed.
///
/// Values are kept densely packed in a single `Vec<T>`, so linear passes over
/// `as_slice` never touch holes. The position of a value inside that array (its
/// *slot*) is volatile: removals move the last value into the hole, and `swap`
/// exchanges two values explicitly. Handles stay stable across all of this, the
/// pool keeps the mapping between handles and slots in both directions.
#[derive(Debug)]
pub struct ObjectPool<H: HandleLike, T: Sized> {
    handles: HandlePool<H>,
    // Handle index -> slot. Only meaningful for alive handles.
    remap: Vec<usize>,
    // Slot -> handle.
    ids: Vec<H>,
    entries: Vec<T>,
}

impl<H: HandleLike, T: Sized> Default for ObjectPool<H, T> {
    fn default() -> Self {
        ObjectPool::new()
    }
}

impl<H: HandleLike, T: Sized> ObjectPool<H, T> {
    /// Constructs a new, empty `ObjectPool`.
    pub fn new() -> Self {
        ObjectPool {
            handles: HandlePool::new(),
            remap: Vec::new(),
            ids: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Constructs a new `ObjectPool` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        ObjectPool {
            handles: HandlePool::with_capacity(capacity),
            remap: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends `value` to the end of the dense array and names it with a fresh
    /// `Handle`.
    pub fn add(&mut self, value: T) -> H {
        let handle = self.handles.create();
        let slot = self.entries.len();

        self.entries.push(value);
        self.ids.push(handle);

        let index = handle.index() as usize;
        if index >= self.remap.len() {
            self.remap.resize(index + 1, 0);
        }

        self.remap[index] = slot;
        handle
    }

    /// Returns immutable reference to internal value with name `Handle`.
    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        self.index(handle).map(|slot| &self.entries[slot])
    }

    /// Returns mutable reference to internal value with name `Handle`.
    #[inline]
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        match self.index(handle) {
            Some(slot) => Some(&mut self.entries[slot]),
            None => None,
        }
    }

    /// Returns the current slot of `handle` in the dense array.
    #[inline]
    pub fn index(&self, handle: H) -> Option<usize> {
        if self.handles.is_alive(handle) {
            Some(self.remap[handle.index() as usize])
        } else {
            None
        }
    }

    /// Returns the `Handle` that currently lives at `slot`.
    #[inline]
    pub fn handle(&self, slot: usize) -> Option<H> {
        self.ids.get(slot).cloned()
    }

    /// Returns true if this `Handle` was created by `ObjectPool`, and has not been
    /// removed yet.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.handles.is_alive(handle)
    }

    /// Removes the value with name `Handle`. The last value of the dense array
    /// is moved into the freed slot, every other slot is left untouched.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let slot = self.index(handle)?;
        self.handles.free(handle);

        let value = self.entries.swap_remove(slot);
        self.ids.swap_remove(slot);

        if slot < self.ids.len() {
            let moved = self.ids[slot];
            self.remap[moved.index() as usize] = slot;
        }

        Some(value)
    }

    /// Exchanges the slots of two alive handles. Both handles keep naming the
    /// same values. Returns false if any of them is not alive.
    pub fn swap(&mut self, lhs: H, rhs: H) -> bool {
        match (self.index(lhs), self.index(rhs)) {
            (Some(a), Some(b)) => {
                self.swap_slots(a, b);
                true
            }
            _ => false,
        }
    }

    /// Exchanges the values at slot `a` and `b`, and keeps the handles pointing
    /// at the values they name.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` are out of bounds.
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        self.entries.swap(a, b);
        self.ids.swap(a, b);
        self.remap[self.ids[a].index() as usize] = a;
        self.remap[self.ids[b].index() as usize] = b;
    }

    /// Removes all the values. Handles created before stay dead.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.ids.clear();
        self.entries.clear();
    }

    /// Returns the total number of alive handle in this `ObjectPool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the pool is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the densely packed values in slot order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Returns the densely packed values in slot order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.entries
    }

    /// Returns the handles in slot order.
    #[inline]
    pub fn handles(&self) -> &[H] {
        &self.ids
    }

    /// Returns an iterator over the `(Handle, value)` pairs in slot order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.ids.iter().cloned().zip(self.entries.iter())
    }
}
