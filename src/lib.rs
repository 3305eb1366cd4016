//! # Trellis
//!
//! Handle-indexed object pools and a flat transform hierarchy, the spatial core
//! of a scene graph.
//!
//! ## Handles and pools
//!
//! A `Handle` names an object stored in an `ObjectPool`. Objects are kept densely
//! packed and are moved around freely when other objects are removed or when the
//! pool is reordered, but a `Handle` keeps naming the same object until that very
//! object is removed. Stale handles are detected and reported as `None`/`false`,
//! never as another object.
//!
//! ## Transform hierarchy
//!
//! `TransformManager` stores one local matrix and one parent per node, and
//! computes world matrices in one linear pass per frame by keeping its nodes in
//! topological order. See the `spatial` module for details.
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let mut transforms = TransformManager::new();
//! let root = transforms.create(Matrix4::identity());
//! let child = transforms.create(Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0)));
//! transforms.set_parent(child, root);
//!
//! transforms.set_transform(root, Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0)));
//! transforms.update();
//!
//! let expected = Matrix4::from_translation(Vector3::new(1.0, 1.0, 0.0));
//! assert_eq!(transforms.world_matrix(child), Some(&expected));
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

#[cfg(test)]
#[macro_use]
extern crate approx;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod math;
pub mod settings;
pub mod spatial;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::math::prelude::*;
    pub use crate::settings::{HierarchyParams, Settings};
    pub use crate::spatial::prelude::*;
    pub use crate::utils::prelude::*;
}
