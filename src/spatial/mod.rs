//! Transform hierarchy of scene nodes.

pub mod manager;
pub mod node;
pub mod skeleton;
pub mod transform;

impl_handle!(TransformHandle);

pub mod prelude {
    pub use super::manager::{Ancestors, TransformManager};
    pub use super::node::Node;
    pub use super::skeleton::Skeleton;
    pub use super::transform::Transform;
    pub use super::TransformHandle;
}
