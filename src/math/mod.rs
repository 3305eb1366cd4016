//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod prelude {
    // `cgmath::Transform` is left out, it would collide with `spatial::Transform`.
    pub use cgmath::{
        Angle, EuclideanSpace, InnerSpace, Matrix, MetricSpace, One, Rotation, Rotation3,
        SquareMatrix, VectorSpace, Zero,
    };
    pub use cgmath::{Deg, Euler, Matrix3, Matrix4, Point3, Quaternion, Rad, Vector3, Vector4};
}
