use crate::math::prelude::*;

/// `Transform` is used to store and manipulate the postiion, rotation and scale
/// of the object. It is the usual way to build the local matrix of a node, and
/// the unit a pose is made of when animating a skeleton.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            scale: 1.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }
}

impl ::std::ops::Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Transform {
            position: self.rotation * (rhs.position * self.scale) + self.position,
            rotation: self.rotation * rhs.rotation,
            scale: self.scale * rhs.scale,
        }
    }
}

impl From<Transform> for Matrix4<f32> {
    fn from(transform: Transform) -> Self {
        transform.matrix()
    }
}

impl Transform {
    /// Constructs a transform that only translates.
    #[inline]
    pub fn from_translation<T>(position: T) -> Self
    where
        T: Into<Vector3<f32>>,
    {
        Transform {
            position: position.into(),
            ..Default::default()
        }
    }

    /// Returns a transform that "un-does" this one.
    #[inline]
    pub fn inverse(self) -> Option<Self> {
        if self.scale <= ::std::f32::EPSILON {
            None
        } else {
            let s = 1.0 / self.scale;
            let r = self.rotation.invert();
            let d = r.rotate_vector(self.position) * -s;

            Some(Transform {
                scale: s,
                rotation: r,
                position: d,
            })
        }
    }

    /// Interpolates between two transforms, `amount` is clamped to `[0, 1]`.
    /// Position and scale are linear, rotation is normalized-linear.
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        let t = amount.max(0.0).min(1.0);

        // Takes the short way around.
        let to = if self.rotation.dot(other.rotation) < 0.0 {
            -other.rotation
        } else {
            other.rotation
        };

        Transform {
            scale: self.scale + (other.scale - self.scale) * t,
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.nlerp(to, t),
        }
    }

    /// Transforms points from local space to transform's space.
    #[inline]
    pub fn transform_point<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        self.rotation * (v.into() * self.scale) + self.position
    }

    /// Returns the matrix representation.
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        // M = T * R * S
        let m: Matrix3<_> = self.rotation.into();
        let mut m: Matrix4<_> = (m * self.scale).into();
        m.w = self.position.extend(1.0);
        m
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matrix_matches_composition() {
        let euler = Euler::new(Deg(0.0), Deg(0.0), Deg(90.0));
        let parent = Transform {
            scale: 2.0,
            position: Vector3::new(1.0, 0.0, 2.0),
            rotation: Quaternion::from(euler),
        };

        let child = Transform::from_translation([1.0, 0.0, 0.0]);

        let composed = (parent * child).matrix();
        let multiplied = parent.matrix() * child.matrix();
        assert_ulps_eq!(composed, multiplied, epsilon = 1e-5);
        assert_ulps_eq!(
            (parent * child).position,
            Vector3::new(1.0, 2.0, 2.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn inverse() {
        let t = Transform {
            scale: 2.0,
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation: Quaternion::from(Euler::new(Deg(30.0), Deg(0.0), Deg(0.0))),
        };

        let i = t.inverse().unwrap();
        let v = (t * i).transform_point([1.0, 1.0, 1.0]);
        assert_ulps_eq!(v, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-5);

        let degenerated = Transform {
            scale: 0.0,
            ..Default::default()
        };
        assert!(degenerated.inverse().is_none());
    }

    #[test]
    fn lerp() {
        let a = Transform::from_translation([0.0, 0.0, 0.0]);
        let b = Transform {
            scale: 3.0,
            position: Vector3::new(2.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        };

        let m = a.lerp(b, 0.5);
        assert_ulps_eq!(m.position, Vector3::new(1.0, 0.0, 0.0));
        assert_ulps_eq!(m.scale, 2.0);
        assert_eq!(a.lerp(b, 4.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }
}
