//! Local transforms and XYZ Euler angles
//!
//! Rotations are stored as quaternions. Euler angles use intrinsic X-then-Y-
//! then-Z order, so `EulerXyz { x, y, z }` is the rotation `Rx * Ry * Rz`.

use cgmath::{Matrix3, Matrix4, One, Quaternion, Vector3};

/// Euler angles in radians, XYZ order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerXyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerXyz {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quaternion(self) -> Quaternion<f32> {
        let (s1, c1) = (self.x * 0.5).sin_cos();
        let (s2, c2) = (self.y * 0.5).sin_cos();
        let (s3, c3) = (self.z * 0.5).sin_cos();

        Quaternion::new(
            c1 * c2 * c3 - s1 * s2 * s3,
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * s3 + s1 * s2 * c3,
        )
    }

    /// Decomposes a unit quaternion
    ///
    /// Near gimbal lock (|y| at 90 degrees) the whole X/Z rotation is
    /// attributed to `x` and `z` is zero.
    pub fn from_quaternion(q: Quaternion<f32>) -> Self {
        let m = Matrix3::from(q);
        // cgmath matrices are column-major: m13 is column z, row x
        let m11 = m.x.x;
        let m12 = m.y.x;
        let m13 = m.z.x;
        let m22 = m.y.y;
        let m23 = m.z.y;
        let m32 = m.y.z;
        let m33 = m.z.z;

        let y = m13.clamp(-1.0, 1.0).asin();
        if m13.abs() < 0.999_999_9 {
            Self::new((-m23).atan2(m33), y, (-m12).atan2(m11))
        } else {
            Self::new(m32.atan2(m22), y, 0.0)
        }
    }
}

/// Translation, rotation and scale relative to the parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::identity()
        }
    }

    /// Builder pattern: set rotation from Euler angles
    pub fn with_euler(mut self, euler: EulerXyz) -> Self {
        self.set_euler(euler);
        self
    }

    pub fn euler(&self) -> EulerXyz {
        EulerXyz::from_quaternion(self.rotation)
    }

    pub fn set_euler(&mut self, euler: EulerXyz) {
        self.rotation = euler.to_quaternion();
    }

    /// Applies `delta` in the parent's frame: `rotation = delta * rotation`
    pub fn rotate_world(&mut self, delta: Quaternion<f32>) {
        self.rotation = delta * self.rotation;
    }

    /// Adds to the Y Euler angle, keeping the X and Z angles
    pub fn add_euler_y(&mut self, delta: f32) {
        let mut euler = self.euler();
        euler.y += delta;
        self.set_euler(euler);
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Quaternion::one();
    }

    /// Composes `T * R * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}
