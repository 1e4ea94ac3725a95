//! Perspective camera for primary ray generation.

use glim_math::{Ray, Vec2, Vec3};

use crate::error::SceneError;

/// Epsilon returned by `t_min` so primary rays never re-hit geometry the
/// camera sits on.
const CAMERA_T_MIN: f32 = 1e-4;

/// Pinhole perspective camera.
///
/// Maps normalized screen coordinates in [-1, 1]^2 to world-space rays.
/// Immutable for the duration of a render.
pub struct PerspectiveCamera {
    center: Vec3,
    direction: Vec3,
    up: Vec3,
    horizontal: Vec3,
    angle: f32,
}

impl PerspectiveCamera {
    /// Create a camera at `center` looking along `direction`, with the given
    /// vertical field of view in radians. Degenerate axes (zero-length, or
    /// direction parallel to up) are rejected.
    pub fn new(
        center: Vec3,
        direction: Vec3,
        up: Vec3,
        angle_radians: f32,
    ) -> Result<Self, SceneError> {
        let direction = direction
            .try_normalize()
            .ok_or(SceneError::DegenerateCamera)?;
        let horizontal = direction
            .cross(up)
            .try_normalize()
            .ok_or(SceneError::DegenerateCamera)?;

        Ok(Self {
            center,
            direction,
            up,
            horizontal,
            angle: angle_radians,
        })
    }

    /// Generate the ray through a normalized screen point in [-1, 1]^2.
    pub fn generate_ray(&self, point: Vec2) -> Ray {
        let d = 1.0 / (self.angle / 2.0).tan();
        let direction =
            (d * self.direction + point.x * self.horizontal + point.y * self.up).normalize();
        Ray::new(self.center, direction)
    }

    /// Minimum admissible t for primary rays.
    pub fn t_min(&self) -> f32 {
        CAMERA_T_MIN
    }

    /// The camera position.
    pub fn center(&self) -> Vec3 {
        self.center
    }
}
