//! Infinite plane primitive.

use std::sync::Arc;

use glim_math::{Ray, Vec3};

use crate::{hit::Hit, material::Material};

/// The plane of points X satisfying normal . X = d.
pub struct Plane {
    normal: Vec3,
    d: f32,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane from a unit normal and its offset from the origin.
    pub fn new(normal: Vec3, d: f32, material: Arc<Material>) -> Self {
        Self {
            normal,
            d,
            material,
        }
    }

    /// Test the ray against this plane. Rays parallel to the plane never hit.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom == 0.0 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if t <= t_min || t >= hit.t {
            return false;
        }

        hit.set(t, &self.material, self.normal);
        true
    }
}
