//! Sphere primitive.

use std::sync::Arc;

use glim_math::{Ray, Vec3};

use crate::{hit::Hit, material::Material};

/// A sphere given by center and radius.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Test the ray against this sphere, accepting only intersections with
    /// t in (t_min, hit.t). On acceptance the hit record is overwritten and
    /// true is returned; otherwise the record is untouched.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        let origin = ray.origin() - self.center;
        let dir = ray.direction();

        // |O + tD - C|^2 = r^2 as a quadratic in t
        let a = dir.length_squared();
        let b = 2.0 * dir.dot(origin);
        let c = origin.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return false;
        }
        let d = discriminant.sqrt();

        let t_minus = (-b - d) / (2.0 * a);
        let t_plus = (-b + d) / (2.0 * a);

        // Prefer the near root; fall back to the far root when the origin
        // is inside the sphere.
        let t = if t_minus > t_min {
            t_minus
        } else if t_plus > t_min {
            t_plus
        } else {
            return false;
        };

        if t >= hit.t {
            return false;
        }

        let normal = (ray.at(t) - self.center).normalize();
        hit.set(t, &self.material, normal);
        true
    }
}
