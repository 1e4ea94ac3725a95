//! Closest-hit record threaded through the primitive tree.

use glim_math::Vec3;

use crate::material::Material;

/// Record of the closest intersection found so far along a ray.
///
/// A single `Hit` is passed by mutable reference through the whole primitive
/// tree, so "closest so far" is a running bound shared by every candidate:
/// scene intersection is one top-down traversal, not one traversal per
/// primitive. `t` starts at infinity and only ever decreases; `material` and
/// `normal` are rewritten only together with a smaller `t`.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Closest parametric distance found so far
    pub t: f32,
    /// Material at the intersection point, None until something is hit
    pub material: Option<&'a Material>,
    /// Surface normal at the intersection point
    pub normal: Vec3,
}

impl<'a> Hit<'a> {
    /// Create a fresh record with no intersection recorded.
    pub fn new() -> Self {
        Self {
            t: f32::INFINITY,
            material: None,
            normal: Vec3::ZERO,
        }
    }

    /// Record an intersection. Callers check `t` against the admissible
    /// range before calling; `set` itself is unconditional.
    pub fn set(&mut self, t: f32, material: &'a Material, normal: Vec3) {
        self.t = t;
        self.material = Some(material);
        self.normal = normal;
    }

    /// Whether any intersection has been recorded.
    pub fn is_hit(&self) -> bool {
        self.material.is_some()
    }
}

impl<'a> Default for Hit<'a> {
    fn default() -> Self {
        Self::new()
    }
}
