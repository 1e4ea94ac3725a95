//! The primitive sum type and its composite members.
//!
//! Every intersectable object in a scene is one `Primitive` variant with a
//! single `intersect` operation dispatched by match. Composites (`Group`,
//! `Transformed`) own their children by value, so the scene graph is a tree
//! with explicit ownership - no sharing, no cycles.

use glim_math::{Mat4, Mat4Ext, Ray};

use crate::{
    error::SceneError, hit::Hit, mesh::TriangleMesh, plane::Plane, sphere::Sphere,
    triangle::Triangle,
};

/// Any intersectable scene object.
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Group(Group),
    Transform(Transformed),
    Mesh(TriangleMesh),
}

impl Primitive {
    /// Test the ray against this primitive with the shared closest-hit
    /// contract: true iff an intersection with t in (t_min, hit.t) was found
    /// and the hit record was overwritten; false leaves the record untouched.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray, t_min, hit),
            Primitive::Plane(plane) => plane.intersect(ray, t_min, hit),
            Primitive::Triangle(triangle) => triangle.intersect(ray, t_min, hit),
            Primitive::Group(group) => group.intersect(ray, t_min, hit),
            Primitive::Transform(transformed) => transformed.intersect(ray, t_min, hit),
            Primitive::Mesh(mesh) => mesh.intersect(ray, t_min, hit),
        }
    }
}

/// An ordered collection of primitives intersected as one.
pub struct Group {
    members: Vec<Primitive>,
}

impl Group {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Create a group from its members.
    pub fn from_members(members: Vec<Primitive>) -> Self {
        Self { members }
    }

    /// Add a member to the group.
    pub fn add(&mut self, primitive: Primitive) {
        self.members.push(primitive);
    }

    /// Get the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Delegate to every member. Order does not affect the result: each
    /// member only accepts hits strictly closer than the running best.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        let mut hit_anything = false;
        for member in &self.members {
            if member.intersect(ray, t_min, hit) {
                hit_anything = true;
            }
        }
        hit_anything
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

/// A primitive wrapped in an affine transform.
///
/// Rays are pulled into the child's local space through the inverse matrix;
/// hit normals come back through the inverse transpose so non-uniform scales
/// shade correctly.
pub struct Transformed {
    child: Box<Primitive>,
    inverse: Mat4,
    inverse_transpose: Mat4,
}

impl Transformed {
    /// Wrap a primitive in a transform. Singular matrices cannot be
    /// inverted for the ray pull-back and are rejected.
    pub fn new(matrix: Mat4, child: Primitive) -> Result<Self, SceneError> {
        if matrix.determinant().abs() < 1e-8 {
            return Err(SceneError::SingularTransform);
        }
        let inverse = matrix.inverse();
        Ok(Self {
            child: Box::new(child),
            inverse,
            inverse_transpose: inverse.transpose(),
        })
    }

    /// Intersect in the child's local space.
    ///
    /// The local direction is normalized before the child call; its
    /// pre-normalization length converts parametric distances between the
    /// two spaces (local t = world t * scale), so both the running bound and
    /// the returned t are rescaled across the boundary.
    pub fn intersect<'a>(&'a self, ray: &Ray, t_min: f32, hit: &mut Hit<'a>) -> bool {
        let local_origin = self.inverse.project_point3(ray.origin());
        let local_direction = self.inverse.transform_vector3(ray.direction());

        let scale = local_direction.length();
        if scale == 0.0 {
            return false;
        }
        let local_ray = Ray::new(local_origin, local_direction / scale);

        // Carry the current best into local space so the child's
        // closer-than check keeps working there.
        let mut local_hit = Hit::new();
        local_hit.t = hit.t * scale;

        if !self.child.intersect(&local_ray, t_min, &mut local_hit) {
            return false;
        }
        let Some(material) = local_hit.material else {
            return false;
        };

        let t = local_hit.t / scale;
        let normal = self
            .inverse_transpose
            .transform_vector3(local_hit.normal)
            .normalize_or_zero();
        hit.set(t, material, normal);
        true
    }
}
