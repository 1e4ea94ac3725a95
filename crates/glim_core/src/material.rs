//! Phong material and local illumination.

use glim_math::{Ray, Vec3};

use crate::hit::Hit;

/// Surface material with diffuse and specular reflectance.
///
/// Materials are immutable once built and shared by reference across every
/// primitive that uses them (many primitives, one material).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse reflectance (RGB, nominally 0-1)
    pub diffuse_color: Vec3,
    /// Specular reflectance, also scales reflection-bounce contribution
    pub specular_color: Vec3,
    /// Phong exponent
    pub shininess: f32,
}

impl Material {
    /// Create a new material.
    pub fn new(diffuse_color: Vec3, specular_color: Vec3, shininess: f32) -> Self {
        Self {
            diffuse_color,
            specular_color,
            shininess,
        }
    }

    /// Create a purely diffuse material.
    pub fn diffuse(diffuse_color: Vec3) -> Self {
        Self::new(diffuse_color, Vec3::ZERO, 0.0)
    }

    /// Compute local Phong illumination at a hit point for one light.
    ///
    /// `dir_to_light` points from the hit point toward the light and
    /// `light_intensity` is the light's RGB intensity arriving there.
    /// Back-facing contributions clamp to zero; this is a pure function.
    pub fn shade(
        &self,
        _ray: &Ray,
        hit: &Hit,
        dir_to_light: Vec3,
        light_intensity: Vec3,
    ) -> Vec3 {
        let n = hit.normal.normalize_or_zero();
        let l = dir_to_light.normalize_or_zero();

        let diffuse = n.dot(l).max(0.0) * light_intensity * self.diffuse_color;

        // Ideal reflection of L about N
        let r = (2.0 * l.dot(n) * n - l).normalize_or_zero();
        let specular = l.dot(r).max(0.0).powf(self.shininess) * light_intensity * self.specular_color;

        diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_hit(normal: Vec3) -> Hit<'static> {
        let mut hit = Hit::new();
        hit.t = 1.0;
        hit.normal = normal;
        hit
    }

    #[test]
    fn test_shade_head_on_diffuse() {
        let material = Material::diffuse(Vec3::new(0.5, 0.25, 1.0));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = lit_hit(Vec3::Y);

        // Light straight above: N.L = 1, full diffuse contribution
        let color = material.shade(&ray, &hit, Vec3::Y, Vec3::ONE);
        assert!((color - Vec3::new(0.5, 0.25, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_shade_grazing_diffuse() {
        let material = Material::diffuse(Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = lit_hit(Vec3::Y);

        // Light at 60 degrees off the normal: N.L = 0.5
        let to_light = Vec3::new((3.0f32).sqrt() / 2.0, 0.5, 0.0);
        let color = material.shade(&ray, &hit, to_light, Vec3::ONE);
        assert!((color.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_shade_light_behind_surface() {
        let material = Material::new(Vec3::ONE, Vec3::ONE, 8.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = lit_hit(Vec3::Y);

        // Light below the surface: both terms clamp to zero
        let color = material.shade(&ray, &hit, -Vec3::Y, Vec3::ONE);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shade_specular_highlight() {
        let material = Material::new(Vec3::ZERO, Vec3::ONE, 4.0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = lit_hit(Vec3::Y);

        // L along the normal reflects onto itself: L.R = 1, full specular
        let color = material.shade(&ray, &hit, Vec3::Y, Vec3::ONE);
        assert!((color - Vec3::ONE).length() < 1e-5);

        // Off-normal light gives a dimmer highlight
        let to_light = Vec3::new(0.6, 0.8, 0.0);
        let dimmer = material.shade(&ray, &hit, to_light, Vec3::ONE);
        assert!(dimmer.x < 1.0);
        assert!(dimmer.x > 0.0);
    }
}
