//! Recursive ray tracing.

use glim_core::{Hit, Illumination, Scene};
use glim_math::{Ray, Vec3};

use crate::options::RenderOptions;

/// Offset applied along secondary-ray directions so shadow and reflection
/// rays start clear of the surface that spawned them.
const SECONDARY_RAY_EPSILON: f32 = 1e-3;

/// Traces rays through a read-only scene.
///
/// Shadow and reflection rays recurse synchronously inside a trace; a trace
/// always runs to its bounce budget or its first background miss.
pub struct Tracer<'a> {
    scene: &'a Scene,
    options: &'a RenderOptions,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, options: &'a RenderOptions) -> Self {
        Self { scene, options }
    }

    /// Trace one ray and return its color.
    ///
    /// `bounces` is the remaining reflection budget; it strictly decreases
    /// across recursive calls, so termination needs no other guard. The hit
    /// record is left holding the primary intersection for the caller's
    /// normal/depth buffers.
    pub fn trace_ray(&self, ray: &Ray, t_min: f32, bounces: u32, hit: &mut Hit<'a>) -> Vec3 {
        if !self.scene.group().intersect(ray, t_min, hit) {
            return self.scene.background_color(ray.direction());
        }
        // intersect returned true, so the material is set
        let Some(material) = hit.material else {
            return self.scene.background_color(ray.direction());
        };

        let mut color = self.scene.ambient_light() * material.diffuse_color;
        let point = ray.at(hit.t);

        for light in self.scene.lights() {
            let illumination = light.illumination(point);
            if self.options.shadows && self.occluded(point, &illumination) {
                continue;
            }
            color += material.shade(ray, hit, illumination.to_light, illumination.intensity);
        }

        if bounces > 0 {
            let normal = hit.normal.normalize_or_zero();
            let to_viewer = -ray.direction().normalize_or_zero();
            let reflected =
                (2.0 * to_viewer.dot(normal) * normal - to_viewer).normalize_or_zero();

            let reflection_ray =
                Ray::new(point + reflected * SECONDARY_RAY_EPSILON, reflected);
            let mut reflection_hit = Hit::new();
            color += material.specular_color
                * self.trace_ray(&reflection_ray, t_min, bounces - 1, &mut reflection_hit);
        }

        color
    }

    /// Whether something blocks the path from `point` to the light.
    fn occluded(&self, point: Vec3, illumination: &Illumination) -> bool {
        let shadow_ray = Ray::new(
            point + illumination.to_light * SECONDARY_RAY_EPSILON,
            illumination.to_light,
        );
        let mut shadow_hit = Hit::new();
        self.scene.group().intersect(&shadow_ray, 0.0, &mut shadow_hit)
            && shadow_hit.t < illumination.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glim_core::{
        Background, Group, Light, Material, PerspectiveCamera, Primitive, Scene, Sphere,
    };
    use std::f32::consts::FRAC_PI_2;
    use std::sync::Arc;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, FRAC_PI_2)
            .unwrap()
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new(
            camera(),
            Background::Solid(Vec3::new(0.1, 0.2, 0.3)),
            Vec3::ZERO,
            vec![Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE)],
            Vec::new(),
            Group::new(),
        );
        let options = RenderOptions::default();
        let tracer = Tracer::new(&scene, &options);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        let color = tracer.trace_ray(&ray, 1e-4, 0, &mut hit);

        assert_eq!(color, Vec3::new(0.1, 0.2, 0.3));
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_ambient_term() {
        let material = Arc::new(Material::diffuse(Vec3::new(1.0, 0.5, 0.25)));
        let mut group = Group::new();
        group.add(Primitive::Sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::clone(&material),
        )));

        // Light arriving from behind the sphere: the camera-facing surface
        // gets only the ambient term
        let scene = Scene::new(
            camera(),
            Background::Solid(Vec3::ZERO),
            Vec3::splat(0.2),
            vec![Light::directional(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE)],
            vec![material],
            group,
        );
        let options = RenderOptions::default();
        let tracer = Tracer::new(&scene, &options);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        let color = tracer.trace_ray(&ray, 1e-4, 0, &mut hit);

        assert!((hit.t - 4.0).abs() < 1e-4);
        assert!((color - Vec3::new(0.2, 0.1, 0.05)).length() < 1e-5);
    }

    /// Scene: floor plane at y = 0, occluder sphere above the shaded point,
    /// point light directly above both.
    fn shadow_scene() -> Scene {
        let floor = Arc::new(Material::diffuse(Vec3::ONE));
        let blocker = Arc::new(Material::diffuse(Vec3::ONE));

        let mut group = Group::new();
        group.add(Primitive::Plane(glim_core::Plane::new(
            Vec3::Y,
            0.0,
            floor,
        )));
        group.add(Primitive::Sphere(Sphere::new(
            Vec3::new(1.0, 2.0, 0.0),
            0.5,
            blocker,
        )));

        Scene::new(
            camera(),
            Background::Solid(Vec3::ZERO),
            Vec3::ZERO,
            vec![Light::point(Vec3::new(1.0, 4.0, 0.0), Vec3::ONE, 0.25).unwrap()],
            Vec::new(),
            group,
        )
    }

    #[test]
    fn test_shadowed_light_contributes_nothing() {
        let scene = shadow_scene();
        let options = RenderOptions {
            shadows: true,
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &options);

        // Diagonal ray hitting the floor at (1, 0, 0), beneath the blocker
        let ray = Ray::new(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, -1.0, -1.0).normalize(),
        );
        let mut hit = Hit::new();
        let color = tracer.trace_ray(&ray, 1e-4, 0, &mut hit);

        assert!(hit.is_hit());
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_shadows_disabled_restores_contribution() {
        let scene = shadow_scene();
        let options = RenderOptions {
            shadows: false,
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &options);

        let ray = Ray::new(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, -1.0, -1.0).normalize(),
        );
        let mut hit = Hit::new();
        let color = tracer.trace_ray(&ray, 1e-4, 0, &mut hit);

        assert!(hit.is_hit());
        assert!(color.x > 0.0);
    }

    #[test]
    fn test_reflection_adds_exactly_specular_times_background() {
        let background = Vec3::new(0.2, 0.4, 0.8);
        let specular = Vec3::new(0.5, 0.5, 0.5);
        let material = Arc::new(Material::new(Vec3::splat(0.1), specular, 16.0));

        let mut group = Group::new();
        group.add(Primitive::Sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::clone(&material),
        )));

        let scene = Scene::new(
            camera(),
            Background::Solid(background),
            Vec3::splat(0.1),
            vec![Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE)],
            vec![material],
            group,
        );
        let options = RenderOptions::default();
        let tracer = Tracer::new(&scene, &options);

        // Head-on ray: the mirror reflection points straight back and
        // escapes to the background
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut hit0 = Hit::new();
        let color0 = tracer.trace_ray(&ray, 1e-4, 0, &mut hit0);

        let mut hit1 = Hit::new();
        let color1 = tracer.trace_ray(&ray, 1e-4, 1, &mut hit1);

        let difference = color1 - color0;
        assert!((difference - specular * background).length() < 1e-5);
        // The primary hit itself is unchanged
        assert!((hit0.t - hit1.t).abs() < 1e-6);
    }

    #[test]
    fn test_zero_bounces_never_recurses_into_mirror_box() {
        // Two facing mirrors; only the bounce budget stops the recursion
        let mirror = Arc::new(Material::new(Vec3::ZERO, Vec3::ONE, 1.0));
        let mut group = Group::new();
        group.add(Primitive::Plane(glim_core::Plane::new(
            Vec3::Z,
            -10.0,
            Arc::clone(&mirror),
        )));
        group.add(Primitive::Plane(glim_core::Plane::new(
            -Vec3::Z,
            -10.0,
            Arc::clone(&mirror),
        )));

        let scene = Scene::new(
            camera(),
            Background::Solid(Vec3::ZERO),
            Vec3::ZERO,
            vec![Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE)],
            vec![mirror],
            group,
        );
        let options = RenderOptions::default();
        let tracer = Tracer::new(&scene, &options);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut hit = Hit::new();
        // A large budget still terminates: it strictly decreases per level
        tracer.trace_ray(&ray, 1e-4, 32, &mut hit);
        assert!(hit.is_hit());
    }
}
