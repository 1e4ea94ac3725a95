//! The read-only scene consumed by the renderer.
//!
//! A `Scene` is handed over fully built by the external scene loader and
//! never mutates during a render. Construction either succeeds completely
//! or the scene is unusable - there is no partial form.

use std::sync::Arc;

use glim_math::Vec3;

use crate::{
    camera::PerspectiveCamera, light::Light, material::Material, primitive::Group,
};

/// One face raster of a cube map, row-major RGB texels.
pub struct CubeFace {
    width: usize,
    height: usize,
    texels: Vec<Vec3>,
}

impl CubeFace {
    /// Create a face from decoded texels (decoding itself is external).
    pub fn new(width: usize, height: usize, texels: Vec<Vec3>) -> Self {
        debug_assert_eq!(texels.len(), width * height);
        Self {
            width,
            height,
            texels,
        }
    }

    /// Create a single-texel face, useful for flat-colored environments.
    pub fn solid(color: Vec3) -> Self {
        Self::new(1, 1, vec![color])
    }

    /// Nearest-texel lookup with u, v in [0, 1].
    fn texel(&self, u: f32, v: f32) -> Vec3 {
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        self.texels[y * self.width + x]
    }
}

/// Environment cube map sampled by ray direction.
///
/// Faces are ordered +X, -X, +Y, -Y, +Z, -Z.
pub struct CubeMap {
    faces: [CubeFace; 6],
}

impl CubeMap {
    pub fn new(faces: [CubeFace; 6]) -> Self {
        Self { faces }
    }

    /// Sample the environment in a given direction: pick the face of the
    /// dominant axis, then project the remaining two components onto it.
    pub fn sample(&self, direction: Vec3) -> Vec3 {
        let abs = direction.abs();
        let (face, u, v) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x > 0.0 {
                (0, -direction.z / abs.x, -direction.y / abs.x)
            } else {
                (1, direction.z / abs.x, -direction.y / abs.x)
            }
        } else if abs.y >= abs.z {
            if direction.y > 0.0 {
                (2, direction.x / abs.y, direction.z / abs.y)
            } else {
                (3, direction.x / abs.y, -direction.z / abs.y)
            }
        } else if direction.z > 0.0 {
            (4, direction.x / abs.z, -direction.y / abs.z)
        } else {
            (5, -direction.x / abs.z, -direction.y / abs.z)
        };

        // Remap from [-1, 1] to [0, 1]
        self.faces[face].texel((u + 1.0) / 2.0, (v + 1.0) / 2.0)
    }
}

/// What a ray that escapes the scene sees.
pub enum Background {
    Solid(Vec3),
    CubeMap(CubeMap),
}

/// A complete scene: camera, background, ambient term, lights, the shared
/// material list, and the root group of primitives.
pub struct Scene {
    camera: PerspectiveCamera,
    background: Background,
    ambient_light: Vec3,
    lights: Vec<Light>,
    materials: Vec<Arc<Material>>,
    group: Group,
}

impl Scene {
    /// Assemble a scene.
    ///
    /// A scene without lights forces the ambient term to white so the render
    /// degrades to solid-color shading instead of a black image.
    pub fn new(
        camera: PerspectiveCamera,
        background: Background,
        mut ambient_light: Vec3,
        lights: Vec<Light>,
        materials: Vec<Arc<Material>>,
        group: Group,
    ) -> Self {
        if lights.is_empty() {
            log::warn!("no lights in scene; forcing ambient light to white");
            ambient_light = Vec3::ONE;
        }
        Self {
            camera,
            background,
            ambient_light,
            lights,
            materials,
            group,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Background color seen by a ray escaping in `direction`.
    pub fn background_color(&self, direction: Vec3) -> Vec3 {
        match &self.background {
            Background::Solid(color) => *color,
            Background::CubeMap(cube_map) => cube_map.sample(direction),
        }
    }

    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    /// The root of the primitive tree.
    pub fn group(&self) -> &Group {
        &self.group
    }
}
