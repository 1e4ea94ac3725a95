//! glim renderer - recursive CPU ray tracing.
//!
//! Orchestrates a render over a read-only [`Scene`](glim_core::Scene):
//! primary rays from the camera, recursive shading with hard shadows and
//! specular reflection bounces, optional jittered supersampling, and an
//! optional Gaussian downsample pass. Rows render in parallel via rayon.
//!
//! The output is three equally-sized pixel buffers (color, normal
//! visualization, depth visualization); encoding them to files is a
//! collaborator's job - see `examples/render_scene.rs`.

mod film;
mod filter;
mod options;
mod render;
mod tracer;

pub use film::{color_to_rgba, Film};
pub use filter::gaussian_downsample;
pub use options::RenderOptions;
pub use render::{render, RenderOutput};
pub use tracer::Tracer;

/// Re-export the scene model and common math types
pub use glim_core::{
    Background, Group, Hit, Light, Material, PerspectiveCamera, Plane, Primitive, Scene,
    Sphere, Triangle,
};
pub use glim_math::{Ray, Vec2, Vec3};
