//! Per-pixel render driver.
//!
//! Every pixel's trace is independent given the read-only scene, so rows
//! are rendered in parallel: each worker owns its hit records and its own
//! seeded RNG, and rows are assembled into the output films afterward. The
//! per-row seeding keeps jittered renders reproducible under any thread
//! count.

use glim_core::{Hit, Scene};
use glim_math::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    film::Film,
    filter::{gaussian_downsample, FILTER_SCALE},
    options::RenderOptions,
    tracer::Tracer,
};

/// Samples per pixel when jittered supersampling is enabled.
const JITTER_SAMPLES: u32 = 16;

/// The three parallel output buffers of a render.
pub struct RenderOutput {
    /// Shaded color
    pub color: Film,
    /// Hit normals remapped from [-1, 1] to [0, 1]
    pub normals: Film,
    /// Hit distances normalized into the configured depth range
    pub depth: Film,
}

struct RenderedRow {
    color: Vec<Vec3>,
    normal: Vec<Vec3>,
    depth: Vec<Vec3>,
}

/// Render the scene into color, normal, and depth films.
pub fn render(scene: &Scene, options: &RenderOptions) -> RenderOutput {
    let scale = if options.filter { FILTER_SCALE } else { 1 };
    let width = options.width * scale;
    let height = options.height * scale;

    log::info!(
        "rendering {}x{} (bounces: {}, shadows: {}, jitter: {}, filter: {})",
        width,
        height,
        options.bounces,
        options.shadows,
        options.jitter,
        options.filter
    );

    let tracer = Tracer::new(scene, options);
    let rows: Vec<RenderedRow> = (0..height)
        .into_par_iter()
        .map(|y| render_row(&tracer, scene, options, width, height, y))
        .collect();

    let mut color = Film::new(width, height);
    let mut normals = Film::new(width, height);
    let mut depth = Film::new(width, height);
    for (y, row) in rows.into_iter().enumerate() {
        for x in 0..width {
            color.set(x, y as u32, row.color[x as usize]);
            normals.set(x, y as u32, row.normal[x as usize]);
            depth.set(x, y as u32, row.depth[x as usize]);
        }
    }

    if options.filter {
        color = gaussian_downsample(&color);
        normals = gaussian_downsample(&normals);
        depth = gaussian_downsample(&depth);
    }

    RenderOutput {
        color,
        normals,
        depth,
    }
}

fn render_row<'a>(
    tracer: &Tracer<'a>,
    scene: &'a Scene,
    options: &RenderOptions,
    width: u32,
    height: u32,
    y: u32,
) -> RenderedRow {
    let mut rng = StdRng::seed_from_u64(y as u64);
    let camera = scene.camera();
    let t_min = camera.t_min();

    let mut row = RenderedRow {
        color: Vec::with_capacity(width as usize),
        normal: Vec::with_capacity(width as usize),
        depth: Vec::with_capacity(width as usize),
    };

    for x in 0..width {
        let mut hit = Hit::new();
        let color = if options.jitter {
            let mut accumulated = Vec3::ZERO;
            for _ in 0..JITTER_SAMPLES {
                hit = Hit::new();
                let jx = x as f32 + (rng.gen::<f32>() * 2.0 - 1.0);
                let jy = y as f32 + (rng.gen::<f32>() * 2.0 - 1.0);
                let ray = camera.generate_ray(to_ndc(jx, jy, width, height));
                accumulated += tracer.trace_ray(&ray, t_min, options.bounces, &mut hit);
            }
            accumulated / JITTER_SAMPLES as f32
        } else {
            let ray = camera.generate_ray(to_ndc(x as f32, y as f32, width, height));
            tracer.trace_ray(&ray, t_min, options.bounces, &mut hit)
        };

        // The last sample's hit feeds the visualization buffers
        row.color.push(color);
        row.normal.push((hit.normal + Vec3::ONE) / 2.0);
        row.depth.push(depth_value(&hit, options));
    }

    row
}

/// Map pixel coordinates to normalized device coordinates in [-1, 1].
fn to_ndc(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        2.0 * (x / (width as f32 - 1.0)) - 1.0,
        2.0 * (y / (height as f32 - 1.0)) - 1.0,
    )
}

/// Depth visualization value: hit.t clamped into [depth_min, depth_max] and
/// normalized, or the background default for misses.
fn depth_value(hit: &Hit, options: &RenderOptions) -> Vec3 {
    if !hit.is_hit() {
        return Vec3::ZERO;
    }
    let range = options.depth_max - options.depth_min;
    if range <= 0.0 {
        return Vec3::ZERO;
    }
    let t = hit.t.clamp(options.depth_min, options.depth_max);
    Vec3::splat((t - options.depth_min) / range)
}
