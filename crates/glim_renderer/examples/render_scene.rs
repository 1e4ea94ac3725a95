//! Example: build a scene in code, render it, write PNGs.
//!
//! Scene construction and image encoding normally belong to external
//! collaborators (the scene parser and the image writer); this example
//! stands in for both.
//!
//! Run with: cargo run --release --example render_scene

use std::f32::consts::FRAC_PI_3;
use std::sync::Arc;

use anyhow::Result;
use glim_core::{MeshFace, MeshGeometry, Transformed, TriangleMesh};
use glim_renderer::{
    render, Background, Group, Light, Material, PerspectiveCamera, Plane, Primitive,
    RenderOptions, Scene, Sphere, Vec3,
};
use glim_math::Mat4;

fn main() -> Result<()> {
    env_logger::init();

    let scene = build_scene()?;
    let options = RenderOptions {
        width: 800,
        height: 600,
        bounces: 3,
        shadows: true,
        jitter: true,
        filter: false,
        depth_min: 5.0,
        depth_max: 15.0,
    };

    println!(
        "Rendering {}x{} with {} bounces...",
        options.width, options.height, options.bounces
    );
    let start = std::time::Instant::now();
    let output = render(&scene, &options);
    println!("Rendered in {:?}", start.elapsed());

    save_png(&output.color, "output.png")?;
    save_png(&output.normals, "normals.png")?;
    save_png(&output.depth, "depth.png")?;
    println!("Saved output.png, normals.png, depth.png");

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let red = Arc::new(Material::new(
        Vec3::new(0.8, 0.2, 0.2),
        Vec3::splat(0.3),
        32.0,
    ));
    let mirror = Arc::new(Material::new(
        Vec3::new(0.1, 0.1, 0.1),
        Vec3::splat(0.8),
        64.0,
    ));
    let ground = Arc::new(Material::diffuse(Vec3::new(0.4, 0.5, 0.4)));
    let gold = Arc::new(Material::new(
        Vec3::new(0.8, 0.6, 0.2),
        Vec3::splat(0.4),
        16.0,
    ));

    let mut group = Group::new();
    group.add(Primitive::Plane(Plane::new(
        Vec3::Y,
        -1.0,
        Arc::clone(&ground),
    )));
    group.add(Primitive::Sphere(Sphere::new(
        Vec3::new(-1.5, 0.0, -8.0),
        1.0,
        Arc::clone(&red),
    )));
    group.add(Primitive::Sphere(Sphere::new(
        Vec3::new(1.5, 0.0, -8.0),
        1.0,
        Arc::clone(&mirror),
    )));

    // A unit sphere squashed into an ellipsoid
    group.add(Primitive::Transform(Transformed::new(
        Mat4::from_translation(Vec3::new(0.0, -0.5, -6.0))
            * Mat4::from_scale(Vec3::new(1.2, 0.5, 0.8)),
        Primitive::Sphere(Sphere::new(Vec3::ZERO, 1.0, Arc::clone(&gold))),
    )?));

    // A small pyramid mesh
    group.add(Primitive::Mesh(pyramid_mesh(Arc::clone(&red))?));

    let camera = PerspectiveCamera::new(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -0.2, -1.0),
        Vec3::Y,
        FRAC_PI_3,
    )?;

    let lights = vec![
        Light::directional(Vec3::new(-0.5, -1.0, -0.5), Vec3::splat(0.7)),
        Light::point(Vec3::new(3.0, 4.0, -5.0), Vec3::splat(12.0), 0.1)?,
    ];

    let materials = vec![red, mirror, ground, gold];
    Ok(Scene::new(
        camera,
        Background::Solid(Vec3::new(0.15, 0.2, 0.3)),
        Vec3::splat(0.15),
        lights,
        materials,
        group,
    ))
}

fn pyramid_mesh(material: Arc<Material>) -> Result<TriangleMesh> {
    let geometry = MeshGeometry {
        positions: vec![
            Vec3::new(-1.0, -1.0, -11.0),
            Vec3::new(1.0, -1.0, -11.0),
            Vec3::new(1.0, -1.0, -13.0),
            Vec3::new(-1.0, -1.0, -13.0),
            Vec3::new(0.0, 1.0, -12.0),
        ],
        texcoords: Vec::new(),
        faces: vec![
            MeshFace {
                vertices: [0, 1, 4],
                texcoords: [0; 3],
            },
            MeshFace {
                vertices: [1, 2, 4],
                texcoords: [0; 3],
            },
            MeshFace {
                vertices: [2, 3, 4],
                texcoords: [0; 3],
            },
            MeshFace {
                vertices: [3, 0, 4],
                texcoords: [0; 3],
            },
            MeshFace {
                vertices: [1, 0, 3],
                texcoords: [0; 3],
            },
            MeshFace {
                vertices: [1, 3, 2],
                texcoords: [0; 3],
            },
        ],
    };
    Ok(TriangleMesh::new(geometry, material)?)
}

fn save_png(film: &glim_renderer::Film, path: &str) -> Result<()> {
    image::save_buffer(
        path,
        &film.to_rgba(),
        film.width,
        film.height,
        image::ColorType::Rgba8,
    )?;
    Ok(())
}
