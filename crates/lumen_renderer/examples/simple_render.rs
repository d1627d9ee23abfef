//! Renders a small lit scene to PNG.
//!
//! Usage: `cargo run --example simple_render -- [settings.json] [output.png]`
//!
//! The optional settings file holds a JSON `RenderSettings`, for example
//! `{"adaptive_depth": 3, "parallelism": "auto", "print_interval": 10}`.

use std::sync::Arc;

use anyhow::{Context, Result};
use lumen_core::{
    AmbientLight, Cuboid, Cylinder, Geometry, Material, Plane, PointLight, Scene, Sphere,
    SpotLight, Triangle,
};
use lumen_math::{Color, Point, Ray, Vector};
use lumen_renderer::{
    CameraConfig, ImageWriter, Parallelism, RayTracerKind, RenderSettings,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {path}"))?;
            serde_json::from_str(&json).context("parsing render settings")?
        }
        None => RenderSettings {
            adaptive_depth: 3,
            parallelism: Parallelism::Auto,
            print_interval: 10.0,
            ..Default::default()
        },
    };
    let output = args.next().unwrap_or_else(|| "output/simple_render.png".to_string());

    let scene = build_scene()?;
    log::info!(
        "Scene '{}': {} geometries, {} lights",
        scene.name,
        scene.geometry_count(),
        scene.light_count()
    );

    let (width, height) = (800, 600);
    let camera = CameraConfig::new()
        .with_location(Point::new(0.0, 60.0, 1000.0))
        .with_target(Point::new(0.0, 0.0, -100.0))
        .with_vp_size(200.0, 150.0)
        .with_vp_distance(1000.0)
        .with_resolution(width, height)
        .with_ray_tracer(Arc::new(scene), RayTracerKind::Simple)
        .with_settings(settings)
        .build()?;

    let mut writer = ImageWriter::new(&output, width, height);
    camera.render_image(&mut writer)?;
    println!("Saved to {}", writer.path().display());

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new("simple render")
        .with_background(Color::new(10.0, 12.0, 25.0))
        .with_ambient_light(AmbientLight::scaled(Color::new(255.0, 255.0, 255.0), 0.1));

    let floor = Material::new().with_kd(0.5).with_ks(0.3).with_shininess(20).with_kr(0.2);
    scene.add_geometry(
        Geometry::new(Plane::new(Point::new(0.0, -50.0, 0.0), Vector::AXIS_Y))
            .with_emission(Color::new(20.0, 20.0, 20.0))
            .with_material(floor),
    );

    // glass ball with a solid core
    scene.add_geometry(
        Geometry::new(Sphere::new(Point::new(-40.0, 0.0, -100.0), 50.0))
            .with_emission(Color::new(0.0, 0.0, 60.0))
            .with_material(
                Material::new()
                    .with_kd(0.2)
                    .with_ks(0.4)
                    .with_shininess(100)
                    .with_kt(0.6),
            ),
    );
    scene.add_geometry(
        Geometry::new(Sphere::new(Point::new(-40.0, 0.0, -100.0), 20.0))
            .with_emission(Color::new(120.0, 30.0, 0.0))
            .with_material(Material::new().with_kd(0.6).with_ks(0.2).with_shininess(30)),
    );

    scene.add_geometry(
        Geometry::new(Cuboid::new(
            Point::new(30.0, -50.0, -180.0),
            Point::new(90.0, 10.0, -120.0),
        )?)
        .with_emission(Color::new(40.0, 80.0, 40.0))
        .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(60)),
    );

    let axis = Ray::new(Point::new(80.0, -50.0, -40.0), Vector::AXIS_Y);
    scene.add_geometry(
        Geometry::new(Cylinder::new(axis, 15.0, 70.0))
            .with_emission(Color::new(70.0, 20.0, 70.0))
            .with_material(Material::new().with_kd(0.4).with_ks(0.6).with_shininess(80)),
    );

    // mirror panel behind the scene
    scene.add_geometry(
        Geometry::new(Triangle::new(
            Point::new(-200.0, -50.0, -300.0),
            Point::new(200.0, -50.0, -300.0),
            Point::new(0.0, 200.0, -300.0),
        )?)
        .with_emission(Color::new(5.0, 5.0, 5.0))
        .with_material(Material::new().with_kr(0.7)),
    );

    scene.add_light(
        SpotLight::new(
            Color::new(900.0, 600.0, 400.0),
            Point::new(-100.0, 150.0, 50.0),
            Vector::new(1.0, -1.5, -1.5)?,
        )
        .with_kl(0.0005)
        .with_kq(0.00002)
        .with_beam_exponent(4.0),
    );
    scene.add_light(
        PointLight::new(Color::new(300.0, 300.0, 350.0), Point::new(150.0, 120.0, 100.0))
            .with_kl(0.0004)
            .with_kq(0.00001),
    );

    Ok(scene)
}
