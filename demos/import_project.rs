//! Example demonstrating a full Meshroom project import
//!
//! Imports cameras, the sparse cloud and meshes from a .mg file and
//! prints a summary of the resulting scene.

use std::env;
use std::process;

use meshport_core::{Drawable, Scene};
use meshport_import::{ImportOptions, Importer};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <project.mg>", args[0]);
        eprintln!("Example: {} scan/basket.mg", args[0]);
        process::exit(1);
    }

    let project = &args[1];
    println!("Importing Meshroom project: {}", project);
    println!("{}", "=".repeat(50));

    let options = ImportOptions {
        dense: true,
        ..ImportOptions::default()
    };

    let mut scene = Scene::new();
    let report = Importer::new(options).import(project, &mut scene)?;

    println!("Render resolution: {}x{}", scene.render.resolution_x, scene.render.resolution_y);
    println!();

    println!("Cameras ({}):", report.cameras);
    for camera in scene.cameras().iter().take(5) {
        let position = camera.transform.translation_part();
        println!(
            "  {}: lens {:.2}mm, sensor {:.1}mm, shift ({:.4}, {:.4}), at ({:.3}, {:.3}, {:.3})",
            camera.name,
            camera.lens,
            camera.sensor_width,
            camera.shift_x,
            camera.shift_y,
            position.x,
            position.y,
            position.z,
        );
    }
    if report.cameras > 5 {
        println!("  ... and {} more", report.cameras - 5);
    }
    println!();

    for cloud in scene.point_clouds() {
        let (min, max) = cloud.points.bounding_box();
        println!("Point cloud '{}': {} points", cloud.name, cloud.points.len());
        println!(
            "  Bounding box: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    for mesh in scene.meshes() {
        println!(
            "Mesh '{}': {} vertices, {} faces, UVs: {}",
            mesh.name,
            mesh.mesh.vertex_count(),
            mesh.mesh.face_count(),
            mesh.mesh.uvs.is_some()
        );
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}
