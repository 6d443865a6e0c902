//! meshport - Meshroom project importer
//!
//! Two commands: `import` turns a `.mg` project and its cache into a
//! scene description, `update-focal` copies tuned camera parameters to
//! all imported view cameras of a saved scene.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meshport_core::{ImageDepth, Scene};
use meshport_import::{propagate_focal, ImportOptions, Importer};

#[derive(Parser, Debug)]
#[command(name = "meshport")]
#[command(about = "Import Meshroom photogrammetry projects into a portable scene description")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import cameras, sparse cloud and meshes from a .mg project file
    Import {
        /// Meshroom project file (.mg)
        project: PathBuf,

        /// Do not import views as cameras
        #[arg(long)]
        skip_views: bool,

        /// Use the original images instead of the undistorted ones
        #[arg(long)]
        no_undistorted: bool,

        /// Composite background images in front of or behind geometry
        #[arg(long, value_enum, default_value = "front")]
        image_depth: DepthArg,

        /// Do not import the sparse SfM point cloud
        #[arg(long)]
        skip_sparse: bool,

        /// Import the dense mesh
        #[arg(long)]
        dense: bool,

        /// Do not import the textured mesh
        #[arg(long)]
        skip_textured: bool,

        /// Write the resulting scene as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy focal/shift/sensor parameters from one camera to all view cameras
    UpdateFocal {
        /// Scene JSON produced by `import --output`
        scene: PathBuf,

        /// Name of the source camera, e.g. "View 1001"
        #[arg(long)]
        source: String,

        /// Output path; rewrites the input scene when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DepthArg {
    Front,
    Back,
}

impl From<DepthArg> for ImageDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Front => ImageDepth::Front,
            DepthArg::Back => ImageDepth::Back,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::Import {
            project,
            skip_views,
            no_undistorted,
            image_depth,
            skip_sparse,
            dense,
            skip_textured,
            output,
        } => {
            let options = ImportOptions {
                views: !skip_views,
                undistorted: !no_undistorted,
                image_depth: image_depth.into(),
                sparse: !skip_sparse,
                dense,
                textured: !skip_textured,
            };

            let mut scene = Scene::new();
            let report = Importer::new(options)
                .import(&project, &mut scene)
                .with_context(|| format!("failed to import {}", project.display()))?;

            println!(
                "Imported {} cameras, {} meshes, {} sparse points",
                report.cameras, report.meshes, report.sparse_points
            );
            if !report.warnings.is_empty() {
                println!("{} warning(s); see the log above", report.warnings.len());
            }

            if let Some(output) = output {
                write_scene(&scene, &output)?;
                println!("Scene written to {}", output.display());
            }
        }
        Command::UpdateFocal {
            scene: scene_path,
            source,
            output,
        } => {
            let text = std::fs::read_to_string(&scene_path)
                .with_context(|| format!("failed to read {}", scene_path.display()))?;
            let mut scene: Scene = serde_json::from_str(&text)
                .with_context(|| format!("invalid scene file {}", scene_path.display()))?;

            let updated = propagate_focal(&mut scene, &source)?;
            println!("Updated {} camera(s) from {:?}", updated, source);

            let output = output.unwrap_or(scene_path);
            write_scene(&scene, &output)?;
            println!("Scene written to {}", output.display());
        }
    }

    Ok(())
}

fn write_scene(scene: &Scene, path: &PathBuf) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, scene)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
