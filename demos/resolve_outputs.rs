//! Example demonstrating project graph path resolution
//!
//! Shows which cache paths each pipeline step resolved to, without
//! importing anything.

use std::env;
use std::path::PathBuf;
use std::process;

use meshport_io::ProjectGraph;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <project.mg>", args[0]);
        process::exit(1);
    }

    let graph = ProjectGraph::load(&args[1])?;
    let outputs = graph.resolve();

    println!("Cache root: {}", graph.cache_root().display());
    println!();

    let describe = |label: &str, path: &Option<PathBuf>| match path {
        Some(path) => {
            let marker = if path.exists() { "ok" } else { "missing on disk" };
            println!("  {:<18} {} ({})", label, path.display(), marker);
        }
        None => println!("  {:<18} <node absent from graph>", label),
    };

    println!("Resolved outputs:");
    describe("cameras sfm:", &outputs.cameras_sfm);
    describe("sparse cloud:", &outputs.sparse_cloud);
    describe("undistorted dir:", &outputs.undistorted_dir);
    describe("dense mesh:", &outputs.dense_mesh);
    describe("textured mesh:", &outputs.textured_mesh);

    Ok(())
}
