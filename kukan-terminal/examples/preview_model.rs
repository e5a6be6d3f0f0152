/// Example: Inspect an OBJ model the way the viewer will see it
///
/// Usage: cargo run --example preview_model -- path/to/file.obj

use anyhow::Context;
use kukan_core::config;
use kukan_core::edges::{self, DEFAULT_FEATURE_ANGLE_DEG};
use kukan_core::loader::{FsModelSource, ModelSource};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let (root, name) = if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using the bundled cube...");
        let config = config::load_default()?;
        (config.asset_root().join("models"), "cube.obj".to_string())
    } else {
        let path = PathBuf::from(&args[1]);
        let parent = path.parent().map(PathBuf::from).unwrap_or_default();
        let name = path
            .file_name()
            .context("path has no file name")?
            .to_string_lossy()
            .into_owned();
        (parent, name)
    };

    let source = FsModelSource::new(root);
    let mesh = source
        .load(&name)
        .with_context(|| format!("loading {name}"))?;

    let features = edges::feature_edges(&mesh, DEFAULT_FEATURE_ANGLE_DEG);
    let total_length: f32 = features.iter().map(|edge| edge.length()).sum();

    println!("Model: {name}");
    println!("  positions:     {}", mesh.positions.len());
    println!("  triangles:     {}", mesh.triangles.len());
    println!("  feature edges: {}", features.len());
    println!("  edge length:   {total_length:.3}");
    if let Some((min, max)) = mesh.bounds() {
        println!(
            "  bounds:        ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(())
}
