//! Designer - procedural 3D shape generator with STL export

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use engine_core::seeded_rng;
use mesh::{export_stl, TriangleMesh};
use procgen::{BaseSurface, Design, DesignRequest, ModelConfig, ModelKind};

/// Designer - generate printable shapes from a random seed
#[derive(Parser, Debug)]
#[command(name = "designer")]
#[command(about = "Generate procedural 3D designs and export them as STL")]
#[command(version)]
struct Cli {
    /// Parameter-space file (RON). Defaults to ./designer.ron or built-in ranges.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model to generate: rsym or csym (random if omitted)
    #[arg(short, long)]
    model: Option<ModelKind>,

    /// Base surface for rsym: ellipsoid or torus (random if omitted)
    #[arg(long)]
    surface: Option<BaseSurface>,

    /// Seed of the first design; later designs use seed+1, seed+2, ...
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of designs to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Output directory for STL files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Write the built-in parameter space to this file and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        return config::write_default(path);
    }

    let model_config = config::load(cli.config.as_deref())?;
    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("could not create output directory {:?}", cli.output))?;

    let request = DesignRequest {
        model: cli.model.or_else(|| only_model(&model_config)),
        surface: cli.surface,
    };
    let first_seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Generating {} design(s) from seed {}", cli.count, first_seed);

    let mut failed_exports = 0;
    for i in 0..cli.count {
        let seed = first_seed.wrapping_add(i as u64);
        let mut rng = seeded_rng(seed);
        let design = procgen::design(&model_config, request, &mut rng)
            .with_context(|| format!("design generation failed for seed {}", seed))?;
        log_summary(seed, &design);

        // A failed export keeps the design; move on to the next seed.
        let path = stl_path(&cli.output, seed);
        if let Err(e) = export_stl(&path, &design.points, &design.grid.triangulation) {
            log::error!("Failed to export design {}: {}", seed, e);
            failed_exports += 1;
        }
    }

    if failed_exports > 0 {
        anyhow::bail!("{} of {} exports failed", failed_exports, cli.count);
    }
    Ok(())
}

/// With a single configured model there is nothing to draw.
fn only_model(config: &ModelConfig) -> Option<ModelKind> {
    match config.available_models().as_slice() {
        [model] => Some(*model),
        _ => None,
    }
}

fn stl_path(dir: &Path, seed: u64) -> PathBuf {
    dir.join(format!("design_{}.stl", seed))
}

fn log_summary(seed: u64, design: &Design) {
    let surface = design.surface.map(|s| s.name()).unwrap_or("profile");
    log::info!(
        "Design {}: {} ({}), {} points, {} facets",
        seed,
        design.model,
        surface,
        design.point_count(),
        design.triangle_count()
    );
    if let Some((min, max)) = TriangleMesh::new(&design.points, &design.grid.triangulation).bounds() {
        let dims = max - min;
        log::debug!("Dimensions: {:.3} x {:.3} x {:.3}", dims.x, dims.y, dims.z);
    }
    for (name, value) in design.parameters.values() {
        log::debug!("  {} = {:.4}", name, value);
    }
}
