//! Worker Scaling
//!
//! Reconstructs the same phantom with increasing worker counts, checks that
//! every run yields the identical mesh, and reports the speedup over a single
//! worker.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin worker_scaling
//! cargo run --release --bin worker_scaling -- --large
//! ```

use std::env;

use instant::Instant;

use ctsurf::{MarchingCubes, Mesh, ReconstructionConfig, TissuePreset, DEFAULT_MAX_WORKERS};
use ctsurf_demos::ct_phantom;

const WORKER_COUNTS: [usize; 6] = [1, 2, 4, 8, 16, DEFAULT_MAX_WORKERS];
const ITERATIONS: usize = 3;

fn time_reconstruction(mc: &MarchingCubes, volume: &ctsurf::VolumeGrid) -> ctsurf::Result<(Mesh, f64)> {
    let mut best = f64::MAX;
    let mut mesh = Mesh::new();
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        mesh = mc.reconstruct(volume)?;
        best = best.min(start.elapsed().as_secs_f64());
    }
    Ok((mesh, best))
}

fn run() -> ctsurf::Result<()> {
    let large = env::args().any(|a| a == "--large");
    let dims = if large { (384, 288, 192) } else { (160, 120, 80) };

    println!("═══════════════════════════════════════════════════════════════");
    println!("          ctsurf Worker Scaling");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Volume:          {} x {} x {}", dims.0, dims.1, dims.2);
    println!("  Threshold:       bone ({})", TissuePreset::Bone.iso_value());
    println!("  Iterations:      {} (best time reported)", ITERATIONS);
    println!();

    let volume = ct_phantom(dims, [0.7, 0.7, 1.25])?;
    let cells = ((dims.0 - 1) * (dims.1 - 1) * (dims.2 - 1)) as f64;

    println!("  Workers   Time (s)   Mcells/s   Speedup   Triangles");
    println!("  ───────   ────────   ────────   ───────   ─────────");

    let mut reference: Option<(Mesh, f64)> = None;
    for workers in WORKER_COUNTS {
        let config = ReconstructionConfig::from_preset(TissuePreset::Bone).with_max_workers(workers);
        let mc = MarchingCubes::new(config)?;
        let (mesh, secs) = time_reconstruction(&mc, &volume)?;

        let speedup = reference.as_ref().map_or(1.0, |(_, base)| base / secs);
        println!(
            "  {:>7}   {:>8.3}   {:>8.1}   {:>6.2}x   {:>9}",
            workers,
            secs,
            cells / secs / 1e6,
            speedup,
            mesh.triangle_count()
        );

        match &reference {
            Some((expected, _)) if *expected != mesh => {
                log::error!("Mesh with {} workers differs from the single-worker mesh", workers);
            }
            Some(_) => {}
            None => reference = Some((mesh, secs)),
        }
    }

    println!();
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
