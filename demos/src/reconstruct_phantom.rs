//! Phantom Reconstruction
//!
//! End-to-end run of the reconstruction pipeline:
//! 1. Build a synthetic CT phantom
//! 2. Reconstruct the iso-surface with a progress bar on a separate thread
//! 3. Print mesh statistics
//! 4. Export the mesh as OBJ
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin reconstruct_phantom -- output/bone.obj --preset bone --workers 8
//! RUST_LOG=debug cargo run --release --bin reconstruct_phantom -- output/skin.obj --iso -300
//! ```

use std::env;
use std::io::Write;
use std::path::Path;
use std::thread;

use instant::Instant;

use ctsurf::{
    progress_channel, MarchingCubes, MeshStats, ReconstructionConfig, ReconstructionObserver,
    TissuePreset,
};
use ctsurf_demos::{ct_phantom, ObjWriter};

/// Prints whole-percent progress on one line.
struct ConsoleProgress;

impl ReconstructionObserver for ConsoleProgress {
    fn on_reconstruction_started(&self) {
        println!("  Reconstruction started");
    }

    fn on_progress(&self, fraction: f32) {
        print!("  Progress: {:3.0}%\r", fraction * 100.0);
        std::io::stdout().flush().ok();
    }

    fn on_reconstruction_finished(&self) {
        println!("  Progress: 100%");
    }
}

struct Args {
    output: String,
    config: ReconstructionConfig,
    size: usize,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut output = "output/phantom.obj".to_string();
    let mut config = ReconstructionConfig::from_preset(TissuePreset::Bone);
    let mut size = 128;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{} needs a value", name));
        match arg.as_str() {
            "--preset" => {
                let preset = value("--preset")?
                    .parse::<TissuePreset>()
                    .map_err(|e| e.to_string())?;
                config = config.with_iso_value(preset.iso_value());
            }
            "--iso" => {
                let iso = value("--iso")?
                    .parse::<i16>()
                    .map_err(|e| format!("--iso: {}", e))?;
                config = config.with_iso_value(iso);
            }
            "--workers" => {
                let workers = value("--workers")?
                    .parse::<usize>()
                    .map_err(|e| format!("--workers: {}", e))?;
                config = config.with_max_workers(workers);
            }
            "--size" => {
                size = value("--size")?
                    .parse::<usize>()
                    .map_err(|e| format!("--size: {}", e))?;
            }
            other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
            other => output = other.to_string(),
        }
    }

    Ok(Args {
        output,
        config,
        size,
    })
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          ctsurf Phantom Reconstruction");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: reconstruct_phantom [output.obj] [--preset bone|soft-tissue|fat] \
                 [--iso N] [--workers N] [--size N]"
            );
            std::process::exit(2);
        }
    };

    if let Some(parent) = Path::new(&args.output).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // =========================================================================
    // Step 1: Build phantom
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Build CT Phantom                                    │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let dims = (args.size, args.size * 3 / 4, args.size / 2);
    let spacing = [0.7, 0.7, 1.25];
    let start = Instant::now();
    let volume = match ct_phantom(dims, spacing) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error building phantom: {}", e);
            std::process::exit(1);
        }
    };
    println!("  Dimensions:      {} x {} x {}", dims.0, dims.1, dims.2);
    println!("  Spacing:         {:?}", spacing);
    println!("  Build time:      {:.3}s", start.elapsed().as_secs_f64());
    println!();

    // =========================================================================
    // Step 2: Reconstruct
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Marching Cubes                                      │");
    println!("└─────────────────────────────────────────────────────────────┘");
    println!("  Iso value:       {}", args.config.iso_value);
    println!("  Workers:         {}", args.config.max_workers);

    let mc = match MarchingCubes::new(args.config) {
        Ok(mc) => mc,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let (observer, mut receiver) = progress_channel();
    let ui = thread::spawn(move || receiver.forward_to(&ConsoleProgress));

    let start = Instant::now();
    let result = mc.reconstruct_with_observer(&volume, &observer);
    drop(observer);
    let elapsed = start.elapsed();
    ui.join().ok();

    let mesh = match result {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Error reconstructing: {}", e);
            std::process::exit(1);
        }
    };

    let stats = MeshStats::from_mesh(&mesh);
    println!("  Triangles:       {}", stats.triangle_count);
    println!("  Vertices:        {}", stats.vertex_count);
    println!("  Surface area:    {:.1} mm²", stats.surface_area);
    println!(
        "  Bounding box:    ({:.1}, {:.1}, {:.1}) → ({:.1}, {:.1}, {:.1})",
        stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z,
        stats.bbox_max.x, stats.bbox_max.y, stats.bbox_max.z
    );
    println!("  Time:            {:.3}s", elapsed.as_secs_f64());
    println!();

    // =========================================================================
    // Step 3: Export
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Export OBJ                                          │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    if let Err(e) = ObjWriter::new().save(&mesh, &args.output) {
        eprintln!("Error writing '{}': {}", args.output, e);
        std::process::exit(1);
    }
    println!("  Output:          {}", args.output);
    println!("  Write time:      {:.3}s", start.elapsed().as_secs_f64());
}
