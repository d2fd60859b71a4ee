//! # Headless Field Simulation
//!
//! Runs the token field against a recording surface and prints what a
//! browser would have drawn.
//!
//! ## Usage
//!
//! ```bash
//! field_sim --width 1200 --height 800 --dpr 2 --frames 600 --seed 7
//! field_sim --reduced --config data/codefield.toml
//! ```

use std::time::Instant;

use codefield_core::{
    BlendMode, DrawCommand, FrameLoop, PageConfig, PointerState, RecordingSurface, TokenField, Viewport,
};

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CODEFIELD - HEADLESS TOKEN FIELD                         ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut width = 1200.0f64;
    let mut height = 800.0f64;
    let mut dpr = 1.0f64;
    let mut reduced = false;
    let mut frames = 600u64;
    let mut seed = 7u64;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    width = args[i + 1].parse().unwrap_or(width);
                    i += 1;
                }
            }
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    height = args[i + 1].parse().unwrap_or(height);
                    i += 1;
                }
            }
            "--dpr" => {
                if i + 1 < args.len() {
                    dpr = args[i + 1].parse().unwrap_or(dpr);
                    i += 1;
                }
            }
            "--frames" | "-f" => {
                if i + 1 < args.len() {
                    frames = args[i + 1].parse().unwrap_or(frames);
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().unwrap_or(seed);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--reduced" | "-r" => reduced = true,
            "--help" => {
                println!("Usage: field_sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -w, --width <PX>       Viewport width in CSS px (default: 1200)");
                println!("  -h, --height <PX>      Viewport height in CSS px (default: 800)");
                println!("      --dpr <RATIO>      Device pixel ratio (default: 1)");
                println!("  -r, --reduced          Simulate prefers-reduced-motion");
                println!("  -f, --frames <N>       Frames to simulate (default: 600)");
                println!("  -s, --seed <SEED>      Random seed (default: 7)");
                println!("  -c, --config <PATH>    TOML configuration file");
                println!("      --help             Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {other}");
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match PageConfig::from_toml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {path}: {e}");
                std::process::exit(1);
            }
        },
        None => PageConfig::default(),
    };

    let viewport = match Viewport::new(width, height) {
        Ok(viewport) => viewport
            .with_device_pixel_ratio(dpr)
            .with_reduced_motion(reduced),
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let field = match TokenField::with_seed(config.field, viewport, seed) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let (bw, bh) = field.backing_size();
    println!("Viewport:   {width}x{height} @{}x (backing {bw}x{bh})", field.dpr());
    println!("Compact:    {}", field.viewport().is_compact(field.config().mobile_breakpoint));
    println!("Tokens:     {}", field.token_count());
    println!("Frames:     {frames}");
    println!();

    let mut frame_loop = FrameLoop::new(field);
    let _stop = frame_loop.start();
    let mut surface = RecordingSurface::new();

    let mut min_alpha = 1.0f64;
    let mut max_alpha = 0.0f64;
    let mut wrapped = 0usize;
    let start = Instant::now();

    for frame in 0..frames {
        // Sweep the pointer across the viewport once over the run.
        let sweep = frame as f64 / frames.max(1) as f64;
        frame_loop
            .field_mut()
            .set_pointer(PointerState { nx: sweep - 0.5, ny: 0.5 - sweep });

        match frame_loop.step(&mut surface) {
            codefield_core::FrameOutcome::Continue(stats) => {
                min_alpha = min_alpha.min(stats.min_alpha);
                max_alpha = max_alpha.max(stats.max_alpha);
                wrapped += stats.wrapped;
            }
            codefield_core::FrameOutcome::Stopped => break,
        }
    }

    let elapsed = start.elapsed();
    let field = frame_loop.into_field();
    let texts = surface.texts().count();
    let glows = surface.circles().count();
    let additive = surface
        .circles()
        .filter(|c| matches!(c, DrawCommand::Circle { blend: BlendMode::Additive, .. }))
        .count();

    println!("════════════════════════════════════════════════════════════════════");
    println!("Simulated {} frames in {:.2}ms ({:.1}µs/frame)",
        field.frame_count(),
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1e6 / frames.max(1) as f64,
    );
    println!("Last frame: {texts} labels, {glows} glows ({additive} additive)");
    println!("Alpha:      {min_alpha:.3} .. {max_alpha:.3}");
    println!("Wraps:      {wrapped}");
}
