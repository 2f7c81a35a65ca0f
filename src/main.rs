//! BioGenesis CLI - Run the engine headless from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use biogenesis::{DisplayGeometry, Engine, EngineConfig, FrameStats};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [frames] [WIDTHxHEIGHT]", args[0]);
        eprintln!();
        eprintln!("Run BioGenesis headless from a JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json   Path to engine configuration file");
        eprintln!("  frames        Number of frames to run (default: 1000)");
        eprintln!("  WIDTHxHEIGHT  Display size in pixels (default: 1280x720)");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let frames: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1000);
    let display = match args.get(3) {
        Some(size) => parse_display(size).unwrap_or_else(|| {
            eprintln!("Invalid display size '{}', expected WIDTHxHEIGHT", size);
            std::process::exit(1);
        }),
        None => DisplayGeometry::default(),
    };

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: EngineConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("BioGenesis");
    println!("==========");
    println!("Display: {}x{}", display.width, display.height);
    println!("Size bounds: {:?}", config.size_bounds());
    println!("Reset time: {} frames", config.reset_time);
    println!("Frames: {}", frames);
    println!();

    let mut engine = Engine::new(display, config).unwrap_or_else(|e| {
        eprintln!("Error starting engine: {}", e);
        std::process::exit(1);
    });

    if let Some(stats) = engine.stats() {
        println!("Initial epoch:");
        print_stats(&stats);
        println!();
    }

    println!("Running...");
    let start = Instant::now();
    let mut rects_drawn = 0u64;

    for i in 0..frames {
        let visible = engine.on_frame().unwrap_or_else(|e| {
            eprintln!("Error advancing frame: {}", e);
            std::process::exit(1);
        });
        rects_drawn += visible.count() as u64;

        // Print progress every 10%
        if (i + 1) % (frames / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            let fps = (i + 1) as f32 / elapsed;
            if let Some(stats) = engine.stats() {
                println!(
                    "  Frame {}/{}: epoch={}, mode={:?}, live={}, {:.1} frames/s",
                    i + 1,
                    frames,
                    stats.epoch,
                    stats.mode,
                    stats.live_cells,
                    fps
                );
            }
        }
    }

    let elapsed = start.elapsed();

    println!();
    if let Some(stats) = engine.stats() {
        println!("Final epoch:");
        print_stats(&stats);
        println!();
    }
    println!("Epochs created: {}", engine.epochs_created());
    println!("Rectangles drawn: {}", rects_drawn);
    println!(
        "Time: {:.2}s ({:.1} frames/s)",
        elapsed.as_secs_f32(),
        frames as f32 / elapsed.as_secs_f32()
    );

    engine.shutdown();
}

fn parse_display(size: &str) -> Option<DisplayGeometry> {
    let (w, h) = size.split_once('x')?;
    let display = DisplayGeometry::new(w.parse().ok()?, h.parse().ok()?);
    display.validate().ok()?;
    Some(display)
}

fn print_stats(stats: &FrameStats) {
    println!("  Epoch: {} ({:?}, {:?})", stats.epoch, stats.mode, stats.ruleset);
    println!(
        "  Grid: {}x{} cells of {}x{} px",
        stats.width, stats.height, stats.cell_size_x, stats.cell_size_y
    );
    println!("  Ramp length: {}", stats.max_color);
    println!("  Live cells: {}", stats.live_cells);
}

fn print_example_config() {
    let config = EngineConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
