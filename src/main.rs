//! Life Board CLI - Run Game of Life simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use life_board::{
    animation::{AnimationRecorder, RecorderConfig},
    compute::{GenerationStats, LifeGrid},
    schema::SimulationConfig,
};

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
        eprintln!("Usage: {} <config.json> [steps]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  steps        Number of generations (overrides config)");
        eprintln!();
        eprintln!("Example configuration is printed with --example.");
        process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        process::exit(1);
    });

    let mut config: SimulationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        process::exit(1);
    });

    if let Some(steps) = args.get(2) {
        config.steps = steps.parse().unwrap_or_else(|e| {
            eprintln!("Invalid step count {:?}: {}", steps, e);
            process::exit(1);
        });
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        process::exit(1);
    }
    log::info!("Loaded config from {}", config_path.display());

    let mut grid = config
        .seed
        .build(config.width, config.height)
        .unwrap_or_else(|e| {
            eprintln!("Error building seed: {}", e);
            process::exit(1);
        });

    println!("Life Board Simulation");
    println!("=====================");
    println!("Board: {}x{}", grid.width(), grid.height());
    println!("Steps: {}", config.steps);
    println!();

    let initial = GenerationStats::from_grid(0, &grid);
    println!("Initial population: {}", initial.population);

    let mut recorder = config.recording.as_ref().map(|recording| {
        log::info!("Recording generations to {}", recording.path.display());
        let mut recorder = AnimationRecorder::new(
            &recording.path,
            grid.width(),
            grid.height(),
            RecorderConfig::from(recording),
        )
        .unwrap_or_else(|e| {
            eprintln!("Error creating recording: {}", e);
            process::exit(1);
        });
        record(&mut recorder, &grid);
        recorder
    });

    let start = Instant::now();
    let mut last = initial;

    for generation in 1..=config.steps {
        let before = grid.clone();
        grid.step();

        last = GenerationStats::between(generation, &before, &grid);
        log::debug!("{}", last);

        if let Some(recorder) = recorder.as_mut() {
            record(recorder, &grid);
        }

        if last.is_static() {
            log::info!("Board is static after generation {}", generation);
        }

        // Print progress every 10%
        if generation % (config.steps / 10).max(1) == 0 {
            println!(
                "  Generation {}/{}: population={}, births={}, deaths={}",
                generation, config.steps, last.population, last.births, last.deaths
            );
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("Final population: {}", last.population);
    println!(
        "Time: {:.3}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        config.steps as f32 / elapsed.as_secs_f32().max(f32::EPSILON)
    );

    if let Some(recorder) = recorder {
        match recorder.finalize() {
            Ok(stats) => println!("Recording: {}", stats),
            Err(e) => {
                eprintln!("Error finalizing recording: {}", e);
                process::exit(1);
            }
        }
    }

    if let Some(output) = &config.output {
        save(&grid, output);
    }
}

fn record(recorder: &mut AnimationRecorder, grid: &LifeGrid) {
    if let Err(e) = recorder.record_frame(grid) {
        eprintln!("Error recording generation: {}", e);
        process::exit(1);
    }
}

fn save(grid: &LifeGrid, path: &Path) {
    match grid.save(path) {
        Ok(()) => log::info!("Saved final board to {}", path.display()),
        Err(e) => {
            eprintln!("Error saving board: {}", e);
            process::exit(1);
        }
    }
}

fn print_example_config() {
    let config = SimulationConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
