// Cantus generator: CLI entry point.
//
// Builds an uncomposed song from a config, runs the seeded compose pass, and
// prints a summary. The pipeline: load config -> build skeleton -> compose
// -> report.
//
// Usage:
//   cargo run -p cantus_compose -- [config.json] [--seed N] [--parallel]
//     [--sections N]
//
// Set RUST_LOG=debug to see per-section compose logging.

use cantus_compose::BranchCompose;
use cantus_compose::config::GeneratorConfig;
use cantus_compose::skeleton::build_skeleton;
use cantus_compose::summary::{render, stats};
use cantus_prng::CantusRng;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let config_path = args.get(1).filter(|s| !s.starts_with("--"));

    println!("=== Cantus Generator ===");

    println!("[1/4] Loading config...");
    let mut config = match config_path {
        Some(path) => match GeneratorConfig::load(Path::new(path)) {
            Ok(c) => {
                println!("  Loaded {}.", path);
                c
            }
            Err(e) => {
                eprintln!("  Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("  Using default config.");
            GeneratorConfig::default()
        }
    };
    if let Some(seed) = parse_flag(&args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(sections) = parse_flag(&args, "--sections") {
        config.skeleton.sections = sections;
    }
    if args.iter().any(|a| a == "--parallel") {
        config.parallel = true;
    }
    let seed = config.seed.unwrap_or_else(clock_seed);
    println!("  Seed: {}", seed);
    println!("  Parallel: {}", config.parallel);

    println!("[2/4] Building skeleton ({} sections)...", config.skeleton.sections);
    // Ids come from their own stream so they do not shift with compose draws.
    let mut ids = CantusRng::new(seed);
    let mut song = match build_skeleton(&config.skeleton, &mut ids) {
        Ok(song) => song,
        Err(e) => {
            eprintln!("  Invalid skeleton: {}", e);
            std::process::exit(1);
        }
    };
    println!("  {} notes across {:.1}s.", song.note_count(), song.duration());

    println!("[3/4] Composing...");
    let compose_seed = cantus_prng::branch_seed(seed, 1);
    if config.parallel {
        song.par_compose_seeded(compose_seed);
    } else {
        song.compose_seeded(compose_seed);
    }

    println!("[4/4] Summary");
    let s = stats(&song);
    println!(
        "  {} sections, {} layers, {} melodies, {} notes",
        s.sections, s.layers, s.melodies, s.notes
    );
    println!("  Degree histogram: {:?}", s.degree_histogram);
    println!();
    print!("{}", render(&song));
}

/// Seed derived from the wall clock, for runs without `--seed`.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
