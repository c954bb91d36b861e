//! Puzzle Benchmark CLI

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use puzzle_bench::{
    config::{load_env_file, Config},
    providers::ProviderRegistry,
    puzzles::{builtin_puzzles, load_puzzles_from_json_file, Puzzle},
    reporting::{print_artifacts, print_console_report, write_run},
    runner::{ConsoleProgress, Evaluator, PuzzleSolver},
};

#[derive(Parser)]
#[command(name = "puzzle-bench")]
#[command(about = "Evaluate LLM providers on single-word puzzles")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for results (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Env file with API keys (defaults to a `.env` in the working directory or above)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("puzzle_bench=debug,info")
    } else {
        EnvFilter::new("puzzle_bench=info,warn")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    load_env_file(cli.env_file.as_deref());

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load_or_default(),
    };

    let puzzles: Vec<Puzzle> = match &config.run.puzzles {
        Some(path) => load_puzzles_from_json_file(path)?,
        None => builtin_puzzles()?,
    };
    let models = config.selected_models();

    println!("=== Puzzle Benchmark ===");
    println!("Puzzles: {}", puzzles.len());
    println!(
        "Models:  {}",
        models.iter().map(|m| m.name()).collect::<Vec<_>>().join(", ")
    );
    println!();

    let solver = PuzzleSolver::new(ProviderRegistry::from_config(&config));
    let evaluator = Evaluator::new(solver).with_progress(Arc::new(ConsoleProgress));
    let run = evaluator.run(&puzzles, &models).await;

    print_console_report(&run.report);

    let results_dir = cli.output.unwrap_or_else(|| config.run.results_dir.clone());
    let artifacts = write_run(&results_dir, &run)?;
    print_artifacts(&artifacts);

    Ok(())
}
