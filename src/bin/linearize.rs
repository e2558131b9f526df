use std::path::PathBuf;

use clap::Parser;
use linearize::{
    display::{Report, Scoreboard},
    error::Error,
    Dataset, Linearizer, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};

/// Finds the chain of transforms of y that makes paired (x, y) data a straight line.
#[derive(Debug, Parser)]
#[command(name = "linearize", version, about)]
struct Cli {
    /// JSON dataset: {"x": {"title": .., "values": [..]}, "y": {..}} or [[x, y], ..]
    file: PathBuf,

    /// Highest acceptable RMSE of the transformed data around its trend line
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Give up after this many steps
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Print the score of every transform for the first step
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "linearize=debug" } else { "linearize=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        if let Error::NoConvergence { best, .. } = &e {
            eprintln!();
            eprintln!("Best state reached:");
            eprintln!("  Transform:   {}", best.best_chain());
            eprintln!("  RMSE:        {:.5}", best.rmse);
            eprintln!("  Iterations:  {}", best.iterations);
            eprintln!("  Applied:     {}", best.applied());
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let data = Dataset::<f64>::load(&cli.file)?;
    tracing::info!(points = data.len(), file = %cli.file.display(), "loaded dataset");

    if cli.verbose {
        let board = linearize::evaluate_catalog(data.x(), data.y())?;
        println!("[ First step: {} transforms evaluated ]\n", board.len());
        println!("{}", Scoreboard::new(&board));
    }

    let linearizer = Linearizer::new()
        .threshold(cli.threshold)
        .max_iterations(cli.max_iterations);
    let result = data.linearize(&linearizer)?;

    println!("{}", Report::for_dataset(&data, &result)?);
    Ok(())
}
