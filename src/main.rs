use std::path::PathBuf;

use clap::Parser;

mod runner;

/// Batch prey-detection runner for pet-door match images.
#[derive(Debug, Parser)]
#[command(name = "preygate", version, about)]
struct Args {
    /// Snout reference image. Without it, template matching is skipped.
    #[arg(long)]
    snout: Option<PathBuf>,

    /// Minimum width of a detection.
    #[arg(long, default_value_t = 24)]
    min_width: u32,

    /// Minimum height of a detection.
    #[arg(long, default_value_t = 24)]
    min_height: u32,

    /// Save annotated copies of each processed frame into this directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Match images to test. Directories expand to their PNG files.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = runner::run(&args) {
        eprintln!("preygate: {e:#}");
        std::process::exit(1);
    }
}
