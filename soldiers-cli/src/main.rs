//! Sixteen Soldiers CLI - Command-line interface
//!
//! Commands:
//! - match: AI-vs-AI games with a results summary
//! - analyze: legal moves, evaluation and suggestion for one position
//! - topology: dump the board graph and its jump lines

mod analyze_cmd;
mod match_cmd;
mod topology_cmd;

use clap::{Parser, Subcommand};

use analyze_cmd::AnalyzeArgs;
use match_cmd::MatchArgs;
use topology_cmd::TopologyArgs;

#[derive(Parser)]
#[command(name = "soldiers")]
#[command(about = "Sixteen Soldiers rules engine and computer opponent")]
struct Cli {
    /// Seed for random openings (omit for a fresh one)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play AI-vs-AI games
    Match(MatchArgs),
    /// Inspect a single position
    Analyze(AnalyzeArgs),
    /// Print the board graph
    Topology(TopologyArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG controls the level)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Analyze(args) => analyze_cmd::run(args),
        Commands::Topology(args) => topology_cmd::run(args),
    }
}
