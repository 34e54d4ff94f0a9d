use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "recovery-cli", version, about = "Recovery response simulator CLI")]
struct Cli {
    /// Log model evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute daily response and cumulative effect
    Simulate(commands::simulate::SimulateArgs),
    /// Print the day-by-day projection
    Trajectory(commands::simulate::TrajectoryArgs),
    /// Break a day count into years, months and days
    Breakdown(commands::breakdown::BreakdownArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("RECOVERY_SIM_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Trajectory(args) => commands::simulate::run_trajectory(args),
        Commands::Breakdown(args) => commands::breakdown::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
