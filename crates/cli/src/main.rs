//! Guild Roster CLI
//!
//! Usage:
//!   roster                          - Start the interactive board session
//!   roster init [dir]               - Write default settings
//!   roster team import <csv>        - Import the guild roster
//!   roster team assign              - Fill the board hall by hall
//!   roster team place <name> <r.s.p>
//!   roster battle summary <glob>    - Guild/team totals of battle logs
//!   roster compare <a.txt> <b.txt>  - Diff names found in two texts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::commands::{BattleCommand, CompareCommand, InitCommand, TeamCommand};
use cli::context::Context;
use cli::interactive::InteractiveCli;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Guild roster and battle log tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (defaults to ./roster.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings and create the data directory
    Init(InitCommand),
    /// Team boards
    Team(TeamCommand),
    /// Battle logs
    Battle(BattleCommand),
    /// Compare character names in two text files
    Compare(CompareCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init(cmd)) => cmd.run(),
        Some(Commands::Compare(cmd)) => cmd.run(),
        Some(Commands::Team(cmd)) => {
            let mut ctx = Context::load(cli.config.as_deref(), cli.data_dir)?;
            cmd.run(&mut ctx)
        }
        Some(Commands::Battle(cmd)) => {
            let ctx = Context::load(cli.config.as_deref(), cli.data_dir)?;
            cmd.run(&ctx)
        }
        None => {
            // No subcommand - start interactive mode
            let ctx = Context::load(cli.config.as_deref(), cli.data_dir)?;
            let mut interactive = InteractiveCli::new(ctx)?;
            interactive.run()
        }
    }
}
