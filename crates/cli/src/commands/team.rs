//! roster team command

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use dialoguer::{Confirm, Input};
use importer::PlayerCsvLoader;
use roster::assign_by_hall;
use shared::{SlotPosition, TeamConfiguration};

use crate::board::{self, parse_slot};
use crate::context::Context;
use crate::display;

#[derive(Debug, Args)]
pub struct TeamCommand {
    #[command(subcommand)]
    pub command: TeamSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamSubcommand {
    /// Start a new, empty configuration
    New {
        /// Name (defaults to the configured default name)
        name: Option<String>,
    },
    /// List saved configurations
    List,
    /// Print a board
    Show {
        /// Saved configuration id or name (defaults to the current one)
        config: Option<String>,
    },
    /// Import a roster CSV
    Import {
        /// Roster CSV file
        file: PathBuf,
    },
    /// Fill the current board from the roster, hall by hall
    Assign {
        /// Import this roster CSV first
        #[arg(short, long)]
        roster: Option<PathBuf>,
    },
    /// Place a roster player into a slot
    Place {
        /// Player name
        player: String,
        /// Slot as regiment.squad.position, e.g. 1.2.3
        #[arg(value_parser = parse_slot)]
        slot: SlotPosition,
    },
    /// Move or swap the contents of two slots
    Move {
        #[arg(value_parser = parse_slot)]
        from: SlotPosition,
        #[arg(value_parser = parse_slot)]
        to: SlotPosition,
    },
    /// Empty a slot
    Remove {
        #[arg(value_parser = parse_slot)]
        slot: SlotPosition,
    },
    /// Save the current board under a name
    Save {
        /// Name (prompted for when omitted)
        name: Option<String>,
    },
    /// Make a saved configuration current
    Load {
        /// Configuration id or name
        config: String,
    },
    /// Delete a saved configuration
    Delete {
        /// Configuration id or name
        config: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export a board as CSV
    Export {
        /// Saved configuration id or name (defaults to the current one)
        config: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

impl TeamCommand {
    pub fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            TeamSubcommand::New { name } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| ctx.config.default_config_name.clone());
                let config = TeamConfiguration::new(name);
                ctx.store.set_current(&config)?;
                println!("✓ Started '{}' ({})", config.name, config.id);
            }
            TeamSubcommand::List => {
                let configs = ctx.store.list_all()?;
                if configs.is_empty() {
                    println!("No saved configurations");
                }
                for config in configs {
                    println!(
                        "{}  {}  {}  {} players",
                        config.id,
                        config.created_at.format("%Y-%m-%d %H:%M"),
                        config.name,
                        config.occupied_count()
                    );
                }
            }
            TeamSubcommand::Show { config } => {
                let config = ctx.select(config.as_deref())?;
                print!("{}", display::render_board(&config));
            }
            TeamSubcommand::Import { file } => import_roster(ctx, file)?,
            TeamSubcommand::Assign { roster } => {
                if let Some(file) = roster {
                    import_roster(ctx, file)?;
                }
                let players = ctx.roster()?;
                if players.is_empty() {
                    anyhow::bail!("No roster imported yet; run `roster team import <file>`");
                }
                print!("{}", display::render_halls(&players));

                let outcome = assign_by_hall(&players, &ctx.current_or_new()?);
                ctx.store.set_current(&outcome.configuration)?;
                println!("{}", display::render_outcome(&outcome));
            }
            TeamSubcommand::Place { player, slot } => {
                let players = ctx.roster()?;
                let mut config = ctx.current_or_new()?;
                let event = board::place_by_name(&mut config, &players, player, *slot)?;
                ctx.store.set_current(&config)?;
                println!("{}", display::describe_event(&event));
            }
            TeamSubcommand::Move { from, to } => {
                let mut config = ctx.current_or_new()?;
                let event = board::move_slot(&mut config, *from, *to)?;
                ctx.store.set_current(&config)?;
                println!("{}", display::describe_event(&event));
            }
            TeamSubcommand::Remove { slot } => {
                let mut config = ctx.current_or_new()?;
                let event = board::remove_slot(&mut config, *slot)?;
                ctx.store.set_current(&config)?;
                println!("{}", display::describe_event(&event));
            }
            TeamSubcommand::Save { name } => {
                let mut config = ctx.current_or_new()?;
                let name = match name {
                    Some(name) => name.clone(),
                    None => prompt_name(&config.name)?,
                };
                ctx.save_as(&mut config, &name)?;
                println!("✓ Saved '{}' ({})", config.name, config.id);
            }
            TeamSubcommand::Load { config } => {
                let config = ctx.store.resolve(config)?;
                ctx.store.set_current(&config)?;
                println!("✓ Loaded '{}'", config.name);
            }
            TeamSubcommand::Delete { config, yes } => {
                let config = ctx.store.resolve(config)?;
                let confirmed = *yes
                    || Confirm::new()
                        .with_prompt(format!("Delete '{}'?", config.name))
                        .default(false)
                        .interact()?;
                if confirmed {
                    ctx.store.delete(&config.id)?;
                    println!("✓ Deleted '{}'", config.name);
                }
            }
            TeamSubcommand::Export { config, out } => {
                let config = ctx.select(config.as_deref())?;
                let path = ctx.exporter(out).export_team_configuration(&config)?;
                println!("✓ Exported {}", path.display());
            }
        }
        Ok(())
    }
}

/// Import a roster file into the store, replacing the previous roster
pub fn import_roster(ctx: &mut Context, file: &Path) -> anyhow::Result<()> {
    let mut loader = PlayerCsvLoader::new();
    let stats = loader.load_from_path(file)?;
    ctx.store.save_players(loader.players())?;
    println!("✓ Imported roster: {}", stats);
    Ok(())
}

/// Ask for a configuration name
pub fn prompt_name(default: &str) -> anyhow::Result<String> {
    let name: String = Input::new()
        .with_prompt("Configuration name")
        .default(default.to_string())
        .interact_text()?;
    Ok(name)
}
