//! roster battle command

use std::path::PathBuf;

use clap::{Args, Subcommand};
use importer::BattleCsvLoader;
use roster::{apply_filter, group_by_guild, sort_records};
use shared::{
    FilterConfig, GuildBattleData, PlayerClass, SortConfig, SortField, SortOrder, ViewMode,
};
use tracing::info;

use crate::context::Context;
use crate::display;

#[derive(Debug, Args)]
pub struct BattleCommand {
    #[command(subcommand)]
    pub command: BattleSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum BattleSubcommand {
    /// Per-guild (and per-team) totals
    Summary {
        /// Battle CSV file or glob pattern
        pattern: String,
        /// guild or guild-team
        #[arg(long, default_value = "guild")]
        view: ViewMode,
    },
    /// Filtered, sorted record table
    Records {
        /// Battle CSV file or glob pattern
        pattern: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Column to sort by (e.g. kills, healing, totalDamage, 控制)
        #[arg(long, default_value = "totalDamage")]
        sort: SortField,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the battle log as CSV, optionally with the per-team workbook
    Export {
        /// Battle CSV file or glob pattern
        pattern: String,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Also write an .xlsx workbook with one worksheet per guild team
        #[arg(long)]
        xlsx: bool,
    },
}

/// Record filter flags
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only this guild
    #[arg(long)]
    pub guild: Option<String>,
    /// Only this class (in-game label, e.g. 素问)
    #[arg(long, value_parser = parse_class)]
    pub class: Option<PlayerClass>,
    /// Only this team leader
    #[arg(long)]
    pub leader: Option<String>,
    #[arg(long)]
    pub min_kills: Option<u64>,
    /// Minimum total damage
    #[arg(long)]
    pub min_damage: Option<u64>,
}

impl From<&FilterArgs> for FilterConfig {
    fn from(args: &FilterArgs) -> Self {
        FilterConfig {
            guild_name: args.guild.clone(),
            class: args.class,
            team_leader: args.leader.clone(),
            min_kills: args.min_kills,
            min_damage: args.min_damage,
        }
    }
}

/// Accept exact class labels only, so typos are not silently `其他`
fn parse_class(label: &str) -> Result<PlayerClass, String> {
    PlayerClass::ALL
        .into_iter()
        .find(|c| c.label() == label.trim())
        .ok_or_else(|| format!("Unknown class '{}'", label))
}

/// Load battle files and group them by guild and team
pub fn load_guilds(pattern: &str) -> anyhow::Result<Vec<GuildBattleData>> {
    let mut loader = BattleCsvLoader::new();
    let stats = loader.load_glob(pattern)?;
    info!(%stats, "Loaded battle records");
    Ok(group_by_guild(loader.records()))
}

impl BattleCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        match &self.command {
            BattleSubcommand::Summary { pattern, view } => {
                let guilds = load_guilds(pattern)?;
                print!("{}", display::render_summary(&guilds, *view));
            }
            BattleSubcommand::Records {
                pattern,
                filter,
                sort,
                asc,
                json,
            } => {
                let mut loader = BattleCsvLoader::new();
                loader.load_glob(pattern)?;

                let mut view = apply_filter(loader.records(), &FilterConfig::from(filter));
                sort_records(
                    &mut view,
                    SortConfig {
                        field: *sort,
                        order: if *asc { SortOrder::Asc } else { SortOrder::Desc },
                    },
                );

                if *json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", display::render_records(&view));
                    println!("{} of {} records", view.len(), loader.records().len());
                }
            }
            BattleSubcommand::Export {
                pattern,
                out,
                xlsx,
            } => {
                let guilds = load_guilds(pattern)?;
                let exporter = ctx.exporter(out);
                let path = exporter.export_battle_data(&guilds)?;
                println!("✓ Exported {}", path.display());
                if *xlsx {
                    let path = exporter.export_battle_workbook(&guilds)?;
                    println!("✓ Exported {}", path.display());
                }
            }
        }
        Ok(())
    }
}
