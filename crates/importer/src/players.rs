//! PlayerCsvLoader - roster CSV import

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use shared::{Player, PlayerClass, Result, RosterError};
use tracing::{info, warn};

use crate::columns::Columns;
use crate::stats::ImportStats;

const NAME: &[&str] = &["名称", "name"];
const COMBAT_POWER: &[&str] = &["总战力", "combatPower"];
const CLASS: &[&str] = &["职业", "class"];
const HALL: &[&str] = &["分堂", "hall"];
const POSITION: &[&str] = &["职位", "position"];
const LEVEL: &[&str] = &["等级", "level"];

/// Roster loader
#[derive(Debug, Default)]
pub struct PlayerCsvLoader {
    players: Vec<Player>,
    stats: ImportStats,
}

impl PlayerCsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a roster file
    pub fn load_from_path(&mut self, path: &Path) -> Result<ImportStats> {
        let file = std::fs::File::open(path)?;
        let stats = self.load_from_reader(file)?;
        info!(path = %path.display(), %stats, "Imported roster");
        Ok(stats)
    }

    /// Load roster rows from any reader
    ///
    /// Fails if the input yields no valid player.
    pub fn load_from_reader<R: Read>(&mut self, input: R) -> Result<ImportStats> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let columns = Columns::new(reader.headers()?);
        columns.require(NAME)?;

        let mut stats = ImportStats::default();
        let mut players = Vec::new();
        for record in reader.records() {
            let record = record?;
            stats.total_rows += 1;
            match parse_player(&columns, &record) {
                Ok(player) => {
                    stats.parsed += 1;
                    players.push(player);
                }
                Err(reason) => {
                    stats.failed += 1;
                    let line = record.position().map_or(0, |p| p.line());
                    warn!(line, %reason, "Skipping roster row");
                }
            }
        }

        if players.is_empty() {
            return Err(RosterError::Import(
                "roster CSV is empty or malformed".to_string(),
            ));
        }

        self.players.extend(players);
        self.stats += stats;
        Ok(stats)
    }

    /// Players loaded so far, in file order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Accumulated statistics over every load
    pub fn stats(&self) -> ImportStats {
        self.stats
    }
}

fn parse_player(columns: &Columns, record: &StringRecord) -> std::result::Result<Player, String> {
    let name = columns
        .text(record, NAME)
        .ok_or_else(|| "empty player name".to_string())?;
    let combat_power = columns.number(record, COMBAT_POWER)?;
    let class = columns
        .text(record, CLASS)
        .map_or(PlayerClass::Other, PlayerClass::from_label);

    let mut player = Player::new(name, combat_power, class);
    if let Some(hall) = columns.text(record, HALL) {
        player = player.with_hall(hall);
    }
    if let Some(position) = columns.text(record, POSITION) {
        player = player.with_position(position);
    }
    if columns.has(LEVEL) {
        let level = columns.number(record, LEVEL)?;
        let level = u32::try_from(level).map_err(|_| format!("level {} out of range", level))?;
        player = player.with_level(level);
    }
    Ok(player)
}
