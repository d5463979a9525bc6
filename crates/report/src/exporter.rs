//! Exporter - writes report files into an output directory

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use shared::{GuildBattleData, Result, TeamConfiguration};
use tracing::info;

use crate::battle_csv::write_battle_records;
use crate::team_csv::write_team_configuration;
use crate::workbook::write_battle_workbook;

const BOM: &[u8] = "\u{feff}".as_bytes();

/// `团队配置_<name>_<millis>.csv`
pub fn team_configuration_file_name(name: &str, millis: i64) -> String {
    format!("团队配置_{}_{}.csv", sanitize(name), millis)
}

/// `帮战数据_<millis>.csv`
pub fn battle_data_file_name(millis: i64) -> String {
    format!("帮战数据_{}.csv", millis)
}

/// `帮战数据_<millis>.xlsx`
pub fn battle_workbook_file_name(millis: i64) -> String {
    format!("帮战数据_{}.xlsx", millis)
}

/// Replace characters that cannot appear in a file name
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Report file writer
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    add_bom: bool,
}

impl Exporter {
    /// Create an exporter; `add_bom` prefixes every file with a UTF-8 BOM
    pub fn new(out_dir: impl Into<PathBuf>, add_bom: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            add_bom,
        }
    }

    /// Write the board layout of one configuration
    pub fn export_team_configuration(&self, config: &TeamConfiguration) -> Result<PathBuf> {
        let millis = Utc::now().timestamp_millis();
        let path = self
            .out_dir
            .join(team_configuration_file_name(&config.name, millis));
        let out = self.create(&path)?;
        write_team_configuration(config, out)?;
        info!(path = %path.display(), name = %config.name, "Exported team configuration");
        Ok(path)
    }

    /// Write every battle record as one flat CSV
    pub fn export_battle_data(&self, guilds: &[GuildBattleData]) -> Result<PathBuf> {
        let path = self
            .out_dir
            .join(battle_data_file_name(Utc::now().timestamp_millis()));
        let out = self.create(&path)?;
        write_battle_records(guilds, out)?;
        info!(path = %path.display(), guilds = guilds.len(), "Exported battle data");
        Ok(path)
    }

    /// Write the battle workbook, one worksheet per guild team
    ///
    /// The BOM setting does not apply to workbooks.
    pub fn export_battle_workbook(&self, guilds: &[GuildBattleData]) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self
            .out_dir
            .join(battle_workbook_file_name(Utc::now().timestamp_millis()));
        write_battle_workbook(guilds, &path)?;
        info!(path = %path.display(), guilds = guilds.len(), "Exported battle workbook");
        Ok(path)
    }

    fn create(&self, path: &Path) -> Result<BufWriter<File>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        if self.add_bom {
            out.write_all(BOM)?;
        }
        Ok(out)
    }
}
