//! BattleCsvLoader - battle log CSV import

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use shared::{BattleRecord, PlayerClass, Result, RosterError};
use tracing::{info, warn};

use crate::columns::Columns;
use crate::stats::ImportStats;

const GUILD_NAME: &[&str] = &["帮会名", "guildName"];
const PLAYER_NAME: &[&str] = &["玩家", "playerName"];
const LEVEL: &[&str] = &["等级", "level"];
const CLASS: &[&str] = &["职业", "class"];
const REGIMENT_LEADER: &[&str] = &["所在团长", "regimentLeader"];
const KILLS: &[&str] = &["击败", "kills"];
const ASSISTS: &[&str] = &["助攻", "assists"];
const WAR_RESOURCES: &[&str] = &["战备资源", "warResources"];
const PLAYER_DAMAGE: &[&str] = &["对玩家伤害", "playerDamage"];
const BUILDING_DAMAGE: &[&str] = &["对建筑伤害", "buildingDamage"];
const HEALING: &[&str] = &["治疗值", "healing"];
const DAMAGE_TAKEN: &[&str] = &["承受伤害", "damageTaken"];
const CRITICAL_INJURIES: &[&str] = &["重伤", "criticalInjuries"];
const QINGDENGFENGU: &[&str] = &["青灯焚骨", "qingdengfengu"];
const HUAYU: &[&str] = &["化羽", "huayu"];
const CONTROL: &[&str] = &["控制", "control"];

/// Battle log loader
#[derive(Debug, Default)]
pub struct BattleCsvLoader {
    records: Vec<BattleRecord>,
    stats: ImportStats,
}

impl BattleCsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one battle log file
    pub fn load_from_path(&mut self, path: &Path) -> Result<ImportStats> {
        let file = std::fs::File::open(path)?;
        let stats = self.load_from_reader(file)?;
        info!(path = %path.display(), %stats, "Imported battle log");
        Ok(stats)
    }

    /// Load every file matching a glob pattern, in path order
    pub fn load_glob(&mut self, pattern: &str) -> Result<ImportStats> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|e| RosterError::Import(format!("invalid pattern '{}': {}", pattern, e)))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(RosterError::Import(format!(
                "no files match '{}'",
                pattern
            )));
        }

        let mut total = ImportStats::default();
        for path in &paths {
            total += self.load_from_path(path)?;
        }
        Ok(total)
    }

    /// Load battle rows from any reader
    ///
    /// Fails if the input yields no valid record.
    pub fn load_from_reader<R: Read>(&mut self, input: R) -> Result<ImportStats> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let columns = Columns::new(reader.headers()?);
        columns.require(PLAYER_NAME)?;

        let mut stats = ImportStats::default();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            stats.total_rows += 1;
            match parse_record(&columns, &row) {
                Ok(record) => {
                    stats.parsed += 1;
                    records.push(record);
                }
                Err(reason) => {
                    stats.failed += 1;
                    let line = row.position().map_or(0, |p| p.line());
                    warn!(line, %reason, "Skipping battle row");
                }
            }
        }

        if records.is_empty() {
            return Err(RosterError::Import(
                "battle CSV is empty or malformed".to_string(),
            ));
        }

        self.records.extend(records);
        self.stats += stats;
        Ok(stats)
    }

    /// Records loaded so far, in file order
    pub fn records(&self) -> &[BattleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BattleRecord> {
        self.records
    }

    pub fn stats(&self) -> ImportStats {
        self.stats
    }
}

fn parse_record(columns: &Columns, row: &StringRecord) -> std::result::Result<BattleRecord, String> {
    let player_name = columns
        .text(row, PLAYER_NAME)
        .ok_or_else(|| "empty player name".to_string())?;
    let guild_name = columns.text(row, GUILD_NAME).unwrap_or_default();
    let leader = columns.text(row, REGIMENT_LEADER).unwrap_or_default();

    let mut record = BattleRecord::new(guild_name, player_name, leader);
    let level = columns.number(row, LEVEL)?;
    record.level = u32::try_from(level).map_err(|_| format!("level {} out of range", level))?;
    record.class = columns
        .text(row, CLASS)
        .map_or(PlayerClass::Other, PlayerClass::from_label);
    record.kills = columns.number(row, KILLS)?;
    record.assists = columns.number(row, ASSISTS)?;
    record.war_resources = columns.number(row, WAR_RESOURCES)?;
    record.player_damage = columns.number(row, PLAYER_DAMAGE)?;
    record.building_damage = columns.number(row, BUILDING_DAMAGE)?;
    record.healing = columns.number(row, HEALING)?;
    record.damage_taken = columns.number(row, DAMAGE_TAKEN)?;
    record.critical_injuries = columns.number(row, CRITICAL_INJURIES)?;
    record.qingdengfengu = columns.number(row, QINGDENGFENGU)?;
    record.huayu = columns.number(row, HUAYU)?;
    record.control = columns.number(row, CONTROL)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "帮会名,玩家,等级,职业,所在团长,击败,助攻,战备资源,对玩家伤害,对建筑伤害,治疗值,承受伤害,重伤,青灯焚骨,化羽,控制";

    #[test]
    fn test_full_row() {
        let csv = format!(
            "{}\n青云帮,青衫客,89,素问,老王,3,12,40,150000,20000,900000,80000,2,1,0,5\n",
            HEADER
        );
        let mut loader = BattleCsvLoader::new();

        loader.load_from_reader(csv.as_bytes()).unwrap();

        let r = &loader.records()[0];
        assert_eq!(r.guild_name, "青云帮");
        assert_eq!(r.regiment_leader, "老王");
        assert_eq!(r.level, 89);
        assert_eq!(r.class, PlayerClass::Suwen);
        assert_eq!(r.kills, 3);
        assert_eq!(r.total_damage(), 170_000);
        assert_eq!(r.healing, 900_000);
        assert_eq!(r.control, 5);
    }

    #[test]
    fn test_english_headers_with_missing_metrics() {
        let csv = "guildName,playerName,regimentLeader,kills\nAzure,Bob,,7\n";
        let mut loader = BattleCsvLoader::new();

        loader.load_from_reader(csv.as_bytes()).unwrap();

        let r = &loader.records()[0];
        assert_eq!(r.player_name, "Bob");
        assert_eq!(r.regiment_leader, "");
        assert_eq!(r.kills, 7);
        assert_eq!(r.healing, 0);
    }

    #[test]
    fn test_bad_rows_counted() {
        let csv = "玩家,击败\n甲,1\n乙,x\n,2\n";
        let mut loader = BattleCsvLoader::new();

        let stats = loader.load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(stats, ImportStats { total_rows: 3, parsed: 1, failed: 2 });
    }

    #[test]
    fn test_glob_loads_in_path_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), "玩家,帮会名\n乙,二帮\n").unwrap();
        fs::write(dir.path().join("a.csv"), "玩家,帮会名\n甲,一帮\n丙,一帮\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let pattern = format!("{}/*.csv", dir.path().display());
        let mut loader = BattleCsvLoader::new();

        let stats = loader.load_glob(&pattern).unwrap();

        assert_eq!(stats.parsed, 3);
        let names: Vec<_> = loader.records().iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["甲", "丙", "乙"]);
    }

    #[test]
    fn test_glob_without_matches() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.csv", dir.path().display());

        let result = BattleCsvLoader::new().load_glob(&pattern);

        assert!(matches!(result, Err(RosterError::Import(_))));
    }
}
