//! Battle log types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::player::PlayerClass;

/// One player's line in a guild battle log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    pub id: String,
    pub guild_name: String,
    pub player_name: String,
    pub level: u32,
    pub class: PlayerClass,
    /// Team leader the player fought under
    pub regiment_leader: String,

    pub kills: u64,
    pub assists: u64,
    pub war_resources: u64,
    pub player_damage: u64,
    pub building_damage: u64,
    pub healing: u64,
    pub damage_taken: u64,
    pub critical_injuries: u64,
    pub qingdengfengu: u64,
    pub huayu: u64,
    pub control: u64,
}

impl BattleRecord {
    /// Create a record with all metrics at zero
    pub fn new(
        guild_name: impl Into<String>,
        player_name: impl Into<String>,
        regiment_leader: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            guild_name: guild_name.into(),
            player_name: player_name.into(),
            level: 0,
            class: PlayerClass::Other,
            regiment_leader: regiment_leader.into(),
            kills: 0,
            assists: 0,
            war_resources: 0,
            player_damage: 0,
            building_damage: 0,
            healing: 0,
            damage_taken: 0,
            critical_injuries: 0,
            qingdengfengu: 0,
            huayu: 0,
            control: 0,
        }
    }

    /// Damage to players plus damage to buildings, saturating at `u64::MAX`
    pub fn total_damage(&self) -> u64 {
        self.player_damage.saturating_add(self.building_damage)
    }
}

/// Aggregate statistics over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSummary {
    pub total_kills: u64,
    pub total_assists: u64,
    pub total_damage: u64,
    pub total_healing: u64,
    pub avg_kills: f64,
    pub avg_damage: f64,
    pub avg_healing: f64,
}

/// Records of one team leader within a guild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBattleData {
    pub team_leader: String,
    pub records: Vec<BattleRecord>,
    pub summary: BattleSummary,
}

/// Records of one guild, also split by team leader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildBattleData {
    pub guild_name: String,
    pub teams: Vec<TeamBattleData>,
    pub records: Vec<BattleRecord>,
    pub summary: BattleSummary,
}

/// Record filter; every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub guild_name: Option<String>,
    pub class: Option<PlayerClass>,
    pub team_leader: Option<String>,
    pub min_kills: Option<u64>,
    /// Minimum total damage
    pub min_damage: Option<u64>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &BattleRecord) -> bool {
        self.guild_name.as_ref().map_or(true, |g| *g == record.guild_name)
            && self.class.map_or(true, |c| c == record.class)
            && self
                .team_leader
                .as_ref()
                .map_or(true, |t| *t == record.regiment_leader)
            && self.min_kills.map_or(true, |k| record.kills >= k)
            && self.min_damage.map_or(true, |d| record.total_damage() >= d)
    }
}

/// Column a record table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    PlayerName,
    Level,
    Kills,
    Assists,
    WarResources,
    TotalDamage,
    PlayerDamage,
    BuildingDamage,
    Healing,
    DamageTaken,
    CriticalInjuries,
    Qingdengfengu,
    Huayu,
    Control,
}

impl SortField {
    /// Numeric value of the column, `None` for text columns
    pub fn metric(&self, record: &BattleRecord) -> Option<u64> {
        let value = match self {
            SortField::PlayerName => return None,
            SortField::Level => record.level as u64,
            SortField::Kills => record.kills,
            SortField::Assists => record.assists,
            SortField::WarResources => record.war_resources,
            SortField::TotalDamage => record.total_damage(),
            SortField::PlayerDamage => record.player_damage,
            SortField::BuildingDamage => record.building_damage,
            SortField::Healing => record.healing,
            SortField::DamageTaken => record.damage_taken,
            SortField::CriticalInjuries => record.critical_injuries,
            SortField::Qingdengfengu => record.qingdengfengu,
            SortField::Huayu => record.huayu,
            SortField::Control => record.control,
        };
        Some(value)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "playerName" | "name" | "玩家" => SortField::PlayerName,
            "level" | "等级" => SortField::Level,
            "kills" | "击败" => SortField::Kills,
            "assists" | "助攻" => SortField::Assists,
            "warResources" | "战备资源" => SortField::WarResources,
            "totalDamage" | "damage" | "总伤害" => SortField::TotalDamage,
            "playerDamage" | "对玩家伤害" => SortField::PlayerDamage,
            "buildingDamage" | "对建筑伤害" => SortField::BuildingDamage,
            "healing" | "治疗值" => SortField::Healing,
            "damageTaken" | "承受伤害" => SortField::DamageTaken,
            "criticalInjuries" | "重伤" => SortField::CriticalInjuries,
            "qingdengfengu" | "青灯焚骨" => SortField::Qingdengfengu,
            "huayu" | "化羽" => SortField::Huayu,
            "control" | "控制" => SortField::Control,
            other => return Err(format!("Unknown sort field: {}", other)),
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub order: SortOrder,
}

/// How battle data is tabulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "guild")]
    Guild,
    #[serde(rename = "guild-team")]
    GuildTeam,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Guild => f.write_str("guild"),
            ViewMode::GuildTeam => f.write_str("guild-team"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guild" => Ok(ViewMode::Guild),
            "guild-team" | "team" => Ok(ViewMode::GuildTeam),
            other => Err(format!("Unknown view mode: {}", other)),
        }
    }
}
