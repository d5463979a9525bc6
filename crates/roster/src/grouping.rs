//! Grouping Engine - battle records → guild → team
//!
//! Keys are compared by exact string equality and buckets come out in
//! first-seen order. Empty guild names and empty leader labels are ordinary
//! keys. Every record lands in exactly one guild and one team.

use indexmap::IndexMap;
use shared::{BattleRecord, BattleSummary, GuildBattleData, TeamBattleData};

/// Partition records by guild, then by team leader within each guild
pub fn group_by_guild(records: &[BattleRecord]) -> Vec<GuildBattleData> {
    let mut guilds: IndexMap<&str, Vec<BattleRecord>> = IndexMap::new();
    for record in records {
        guilds
            .entry(record.guild_name.as_str())
            .or_default()
            .push(record.clone());
    }

    guilds
        .into_iter()
        .map(|(guild_name, records)| GuildBattleData {
            guild_name: guild_name.to_string(),
            teams: group_by_team(&records),
            summary: calculate_summary(&records),
            records,
        })
        .collect()
}

/// Partition records by team leader
pub fn group_by_team(records: &[BattleRecord]) -> Vec<TeamBattleData> {
    let mut teams: IndexMap<&str, Vec<BattleRecord>> = IndexMap::new();
    for record in records {
        teams
            .entry(record.regiment_leader.as_str())
            .or_default()
            .push(record.clone());
    }

    teams
        .into_iter()
        .map(|(team_leader, records)| TeamBattleData {
            team_leader: team_leader.to_string(),
            summary: calculate_summary(&records),
            records,
        })
        .collect()
}

/// Totals and per-record averages; all zero for an empty slice
pub fn calculate_summary(records: &[BattleRecord]) -> BattleSummary {
    if records.is_empty() {
        return BattleSummary::default();
    }

    let total_kills = saturating_total(records, |r| r.kills);
    let total_assists = saturating_total(records, |r| r.assists);
    let total_damage = saturating_total(records, BattleRecord::total_damage);
    let total_healing = saturating_total(records, |r| r.healing);
    let count = records.len() as f64;

    BattleSummary {
        total_kills,
        total_assists,
        total_damage,
        total_healing,
        avg_kills: total_kills as f64 / count,
        avg_damage: total_damage as f64 / count,
        avg_healing: total_healing as f64 / count,
    }
}

fn saturating_total(records: &[BattleRecord], value: impl Fn(&BattleRecord) -> u64) -> u64 {
    records.iter().map(value).fold(0, u64::saturating_add)
}

/// All records of the grouped data, guild by guild
pub fn flatten(guilds: &[GuildBattleData]) -> Vec<BattleRecord> {
    guilds
        .iter()
        .flat_map(|g| g.records.iter().cloned())
        .collect()
}
