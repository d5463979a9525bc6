//! Flat battle log CSV

use std::io::Write;

use shared::{GuildBattleData, Result};

const RECORD_HEADERS: [&str; 16] = [
    "帮会名",
    "玩家",
    "等级",
    "职业",
    "所在团长",
    "击败",
    "助攻",
    "战备资源",
    "对玩家伤害",
    "对建筑伤害",
    "治疗值",
    "承受伤害",
    "重伤",
    "青灯焚骨",
    "化羽",
    "控制",
];

/// Write every record of every guild, guild by guild, in import column order
pub fn write_battle_records<W: Write>(guilds: &[GuildBattleData], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(RECORD_HEADERS)?;

    for record in guilds.iter().flat_map(|g| g.records.iter()) {
        writer.write_record([
            record.guild_name.clone(),
            record.player_name.clone(),
            record.level.to_string(),
            record.class.label().to_string(),
            record.regiment_leader.clone(),
            record.kills.to_string(),
            record.assists.to_string(),
            record.war_resources.to_string(),
            record.player_damage.to_string(),
            record.building_damage.to_string(),
            record.healing.to_string(),
            record.damage_taken.to_string(),
            record.critical_injuries.to_string(),
            record.qingdengfengu.to_string(),
            record.huayu.to_string(),
            record.control.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::group_by_guild;
    use shared::{BattleRecord, PlayerClass};

    fn record(guild: &str, name: &str, leader: &str, class: PlayerClass, value: u64) -> BattleRecord {
        let mut r = BattleRecord::new(guild, name, leader);
        r.class = class;
        r.healing = value;
        r.control = value;
        r.player_damage = value;
        r
    }

    #[test]
    fn test_battle_records_csv() {
        let guilds = group_by_guild(&[
            record("青云帮", "甲", "老王", PlayerClass::Xuehe, 10),
            record("天机阁", "乙", "小李", PlayerClass::Suwen, 20),
        ]);
        let mut buf = Vec::new();

        write_battle_records(&guilds, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("帮会名,玩家,等级,职业,所在团长,击败"));
        assert_eq!(lines[1], "青云帮,甲,0,血河,老王,0,0,0,10,0,10,0,0,0,0,10");
        assert!(lines[2].starts_with("天机阁,乙,0,素问,小李"));
    }
}
