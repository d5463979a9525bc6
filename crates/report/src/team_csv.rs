//! Team board CSV layout
//!
//! ```text
//! 团队/位置   | 队伍1          | 队伍2 | ... | 队伍5
//! 配置: name  | 时间: date time |
//!             |                |
//! 【团1】      |                |
//! 位置1       | 青衫客 (12000)  |
//! ...
//! 位置6       |                |
//!             |                |
//! 【团2】 ...
//! ```

use std::io::Write;

use chrono::Local;
use shared::{Result, TeamConfiguration, SLOTS_PER_SQUAD, SQUADS_PER_REGIMENT};

const CORNER_HEADER: &str = "团队/位置";

fn blank_row() -> Vec<String> {
    vec![String::new(); SQUADS_PER_REGIMENT + 1]
}

/// Write the board of `config` as CSV
pub fn write_team_configuration<W: Write>(config: &TeamConfiguration, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec![CORNER_HEADER.to_string()];
    header.extend((1..=SQUADS_PER_REGIMENT).map(|i| format!("队伍{}", i)));
    writer.write_record(&header)?;

    let created = config.created_at.with_timezone(&Local);
    let mut info = blank_row();
    info[0] = format!("配置: {}", config.name);
    info[1] = format!("时间: {}", created.format("%Y-%m-%d %H:%M:%S"));
    writer.write_record(&info)?;
    writer.write_record(blank_row())?;

    for regiment in &config.regiments {
        let mut title = blank_row();
        title[0] = format!("【{}】", regiment.name);
        writer.write_record(&title)?;

        for position in 0..SLOTS_PER_SQUAD {
            let mut row = vec![format!("位置{}", position + 1)];
            row.extend(regiment.squads.iter().map(|squad| {
                squad.players[position]
                    .as_ref()
                    .map(|p| format!("{} ({})", p.name, p.combat_power))
                    .unwrap_or_default()
            }));
            writer.write_record(&row)?;
        }

        writer.write_record(blank_row())?;
    }

    writer.flush()?;
    Ok(())
}
