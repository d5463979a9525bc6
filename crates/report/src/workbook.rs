//! Battle workbook: one worksheet per guild team
//!
//! Each worksheet has a bold grey header row, the class cell filled with the
//! class colour, and a data bar on every numeric column.

use std::path::Path;

use roster::report_order;
use rust_xlsxwriter::{
    Color, ConditionalFormatDataBar, Format, FormatAlign, Workbook, Worksheet, XlsxError,
};
use shared::{BattleRecord, GuildBattleData, PlayerClass, Result, RosterError};

/// Longest worksheet name a workbook accepts
pub const SHEET_NAME_LIMIT: usize = 31;

/// Header, column width, data bar colour
const COLUMNS: [(&str, f64, Option<u32>); 15] = [
    ("玩家", 15.0, None),
    ("等级", 8.0, None),
    ("职业", 12.0, None),
    ("击败", 10.0, Some(0x4472C4)),
    ("助攻", 10.0, Some(0x9966FF)),
    ("战备资源", 12.0, Some(0x4472C4)),
    ("总伤害", 15.0, Some(0xFF6B6B)),
    ("对玩家伤害", 15.0, Some(0xFF6B6B)),
    ("对建筑伤害", 15.0, Some(0xFF6B6B)),
    ("治疗值", 12.0, Some(0x90EE90)),
    ("承受伤害", 12.0, Some(0x9966FF)),
    ("重伤", 10.0, Some(0xFF6B6B)),
    ("青灯焚骨", 12.0, Some(0x9966FF)),
    ("化羽", 10.0, Some(0x4472C4)),
    ("控制", 10.0, Some(0x4472C4)),
];

const HEADER_FILL: u32 = 0xD9D9D9;
const FIRST_NUMERIC_COLUMN: u16 = 3;
const FORBIDDEN_IN_NAME: [char; 8] = ['[', ']', ':', '*', '?', '/', '\\', '\''];

/// One team's records, ready to be written as a worksheet
#[derive(Debug, Clone)]
pub struct TeamSheet<'a> {
    /// `<guild>-<leader>`, at most [`SHEET_NAME_LIMIT`] characters
    pub name: String,
    pub records: Vec<&'a BattleRecord>,
}

/// One sheet per guild team, records in report order
pub fn team_sheets(guilds: &[GuildBattleData]) -> Vec<TeamSheet<'_>> {
    guilds
        .iter()
        .flat_map(|guild| {
            guild.teams.iter().map(move |team| {
                let mut records: Vec<&BattleRecord> = team.records.iter().collect();
                records.sort_by(|a, b| report_order(a, b));
                TeamSheet {
                    name: format!("{}-{}", guild.guild_name, team.team_leader)
                        .chars()
                        .take(SHEET_NAME_LIMIT)
                        .collect(),
                    records,
                }
            })
        })
        .collect()
}

/// Worksheet names with forbidden characters replaced and collisions numbered
///
/// Truncation can make two teams share a name; later ones get a `(n)` suffix
/// that still fits in [`SHEET_NAME_LIMIT`]. Comparison ignores case.
pub fn worksheet_names(sheets: &[TeamSheet<'_>]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let base: String = sheet
            .name
            .chars()
            .map(|c| if FORBIDDEN_IN_NAME.contains(&c) { '_' } else { c })
            .collect();

        let mut name = base.clone();
        let mut n = 2;
        while names.iter().any(|taken| taken.to_lowercase() == name.to_lowercase()) {
            let suffix = format!("({})", n);
            let keep = SHEET_NAME_LIMIT - suffix.chars().count();
            name = base.chars().take(keep).collect::<String>() + &suffix;
            n += 1;
        }
        names.push(name);
    }
    names
}

/// Numeric cells of a sheet row, 击败 through 控制
pub fn numeric_cells(record: &BattleRecord) -> [u64; 12] {
    [
        record.kills,
        record.assists,
        record.war_resources,
        record.total_damage(),
        record.player_damage,
        record.building_damage,
        record.healing,
        record.damage_taken,
        record.critical_injuries,
        record.qingdengfengu,
        record.huayu,
        record.control,
    ]
}

/// Build the workbook in memory
pub fn battle_workbook(guilds: &[GuildBattleData]) -> Result<Workbook> {
    let sheets = team_sheets(guilds);
    let names = worksheet_names(&sheets);

    let mut workbook = Workbook::new();
    for (sheet, name) in sheets.iter().zip(&names) {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, name, sheet).map_err(xlsx_error)?;
    }
    Ok(workbook)
}

/// Build the workbook and save it to `path`
pub fn write_battle_workbook(guilds: &[GuildBattleData], path: &Path) -> Result<()> {
    let mut workbook = battle_workbook(guilds)?;
    workbook.save(path).map_err(xlsx_error)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    sheet: &TeamSheet<'_>,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(name)?;

    let header = Format::new()
        .set_bold()
        .set_font_size(11)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let numeric = Format::new()
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter);

    for (col, (title, width, _)) in (0u16..).zip(COLUMNS) {
        worksheet.set_column_width(col, width)?;
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, record) in (1u32..).zip(&sheet.records) {
        worksheet.write_string(row, 0, &record.player_name)?;
        worksheet.write_number(row, 1, f64::from(record.level))?;
        worksheet.write_string_with_format(row, 2, record.class.label(), &class_format(record.class))?;
        for (col, value) in (FIRST_NUMERIC_COLUMN..).zip(numeric_cells(record)) {
            worksheet.write_number_with_format(row, col, value as f64, &numeric)?;
        }
    }

    let last_row = sheet.records.len() as u32;
    if last_row > 0 {
        for (col, (_, _, bar)) in (0u16..).zip(COLUMNS) {
            if let Some(color) = bar {
                let data_bar = ConditionalFormatDataBar::new().set_fill_color(Color::RGB(color));
                worksheet.add_conditional_format(1, col, last_row, col, &data_bar)?;
            }
        }
    }

    Ok(())
}

fn class_format(class: PlayerClass) -> Format {
    let (r, g, b) = class.rgb();
    Format::new()
        .set_background_color(Color::RGB(u32::from_be_bytes([0, r, g, b])))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn xlsx_error(err: XlsxError) -> RosterError {
    RosterError::Export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::group_by_guild;
    use tempfile::TempDir;

    fn record(guild: &str, name: &str, leader: &str, class: PlayerClass, value: u64) -> BattleRecord {
        let mut r = BattleRecord::new(guild, name, leader);
        r.class = class;
        r.healing = value;
        r.control = value;
        r.player_damage = value;
        r
    }

    #[test]
    fn test_team_sheets_order_and_names() {
        let long_guild = "一二三四五六七八九十一二三四五六七八九十一二三四五六七八九十";
        let guilds = group_by_guild(&[
            record("青云帮", "dps", "老王", PlayerClass::Xuehe, 500),
            record("青云帮", "heal", "老王", PlayerClass::Suwen, 100),
            record("青云帮", "tank", "老王", PlayerClass::Tieyi, 50),
            record(long_guild, "solo", "团长", PlayerClass::Other, 1),
        ]);

        let sheets = team_sheets(&guilds);

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "青云帮-老王");
        let order: Vec<_> = sheets[0].records.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(order, vec!["heal", "tank", "dps"]);
        assert_eq!(sheets[1].name.chars().count(), SHEET_NAME_LIMIT);
        assert!(sheets[1].name.starts_with(long_guild));
    }

    #[test]
    fn test_worksheet_names_are_unique_and_valid() {
        let long_guild = "一二三四五六七八九十一二三四五六七八九十一二三四五六七八九十";
        let guilds = group_by_guild(&[
            record(long_guild, "a", "老王", PlayerClass::Other, 1),
            record(long_guild, "b", "老张", PlayerClass::Other, 1),
            record("A/B", "c", "x", PlayerClass::Other, 1),
            record("a_b", "d", "X", PlayerClass::Other, 1),
        ]);

        let names = worksheet_names(&team_sheets(&guilds));

        assert_eq!(names[0].chars().count(), SHEET_NAME_LIMIT);
        assert!(names[1].ends_with("(2)"));
        assert_eq!(names[1].chars().count(), SHEET_NAME_LIMIT);
        assert_eq!(names[2], "A_B-x");
        assert_eq!(names[3], "a_b-X(2)");
    }

    #[test]
    fn test_numeric_cells_include_total_damage() {
        let mut r = record("g", "甲", "t", PlayerClass::Other, 0);
        r.kills = 3;
        r.player_damage = 100;
        r.building_damage = 23;
        r.control = 7;

        let cells = numeric_cells(&r);

        assert_eq!(cells[0], 3);
        assert_eq!(cells[3], 123);
        assert_eq!(cells[4], 100);
        assert_eq!(cells[5], 23);
        assert_eq!(cells[11], 7);
    }

    #[test]
    fn test_workbook_has_sheet_per_team() {
        let guilds = group_by_guild(&[
            record("青云帮", "甲", "老王", PlayerClass::Suwen, 10),
            record("青云帮", "乙", "老张", PlayerClass::Xuehe, 20),
            record("天机阁", "丙", "老王", PlayerClass::Tieyi, 30),
        ]);

        let mut workbook = battle_workbook(&guilds).unwrap();

        assert!(workbook.worksheet_from_name("青云帮-老王").is_ok());
        assert!(workbook.worksheet_from_name("青云帮-老张").is_ok());
        assert!(workbook.worksheet_from_name("天机阁-老王").is_ok());
        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_battle_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("battle.xlsx");
        let guilds = group_by_guild(&[record("青云帮", "甲", "老王", PlayerClass::Other, 1)]);

        write_battle_workbook(&guilds, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
