//! # Guild Roster Report
//!
//! Spreadsheet-friendly exports:
//!
//! - team board layout of one configuration (CSV)
//! - flat battle log over every guild (CSV)
//! - battle workbook with one worksheet per guild team (xlsx)

pub mod battle_csv;
pub mod exporter;
pub mod team_csv;
pub mod workbook;

pub use battle_csv::write_battle_records;
pub use exporter::{
    battle_data_file_name, battle_workbook_file_name, team_configuration_file_name, Exporter,
};
pub use team_csv::write_team_configuration;
pub use workbook::{
    battle_workbook, team_sheets, worksheet_names, write_battle_workbook, TeamSheet,
    SHEET_NAME_LIMIT,
};
