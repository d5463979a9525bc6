//! roster compare command

use std::path::PathBuf;

use clap::Args;
use roster::{compare_names, extract_names, ComparisonResult};

use crate::display;

/// Diff the character names found in two text files (e.g. OCR output)
#[derive(Debug, Args)]
pub struct CompareCommand {
    /// First text file
    pub first: PathBuf,
    /// Second text file
    pub second: PathBuf,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CompareCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let result = self.compare()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", display::render_comparison(&result));
        }
        Ok(())
    }

    pub fn compare(&self) -> anyhow::Result<ComparisonResult> {
        let first = extract_names(&std::fs::read_to_string(&self.first)?);
        let second = extract_names(&std::fs::read_to_string(&self.second)?);
        Ok(compare_names(&first, &second))
    }
}
