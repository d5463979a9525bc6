//! Header lookup with Chinese/English aliases

use std::collections::HashMap;

use csv::StringRecord;
use shared::{Result, RosterError};

const BOM: char = '\u{feff}';

/// Column positions keyed by header text
pub(crate) struct Columns {
    by_header: HashMap<String, usize>,
}

impl Columns {
    pub(crate) fn new(headers: &StringRecord) -> Self {
        let by_header = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches(BOM).trim().to_string(), i))
            .collect();
        Self { by_header }
    }

    pub(crate) fn has(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|a| self.by_header.contains_key(*a))
    }

    /// Fail unless one of the aliases is present
    pub(crate) fn require(&self, aliases: &[&str]) -> Result<()> {
        if self.has(aliases) {
            Ok(())
        } else {
            Err(RosterError::Import(format!(
                "missing column {}",
                aliases.join("/")
            )))
        }
    }

    /// First non-empty cell among the aliases
    pub(crate) fn text<'r>(&self, record: &'r StringRecord, aliases: &[&str]) -> Option<&'r str> {
        aliases
            .iter()
            .filter_map(|a| self.by_header.get(*a))
            .filter_map(|&i| record.get(i))
            .map(str::trim)
            .find(|cell| !cell.is_empty())
    }

    /// Non-negative integer cell; missing or empty reads as zero
    ///
    /// A decimal such as `12000.5` is truncated to its integer part.
    pub(crate) fn number(
        &self,
        record: &StringRecord,
        aliases: &[&str],
    ) -> std::result::Result<u64, String> {
        match self.text(record, aliases) {
            None => Ok(0),
            Some(raw) => parse_truncated(raw)
                .ok_or_else(|| format!("invalid {} value '{}'", aliases[0], raw)),
        }
    }
}

fn parse_truncated(raw: &str) -> Option<u64> {
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    whole.parse().ok()
}
