//! Import statistics

use std::fmt;
use std::ops::AddAssign;

/// Row counts of one or more CSV imports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Data rows read, header excluded
    pub total_rows: usize,
    pub parsed: usize,
    /// Rows skipped because they failed validation
    pub failed: usize,
}

impl AddAssign for ImportStats {
    fn add_assign(&mut self, other: Self) {
        self.total_rows += other.total_rows;
        self.parsed += other.parsed;
        self.failed += other.failed;
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} imported, {} skipped",
            self.total_rows, self.parsed, self.failed
        )
    }
}
