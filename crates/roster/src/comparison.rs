//! Name list comparison
//!
//! OCR output is free text; character names are runs of two to four CJK
//! ideographs. Two extracted lists are then diffed.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Diff of two name lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Names of group 1 that also appear in group 2
    pub common: Vec<String>,
    pub only_in_group1: Vec<String>,
    pub only_in_group2: Vec<String>,
}

fn name_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new("[\u{4e00}-\u{9fa5}]{2,4}").ok())
        .as_ref()
}

/// Every character name in `text`, line by line, in order of appearance
pub fn extract_names(text: &str) -> Vec<String> {
    let Some(pattern) = name_pattern() else {
        return Vec::new();
    };

    text.lines()
        .flat_map(|line| pattern.find_iter(line).map(|m| m.as_str().to_string()))
        .collect()
}

/// Diff two name lists; order and duplicates follow the source list
pub fn compare_names(group1: &[String], group2: &[String]) -> ComparisonResult {
    let set1: HashSet<&str> = group1.iter().map(String::as_str).collect();
    let set2: HashSet<&str> = group2.iter().map(String::as_str).collect();

    ComparisonResult {
        common: group1
            .iter()
            .filter(|n| set2.contains(n.as_str()))
            .cloned()
            .collect(),
        only_in_group1: group1
            .iter()
            .filter(|n| !set2.contains(n.as_str()))
            .cloned()
            .collect(),
        only_in_group2: group2
            .iter()
            .filter(|n| !set1.contains(n.as_str()))
            .cloned()
            .collect(),
    }
}
