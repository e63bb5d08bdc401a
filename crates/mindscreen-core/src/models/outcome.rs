use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::score::Score;
use super::severity::Severity;

/// The stored result of a submitted screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Outcome {
    pub score: Score,
    pub severity: Severity,
    pub advisory: String,
    /// Whether the crisis-resources message accompanies the advisory.
    pub show_crisis_advisory: bool,
}

/// One answered item, as listed in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemSummary {
    /// 1-based item number.
    pub number: usize,
    pub title: String,
    pub statement: String,
    pub ordinal: u8,
}
