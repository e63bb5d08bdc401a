use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordered severity bands of a BDI-II total score.
///
/// Declaration order is the clinical order, so the derived `Ord` gives
/// `Minimal < Mild < Moderate < Severe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Minimal,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
    ];

    /// Human-readable label used in the UI and in exported reports.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Bands at which the crisis advisory is always shown.
    pub const fn is_elevated(self) -> bool {
        matches!(self, Severity::Moderate | Severity::Severe)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
