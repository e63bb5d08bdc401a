use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Intake details collected before questioning begins.
///
/// Name and age are free-form; the only rule is that both are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub name: String,
    pub age: String,
    pub assessment_date: Date,
}

impl PatientRecord {
    /// Build a record from raw form input, trimming whitespace and applying
    /// intake validation.
    ///
    /// A missing or blank `assessment_date` defaults to `today`; otherwise it
    /// must be `YYYY-MM-DD`.
    pub fn from_intake(
        name: &str,
        age: &str,
        assessment_date: Option<&str>,
        today: Date,
    ) -> Result<Self, CoreError> {
        let name = name.trim();
        let age = age.trim();

        if name.is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        if age.is_empty() {
            return Err(CoreError::MissingField("age".to_string()));
        }

        let assessment_date = match assessment_date.map(str::trim) {
            None | Some("") => today,
            Some(raw) => parse_date(raw)?,
        };

        Ok(Self {
            name: name.to_string(),
            age: age.to_string(),
            assessment_date,
        })
    }
}

fn parse_date(raw: &str) -> Result<Date, CoreError> {
    raw.parse::<Date>().map_err(|e| CoreError::InvalidDate {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
