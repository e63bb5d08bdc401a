use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A total questionnaire score together with the instrument maximum.
///
/// Only constructed from a fully answered response set, so a `Score` value
/// always lies within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    total: u8,
    max: u8,
}

impl Score {
    pub fn new(total: u16, max: u8) -> Result<Self, CoreError> {
        if total > u16::from(max) {
            return Err(CoreError::ScoreOutOfRange { total, max });
        }
        Ok(Self {
            total: total as u8,
            max,
        })
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.total, self.max)
    }
}
