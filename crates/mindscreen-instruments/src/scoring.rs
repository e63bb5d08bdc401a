use serde::{Deserialize, Serialize};
use ts_rs::TS;

use mindscreen_core::models::score::Score;
use mindscreen_core::models::severity::Severity;

use crate::error::InstrumentError;

/// Highest option ordinal on a four-statement item.
pub const MAX_ORDINAL: u8 = 3;

/// A single questionnaire item: a prompt plus its statements ordered from
/// least to most severe. An option's index is its ordinal weight.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub options: Vec<String>,
}

impl Item {
    pub fn max_ordinal(&self) -> u8 {
        self.options.len().saturating_sub(1) as u8
    }
}

/// The working answers of one session: one slot per item, `None` until the
/// respondent picks an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseSet {
    slots: Vec<Option<u8>>,
}

impl ResponseSet {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<u8> {
        self.slots.get(position).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<u8>] {
        &self.slots
    }

    /// Record an answer. Ordinal bounds are checked against [`MAX_ORDINAL`];
    /// per-item bounds are enforced by `Instrument::record`.
    pub fn set(&mut self, position: usize, ordinal: u8) -> Result<(), InstrumentError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(InstrumentError::PositionOutOfRange { position, len })?;
        if ordinal > MAX_ORDINAL {
            return Err(InstrumentError::OrdinalOutOfRange {
                item_id: format!("#{position}"),
                ordinal,
                max: MAX_ORDINAL,
            });
        }
        *slot = Some(ordinal);
        Ok(())
    }

    pub fn clear(&mut self, position: usize) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = None;
        }
    }

    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn is_answered(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn unanswered_positions(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Sum a fully answered response set.
///
/// Fails with [`InstrumentError::IncompleteInput`] listing every unanswered
/// position when any slot is still empty.
pub fn score(responses: &ResponseSet, max: u8) -> Result<Score, InstrumentError> {
    let missing = responses.unanswered_positions();
    if !missing.is_empty() {
        return Err(InstrumentError::IncompleteInput { missing });
    }

    let total: u16 = responses
        .slots()
        .iter()
        .flatten()
        .map(|&ordinal| u16::from(ordinal))
        .sum();

    Ok(Score::new(total, max)?)
}

/// Map a BDI-II total to its severity band.
///
/// Closed ranges: 0–13 minimal, 14–19 mild, 20–28 moderate, 29+ severe.
pub const fn classify(total: u8) -> Severity {
    match total {
        0..=13 => Severity::Minimal,
        14..=19 => Severity::Mild,
        20..=28 => Severity::Moderate,
        _ => Severity::Severe,
    }
}
