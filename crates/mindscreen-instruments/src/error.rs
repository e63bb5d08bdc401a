use thiserror::Error;

use mindscreen_core::error::CoreError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("answer all questions: {} unanswered", missing.len())]
    IncompleteInput { missing: Vec<usize> },

    #[error("question position {position} is outside 0..{len}")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("option {ordinal} is not valid for '{item_id}' (0..={max})")]
    OrdinalOutOfRange {
        item_id: String,
        ordinal: u8,
        max: u8,
    },

    #[error("response set has {actual} slots, instrument '{instrument_id}' expects {expected}")]
    LengthMismatch {
        instrument_id: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
