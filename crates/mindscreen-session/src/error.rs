use thiserror::Error;

use mindscreen_core::error::CoreError;
use mindscreen_instruments::error::InstrumentError;

use crate::event::Phase;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("'{event}' is not available while {phase}")]
    InvalidEvent { event: &'static str, phase: Phase },

    #[error("intake incomplete: {0}")]
    Intake(#[from] CoreError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("question {position} is not the current question ({current})")]
    NotCurrentQuestion { position: usize, current: usize },

    #[error("next is unavailable: answer the current question first, or submit at the last one")]
    NextUnavailable,

    #[error("already at the first question")]
    BackUnavailable,
}
