use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid assessment date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("score {total} exceeds instrument maximum {max}")]
    ScoreOutOfRange { total: u16, max: u8 },
}
