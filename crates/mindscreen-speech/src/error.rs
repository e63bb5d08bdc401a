use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech backend unavailable: {0}")]
    Unavailable(String),

    #[error("speech engine failed: {0}")]
    Engine(String),
}
