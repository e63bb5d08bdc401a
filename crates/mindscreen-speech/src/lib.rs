//! mindscreen-speech
//!
//! Narration of question and advisory text. A [`SpeechBackend`] is chosen
//! once at startup: a local engine process when one is installed, otherwise
//! delegation to the browser's Web Speech API. [`Narrator`] wraps a backend
//! with per-session de-duplication.

pub mod error;
pub mod native;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SpeechError;
use crate::native::NativeSpeech;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Native,
    Browser,
    Silent,
}

/// What a backend did with an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Handed to a local engine running in the background.
    Native,
    /// Must be spoken by the client; carries the text to speak.
    Client(String),
    /// Dropped: narration is switched off for this installation.
    Muted,
}

/// A speech synthesis capability.
///
/// Implementations must return promptly: anything that plays audio
/// synchronously belongs on a background task.
pub trait SpeechBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn speak(&self, text: &str) -> Result<Dispatch, SpeechError>;
}

/// Delegates speech to the browser. Fire-and-forget: the text is returned to
/// the caller, which forwards it to the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpeech;

impl SpeechBackend for BrowserSpeech {
    fn kind(&self) -> BackendKind {
        BackendKind::Browser
    }

    fn speak(&self, text: &str) -> Result<Dispatch, SpeechError> {
        Ok(Dispatch::Client(text.to_string()))
    }
}

/// Discards every utterance. Selected when narration is turned off in
/// config, so per-session toggles have nothing to speak through.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl SpeechBackend for SilentSpeech {
    fn kind(&self) -> BackendKind {
        BackendKind::Silent
    }

    fn speak(&self, _text: &str) -> Result<Dispatch, SpeechError> {
        Ok(Dispatch::Muted)
    }
}

/// Which backend to select at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPreference {
    /// Native engine when one is installed, browser otherwise.
    #[default]
    Auto,
    Native,
    Browser,
    /// No narration at all.
    Off,
}

/// Select a backend by probing the environment.
///
/// A `Native` preference with no engine installed falls back to the browser
/// with a warning.
pub fn detect_backend(preference: SpeechPreference) -> Arc<dyn SpeechBackend> {
    let engine = match preference {
        SpeechPreference::Off => {
            info!("narration disabled");
            return Arc::new(SilentSpeech);
        }
        SpeechPreference::Browser => None,
        SpeechPreference::Auto | SpeechPreference::Native => native::find_engine_on_path(),
    };

    match engine {
        Some(engine) => {
            info!(program = %engine.program.display(), "using native speech engine");
            Arc::new(NativeSpeech::new(engine))
        }
        None => {
            if preference == SpeechPreference::Native {
                warn!("no native speech engine found; delegating narration to the browser");
            } else {
                info!("using browser speech");
            }
            Arc::new(BrowserSpeech)
        }
    }
}

/// Per-session narration with de-duplication.
///
/// Remembers the last text handed to the backend and skips identical
/// repeats, so re-rendering a view never re-speaks it.
pub struct Narrator {
    backend: Arc<dyn SpeechBackend>,
    last_spoken: Option<String>,
}

impl Narrator {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            last_spoken: None,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }

    /// Speak `text` unless it was the last thing spoken.
    ///
    /// Returns `Ok(None)` for a skipped repeat. The marker is updated before
    /// the backend is called, so a failing backend is not retried for the
    /// same text.
    pub fn speak(&mut self, text: &str) -> Result<Option<Dispatch>, SpeechError> {
        if text.trim().is_empty() || self.last_spoken.as_deref() == Some(text) {
            return Ok(None);
        }
        self.last_spoken = Some(text.to_string());
        self.backend.speak(text).map(Some)
    }

    /// Forget the last-spoken marker.
    pub fn reset(&mut self) {
        self.last_spoken = None;
    }
}
