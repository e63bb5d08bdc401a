use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use mindscreen_export::styles::DocumentStyles;
use mindscreen_instruments::Instrument;
use mindscreen_session::Session;
use mindscreen_session::event::PresentationMode;
use mindscreen_speech::{Narrator, SpeechBackend};

use crate::error::ApiError;

/// One live session, its narration marker and when it was last used.
pub struct SessionEntry {
    pub session: Session,
    pub narrator: Narrator,
    pub last_active: Instant,
}

impl SessionEntry {
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub instrument: Arc<dyn Instrument>,
    pub speech: Arc<dyn SpeechBackend>,
    pub styles: Arc<DocumentStyles>,
    pub default_mode: PresentationMode,
    pub narration_by_default: bool,
    pub sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl AppState {
    pub fn new(
        instrument: Arc<dyn Instrument>,
        speech: Arc<dyn SpeechBackend>,
        default_mode: PresentationMode,
        narration_by_default: bool,
    ) -> Self {
        Self {
            instrument,
            speech,
            styles: Arc::new(DocumentStyles::default()),
            default_mode,
            narration_by_default,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn new_entry(&self, mode: PresentationMode, narration: bool) -> SessionEntry {
        SessionEntry {
            session: Session::new(Arc::clone(&self.instrument), mode, narration),
            narrator: Narrator::new(Arc::clone(&self.speech)),
            last_active: Instant::now(),
        }
    }

    /// Drop every session untouched for at least `max_idle` as of `now`.
    /// Returns how many were removed.
    pub async fn evict_idle(&self, now: Instant, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_active) < max_idle);
        before - sessions.len()
    }
}

/// Periodically evict abandoned sessions, discarding their intake details
/// and answers.
pub fn spawn_idle_sweep(state: AppState, max_idle: Duration) -> JoinHandle<()> {
    let period = (max_idle / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = state.evict_idle(Instant::now(), max_idle).await;
            if evicted > 0 {
                tracing::info!(evicted, "idle sessions discarded");
            }
        }
    })
}

pub fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("session not found: {id}"))
}
