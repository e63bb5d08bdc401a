use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindscreen_session::event::{Event, PresentationMode};
use mindscreen_session::view::SessionView;
use mindscreen_speech::Dispatch;

use crate::error::ApiError;
use crate::state::{AppState, SessionEntry, not_found};

#[derive(Debug, Default, Deserialize)]
pub struct CreateSession {
    #[serde(default)]
    pub mode: Option<PresentationMode>,
    #[serde(default)]
    pub narration: Option<bool>,
}

#[derive(Serialize)]
pub struct CreatedSession {
    pub id: Uuid,
    pub view: SessionView,
}

/// Response to an applied event.
#[derive(Serialize)]
pub struct EventResponse {
    pub view: SessionView,
    /// Text the page should speak through the browser, in order.
    pub speak: Vec<String>,
    /// Non-blocking problems, e.g. narration failures.
    pub warnings: Vec<String>,
}

pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSession>,
) -> Json<CreatedSession> {
    let entry = state.new_entry(
        req.mode.unwrap_or(state.default_mode),
        req.narration.unwrap_or(state.narration_by_default),
    );
    let view = entry.session.view();

    let id = Uuid::new_v4();
    state.sessions.lock().await.insert(id, entry);
    tracing::info!(session = %id, "session created");

    Json(CreatedSession { id, view })
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
    entry.touch();
    Ok(Json(entry.session.view()))
}

pub async fn apply_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<Event>,
) -> Result<Json<EventResponse>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
    entry.touch();

    let restart = matches!(event, Event::TakeAgain | Event::StartOver);
    let transition = entry.session.apply(event, jiff::Zoned::now().date())?;
    if restart {
        entry.narrator.reset();
    }

    let (speak, warnings) = narrate(entry, &transition.narration);

    Ok(Json(EventResponse {
        view: entry.session.view(),
        speak,
        warnings,
    }))
}

/// Hand narration requests to the session's narrator. Failures become
/// warnings; they never fail the request.
fn narrate(entry: &mut SessionEntry, texts: &[String]) -> (Vec<String>, Vec<String>) {
    let mut speak = Vec::new();
    let mut warnings = Vec::new();

    for text in texts {
        match entry.narrator.speak(text) {
            Ok(Some(Dispatch::Client(text))) => speak.push(text),
            Ok(Some(Dispatch::Native | Dispatch::Muted)) | Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "narration unavailable");
                warnings.push(format!("Text-to-speech failed: {e}"));
            }
        }
    }

    (speak, warnings)
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    state
        .sessions
        .lock()
        .await
        .remove(&id)
        .ok_or_else(|| not_found(id))?;
    tracing::info!(session = %id, "session discarded");
    Ok(Json(()))
}
