use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use mindscreen_export::export_report;

use crate::error::ApiError;
use crate::state::{AppState, not_found};

/// Download the PDF report of a submitted session.
///
/// The session lock is released before rendering; a failure here leaves the
/// stored outcome untouched.
pub async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let input = {
        let mut sessions = state.sessions.lock().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.touch();
        entry
            .session
            .report_input(jiff::Timestamp::now())
            .ok_or_else(|| ApiError::Conflict("submit the assessment first".to_string()))?
    };

    let styles = state.styles.clone();
    let report = tokio::task::spawn_blocking(move || export_report(&input, &styles))
        .await
        .map_err(|e| ApiError::Internal(format!("report task failed: {e}")))??;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        report.filename
    ))
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(report.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
