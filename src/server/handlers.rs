//! HTTP handlers for the dashboard API.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::error::ApiError;
use super::page::DASHBOARD_HTML;
use super::AppState;
use crate::analysis::{orchestrator, Failure};
use crate::intake::{self, IntakeError, UploadedFile};
use crate::report::{build_report, AnalysisReport};
use crate::session::Phase;

/// Session snapshot rendered by the dashboard poll loop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub running: bool,
    pub progress: u8,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<UploadedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
}

pub(super) fn current_view(state: &AppState) -> SessionView {
    let snapshot = state.session.snapshot();
    SessionView {
        phase: snapshot.phase,
        running: snapshot.running,
        progress: snapshot.progress,
        step: snapshot.step,
        file: snapshot.file,
        report: snapshot.result.as_ref().map(build_report),
        error: snapshot.error,
    }
}

/// Serve the embedded dashboard page.
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Current session snapshot.
pub async fn session_view(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(current_view(&state))
}

/// Accept a single document upload and select it into the session.
///
/// Exactly one `file` part per submission; a second one rejects the whole
/// request. An optional `last_modified` part carries the browser's
/// millisecond timestamp for the file.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, ApiError> {
    let mut file_part: Option<(String, Vec<u8>)> = None;
    let mut last_modified: Option<DateTime<Utc>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IntakeError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                if file_part.is_some() {
                    return Err(IntakeError::MultipleFiles.into());
                }
                let filename = field.file_name().unwrap_or("document").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| IntakeError::Malformed(e.to_string()))?;
                file_part = Some((filename, bytes.to_vec()));
            }
            "last_modified" => {
                let text = field.text().await.unwrap_or_default();
                last_modified = text
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
            }
            _ => {}
        }
    }

    let (filename, bytes) = file_part.ok_or(IntakeError::NoFile)?;
    let uploaded = intake::accept_upload(&filename, bytes, last_modified)?;

    tracing::info!(
        file = %uploaded.name,
        size = uploaded.size,
        mime = %uploaded.mime_type,
        "File selected"
    );

    let (_, replaced) = state.session.select_file(uploaded)?;
    if let Some(old) = replaced {
        tracing::debug!(file = %old.name, "Previous file released");
    }

    Ok(Json(current_view(&state)))
}

/// Start analysis of the selected file.
pub async fn start_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    orchestrator::start_analysis(&state.session, &state.analyzer, state.options.clone())?;
    Ok(Json(current_view(&state)))
}
