use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Local;
use serde_json::json;
use std::sync::Arc;
use weg_protokoll::meetings::{
    placeholder, MeetingId, MeetingRepository, PdfEngine, ProtocolError, ProtocolService,
    TokenCategory,
};

/// Router builder exposing the protocol export surface.
pub(crate) fn protocol_router<R, E>(service: Arc<ProtocolService<R, E>>) -> Router
where
    R: MeetingRepository + 'static,
    E: PdfEngine + 'static,
{
    Router::new()
        .route(
            "/api/v1/meetings/:meeting_id/protocol",
            get(protocol_export_endpoint::<R, E>),
        )
        .with_state(service)
        .route("/api/v1/placeholders", get(placeholder_catalog_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Token catalog grouped by category, as consumed by the template editor UI.
pub(crate) async fn placeholder_catalog_endpoint() -> Json<serde_json::Value> {
    let entries = placeholder::catalog();
    let groups: Vec<serde_json::Value> = TokenCategory::ordered()
        .into_iter()
        .map(|category| {
            let placeholders: Vec<&placeholder::PlaceholderEntry> = entries
                .iter()
                .filter(|entry| entry.category == category)
                .collect();
            json!({
                "category": category,
                "label": category.label(),
                "placeholders": placeholders,
            })
        })
        .collect();

    Json(json!({ "categories": groups }))
}

/// Renders the meeting protocol and streams it back as a PDF download.
pub(crate) async fn protocol_export_endpoint<R, E>(
    State(service): State<Arc<ProtocolService<R, E>>>,
    Path(meeting_id): Path<String>,
) -> Response
where
    R: MeetingRepository + 'static,
    E: PdfEngine + 'static,
{
    let meeting_id = MeetingId(meeting_id);
    let generated_on = Local::now().date_naive();

    match service.export(&meeting_id, generated_on).await {
        Ok(protocol) => {
            let disposition = format!("attachment; filename=\"{}\"", protocol.filename);
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        mime::APPLICATION_PDF.as_ref().to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                protocol.pdf,
            )
                .into_response()
        }
        Err(error) if error.is_not_found() => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error @ ProtocolError::Render(_)) => {
            tracing::error!(%meeting_id, error = %error, "protocol rendering failed");
            let payload = json!({ "error": "protocol rendering failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Err(other) => {
            tracing::error!(%meeting_id, error = %other, "protocol export failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
