use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::domain::{EvaluationSnapshot, RawReadings};
use super::history::HistorySeries;
use super::repository::{RepositoryError, SessionRepository};
use super::service::{AssessmentService, AssessmentServiceError};
use super::session::SessionId;

/// Router builder exposing stateless assessment and session endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<R>))
        .route("/api/v1/sessions", post(open_session_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            axum::routing::delete(close_session_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/evaluations",
            post(evaluate_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/history",
            get(history_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/history/csv",
            get(history_csv_handler::<R>),
        )
        .with_state(service)
}

/// Session history as exposed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    pub evicted: u64,
    pub entries: Vec<EvaluationSnapshot>,
    pub series: HistorySeries,
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_))
        | AssessmentServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(readings): axum::Json<RawReadings>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.assess(readings) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_session_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.open_session() {
        Ok(summary) => (StatusCode::CREATED, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(readings): axum::Json<RawReadings>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.evaluate(&SessionId(session_id), readings) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let session = match service.session(&SessionId(session_id)) {
        Ok(session) => session,
        Err(error) => return error_response(error),
    };

    let history = session.history();
    let view = HistoryView {
        session_id: session.id.clone(),
        created_at: session.created_at,
        history_limit: history.limit().map(std::num::NonZeroUsize::get),
        evicted: history.evicted(),
        entries: history.all().cloned().collect(),
        series: history.series(),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn history_csv_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.export_csv(&SessionId(session_id)) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_session_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close_session(&SessionId(session_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
