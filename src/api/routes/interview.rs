//! Interview control endpoints.
//!
//! Intents (begin, deploy, advance, cancel, reset) are forwarded to the
//! service loop over the command channel; reads come straight from the
//! shared status and coordinator handles.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::api::error::{ApiError, ApiResult};
use crate::app::coordinator::CoordinatorHandle;
use crate::session::SessionStatusHandle;

/// User intents accepted by the service loop.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    Begin { url: String, consent: bool },
    Deploy,
    Advance { response: String },
    Cancel,
    Reset,
}

#[derive(Clone)]
pub struct InterviewState {
    pub tx: mpsc::Sender<ApiCommand>,
    pub status: SessionStatusHandle,
    pub coordinator: CoordinatorHandle,
    pub questions: Vec<String>,
}

/// Request body for starting an interview from the landing screen.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BeginRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub consent: bool,
}

/// Request body for advancing past the current question.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub response: String,
}

pub fn router(state: InterviewState) -> Router {
    Router::new()
        .route("/begin", post(begin))
        .route("/deploy", post(deploy))
        .route("/advance", post(advance))
        .route("/cancel", post(cancel))
        .route("/reset", post(reset))
        .route("/status", get(status))
        .route("/report", get(report))
        .with_state(state)
}

async fn send(state: &InterviewState, command: ApiCommand) -> ApiResult<Json<Value>> {
    state
        .tx
        .send(command)
        .await
        .map_err(|e| ApiError::internal(format!("Service unavailable: {e}")))?;
    Ok(Json(json!({ "accepted": true })))
}

async fn begin(
    State(state): State<InterviewState>,
    Json(request): Json<BeginRequest>,
) -> ApiResult<Json<Value>> {
    send(
        &state,
        ApiCommand::Begin {
            url: request.url,
            consent: request.consent,
        },
    )
    .await
}

async fn deploy(State(state): State<InterviewState>) -> ApiResult<Json<Value>> {
    send(&state, ApiCommand::Deploy).await
}

async fn advance(
    State(state): State<InterviewState>,
    Json(request): Json<AdvanceRequest>,
) -> ApiResult<Json<Value>> {
    send(
        &state,
        ApiCommand::Advance {
            response: request.response,
        },
    )
    .await
}

async fn cancel(State(state): State<InterviewState>) -> ApiResult<Json<Value>> {
    send(&state, ApiCommand::Cancel).await
}

async fn reset(State(state): State<InterviewState>) -> ApiResult<Json<Value>> {
    send(&state, ApiCommand::Reset).await
}

async fn status(State(state): State<InterviewState>) -> Json<Value> {
    let coordinator = state.coordinator.get().await;
    let session = state.status.get().await;

    let current_question = (session.question_index < state.questions.len())
        .then(|| state.questions[session.question_index].clone());

    Json(json!({
        "screen": coordinator.screen,
        "meeting_url": coordinator.meeting_url,
        "phase": session.phase,
        "question_index": session.question_index,
        "current_question": current_question,
        "questions_total": state.questions.len(),
        "latest_metric": session.latest_metric(),
        "metrics_collected": session.metrics.len(),
        "sessions_recorded": session.sessions.len(),
        "started_at": session.started_at,
        "log": session.log.entries(),
    }))
}

async fn report(State(state): State<InterviewState>) -> ApiResult<Json<Value>> {
    let coordinator = state.coordinator.get().await;
    match coordinator.summary {
        Some(summary) => Ok(Json(json!(summary))),
        None => Err(ApiError::not_found("No completed interview report")),
    }
}
