//! REST API server for Veritas.
//!
//! Provides HTTP endpoints for:
//! - Interview control (begin, deploy, advance, cancel, reset)
//! - Live session status and the activity log
//! - The finished interview report

pub mod error;
pub mod routes;

use crate::app::coordinator::CoordinatorHandle;
use crate::config::Config;
use crate::session::SessionStatusHandle;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::interview::{AdvanceRequest, ApiCommand, BeginRequest, InterviewState};

pub struct ApiServer {
    port: u16,
    interview_state: InterviewState,
}

impl ApiServer {
    pub fn new(
        tx: tokio::sync::mpsc::Sender<ApiCommand>,
        status: SessionStatusHandle,
        coordinator: CoordinatorHandle,
        config: &Config,
    ) -> Self {
        Self {
            port: config.api.port,
            interview_state: InterviewState {
                tx,
                status,
                coordinator,
                questions: config.session.questions.clone(),
            },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(service_info))
            .route("/version", get(version))
            .merge(routes::interview::router(self.interview_state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /         - Service info");
        info!("  GET  /version  - Get version info");
        info!("  POST /begin    - Start an interview (url + consent)");
        info!("  POST /deploy   - Bridge into the meeting and start analysis");
        info!("  POST /advance  - Record the current question and move on");
        info!("  POST /cancel   - Terminate the session");
        info!("  POST /reset    - Dismiss the report and return to landing");
        info!("  GET  /status   - Live screen/phase/metric/log state");
        info!("  GET  /report   - Finished interview report");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "veritas",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "veritas"
    }))
}
