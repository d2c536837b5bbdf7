pub mod coordinator;

use crate::api::{ApiCommand, ApiServer};
use crate::capture::SimulatedCaptureSource;
use crate::config::Config;
use crate::session::{InterviewMachine, SessionStatusHandle};
use anyhow::Result;
use coordinator::CoordinatorHandle;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting Veritas service");

    let config = Config::load()?;

    let (tx, mut rx) = mpsc::channel::<ApiCommand>(10);

    let capture = Arc::new(SimulatedCaptureSource::granting());
    let status_handle = SessionStatusHandle::new(config.session.log_capacity);
    let machine = InterviewMachine::new(
        capture,
        status_handle.clone(),
        config.session.clone(),
    );
    let coordinator = CoordinatorHandle::default();

    let api_server = ApiServer::new(tx, status_handle, coordinator.clone(), &config);
    tokio::spawn(async move {
        if let Err(e) = api_server.start().await {
            error!("API server failed: {}", e);
        }
    });

    info!("Veritas is ready!");
    info!("Start an interview: curl -X POST http://127.0.0.1:{}/begin -H 'content-type: application/json' -d '{{\"url\":\"https://meet.example/room\",\"consent\":true}}'", config.api.port);
    info!("Then bridge in:     curl -X POST http://127.0.0.1:{}/deploy", config.api.port);

    while let Some(command) = rx.recv().await {
        match command {
            ApiCommand::Begin { url, consent } => {
                match coordinator.begin(&url, consent).await {
                    Ok(effective_url) => info!("Interview started for {}", effective_url),
                    Err(e) => warn!("Interview not started: {}", e),
                }
            }
            ApiCommand::Deploy => {
                let state = coordinator.get().await;
                match state.meeting_url {
                    Some(url) => {
                        if let Err(e) = machine.deploy(&url).await {
                            error!("Deployment failed: {}", e);
                        }
                    }
                    None => warn!("Deploy requested before an interview was started"),
                }
            }
            ApiCommand::Advance { response } => {
                match machine.advance_question(&response).await {
                    Ok(Some(summary)) => {
                        if let Err(e) = coordinator.complete(summary).await {
                            error!("Failed to hand off report: {}", e);
                        }
                    }
                    Ok(None) => info!("Question finalized"),
                    Err(e) => warn!("Advance ignored: {}", e),
                }
            }
            ApiCommand::Cancel => {
                if let Err(e) = machine.cancel().await {
                    error!("Failed to cancel session: {}", e);
                }
                coordinator.reset().await;
            }
            ApiCommand::Reset => {
                machine.reset().await;
                coordinator.reset().await;
            }
        }
    }

    Ok(())
}
