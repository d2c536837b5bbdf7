//! End-to-end interview lifecycle scenarios, driven the way the service
//! loop drives the machine and coordinator.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use veritas::config::SessionConfig;
use veritas::{
    CaptureSource, CaptureStream, CoordinatorHandle, InterviewMachine, Screen, SessionPhase,
    SessionStatusHandle, SimulatedCaptureSource,
};

const TICK_MS: u64 = 10;

fn build_machine(source: Arc<dyn CaptureSource>) -> InterviewMachine {
    let options = SessionConfig {
        metric_interval_ms: TICK_MS,
        ..SessionConfig::default()
    };
    InterviewMachine::new(source, SessionStatusHandle::new(options.log_capacity), options)
}

/// Denies the first capture request, grants afterwards.
struct FlakyCapture {
    inner: SimulatedCaptureSource,
    deny_next: Mutex<bool>,
}

impl FlakyCapture {
    fn new() -> Self {
        Self {
            inner: SimulatedCaptureSource::granting(),
            deny_next: Mutex::new(true),
        }
    }
}

#[async_trait]
impl CaptureSource for FlakyCapture {
    async fn request_capture(&self) -> Result<CaptureStream> {
        {
            let mut deny = self.deny_next.lock().unwrap();
            if *deny {
                *deny = false;
                bail!("Capture request denied by host environment");
            }
        }
        self.inner.request_capture().await
    }
}

#[tokio::test(start_paused = true)]
async fn full_interview_reaches_report() {
    let coordinator = CoordinatorHandle::default();
    let machine = build_machine(Arc::new(SimulatedCaptureSource::granting()));

    let url = coordinator
        .begin("https://meet.example/interview-42", true)
        .await
        .unwrap();
    assert_eq!(coordinator.get().await.screen, Screen::Session);

    machine.deploy(&url).await.unwrap();
    assert_eq!(machine.status().phase().await, SessionPhase::Active);

    // one tick per question
    tokio::time::sleep(Duration::from_millis(5 * TICK_MS + 5)).await;

    let responses = ["a", "b", "c", "d", "e"];
    for response in &responses[..4] {
        assert!(machine.advance_question(response).await.unwrap().is_none());
    }

    let history = machine.status().get().await.metrics;
    assert_eq!(history.len(), 5);
    let expected_truth =
        history.iter().map(|m| m.truth_probability).sum::<f64>() / history.len() as f64;
    let expected_stress =
        history.iter().map(|m| m.stress_level).sum::<f64>() / history.len() as f64;

    let summary = machine.advance_question("e").await.unwrap().unwrap();
    assert_eq!(machine.status().phase().await, SessionPhase::Finished);

    assert_eq!(summary.sessions.len(), 5);
    assert_eq!(summary.meeting_url, "https://meet.example/interview-42");
    assert_eq!(summary.candidate_name, "Remote Subject");
    assert!(!summary.key_strengths.is_empty());
    assert!((summary.overall_truth_likelihood - expected_truth).abs() < 1e-12);
    assert!((summary.average_stress - expected_stress).abs() < 1e-12);

    let questions = machine.questions().to_vec();
    for (i, session) in summary.sessions.iter().enumerate() {
        assert_eq!(session.question, questions[i]);
        assert_eq!(session.response, responses[i]);
    }

    coordinator.complete(summary).await.unwrap();
    let state = coordinator.get().await;
    assert_eq!(state.screen, Screen::Report);
    assert!(state.summary.is_some());

    machine.reset().await;
    coordinator.reset().await;
    assert_eq!(coordinator.get().await.screen, Screen::Landing);
    assert_eq!(machine.status().phase().await, SessionPhase::Idle);
}

#[tokio::test]
async fn failed_deploy_leaves_a_clean_slate_for_retry() {
    let machine = build_machine(Arc::new(FlakyCapture::new()));

    assert!(machine.deploy("https://meet.example/retry").await.is_err());
    let state = machine.status().get().await;
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.metrics.is_empty());
    assert!(state.sessions.is_empty());
    assert!(state.log.contains("Uplink aborted. Bridge deployment failed."));

    machine.deploy("https://meet.example/retry").await.unwrap();
    assert_eq!(machine.status().phase().await, SessionPhase::Active);
}

#[tokio::test(start_paused = true)]
async fn stream_end_midway_never_produces_a_report() {
    let coordinator = CoordinatorHandle::default();
    let source = Arc::new(SimulatedCaptureSource::granting());
    let machine = build_machine(source.clone());

    let url = coordinator.begin("https://meet.example/drop", true).await.unwrap();
    machine.deploy(&url).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2 * TICK_MS + 5)).await;
    machine.advance_question("one").await.unwrap();
    machine.advance_question("two").await.unwrap();

    source.end_stream();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let state = machine.status().get().await;
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.log.contains("Uplink lost. Session ended."));
    assert!(state.sessions.is_empty());

    // the report screen is never reached
    let app = coordinator.get().await;
    assert_eq!(app.screen, Screen::Session);
    assert!(app.summary.is_none());
}
