//! Interview session lifecycle orchestrator.
//!
//! Drives a session from "not started" to "complete":
//! deploy → metric ticks → advance × N → report
//!
//! The capture provider is injected via constructor — no concrete types
//! hardcoded. All mutable state lives behind the shared status handle so
//! the tick task, the ended watcher, and API readers see one view.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::capture::{CaptureSource, CaptureStream};
use crate::config::SessionConfig;

use super::generator::{self, STRESS_SURGE_THRESHOLD};
use super::metrics::{BehavioralMetric, InterviewSummary, QuestionSession};
use super::report;
use super::status::{SessionPhase, SessionState, SessionStatusHandle};

pub struct InterviewMachine {
    capture: Arc<dyn CaptureSource>,
    status: SessionStatusHandle,
    questions: Vec<String>,
    tick_interval: Duration,
    log_capacity: usize,

    /// Handle for the repeating metric generator task
    tick_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// Handle for the stream-ended watcher task
    ended_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// The live capture feed; dropping it releases the feed
    stream: Arc<Mutex<Option<CaptureStream>>>,
}

impl InterviewMachine {
    pub fn new(
        capture: Arc<dyn CaptureSource>,
        status: SessionStatusHandle,
        options: SessionConfig,
    ) -> Self {
        Self {
            capture,
            status,
            questions: options.questions,
            tick_interval: Duration::from_millis(options.metric_interval_ms),
            log_capacity: options.log_capacity,
            tick_task: Arc::new(Mutex::new(None)),
            ended_task: Arc::new(Mutex::new(None)),
            stream: Arc::new(Mutex::new(None)),
        }
    }

    pub fn status(&self) -> SessionStatusHandle {
        self.status.clone()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Request a capture stream and bring the session live.
    ///
    /// On failure the machine returns to `Idle` with nothing retained; a
    /// fresh `deploy` call is required, nothing is retried automatically.
    pub async fn deploy(&self, meeting_url: &str) -> Result<()> {
        let start_epoch = {
            let mut state = self.status.lock().await;
            match state.phase {
                SessionPhase::Idle | SessionPhase::Bridging => {}
                phase => bail!("Cannot deploy while {}", phase.as_str()),
            }
            state.phase = SessionPhase::Bridging;
            state.meeting_url = meeting_url.to_string();
            let shown: String = meeting_url.chars().take(30).collect();
            state.log.push(&format!("Initiating bridge to: {shown}..."));
            state.epoch
        };

        let stream = match self.capture.request_capture().await {
            Ok(stream) => stream,
            Err(e) => {
                let mut state = self.status.lock().await;
                if state.epoch == start_epoch && state.phase == SessionPhase::Bridging {
                    state.phase = SessionPhase::Idle;
                    state.meeting_url.clear();
                    state.log.push("Uplink aborted. Bridge deployment failed.");
                }
                return Err(e);
            }
        };

        let ended_rx = stream.ended();
        let epoch = {
            let mut state = self.status.lock().await;
            if state.epoch != start_epoch || state.phase != SessionPhase::Bridging {
                // torn down while the grant was pending; discard the stream
                return Ok(());
            }
            state.epoch += 1;
            state.phase = SessionPhase::Active;
            state.started_at = Some(chrono::Utc::now());
            state.log.push("Participant identified. Bot deployed successfully.");
            state.epoch
        };

        *self.stream.lock().await = Some(stream);
        self.spawn_generator(epoch).await;
        self.spawn_ended_watcher(epoch, ended_rx).await;

        info!("Interview bridge deployed to {}", meeting_url);
        Ok(())
    }

    /// Snapshot the latest metric, record the current question, and move the
    /// cursor. The Nth call assembles and returns the final summary.
    pub async fn advance_question(&self, response: &str) -> Result<Option<InterviewSummary>> {
        let summary = {
            let mut state = self.status.lock().await;
            if state.phase != SessionPhase::Active {
                bail!(
                    "No active interview session (phase: {})",
                    state.phase.as_str()
                );
            }

            let snapshot = match state.latest_metric() {
                Some(metric) => metric.clone(),
                None => {
                    // No sample has landed yet; keep the fallback in the
                    // history so aggregation reflects it.
                    let neutral =
                        BehavioralMetric::neutral(chrono::Utc::now().timestamp_millis());
                    state.metrics.push(neutral.clone());
                    neutral
                }
            };

            let question = match self.questions.get(state.question_index) {
                Some(question) => question.clone(),
                None => bail!("Question list exhausted"),
            };
            state
                .sessions
                .push(QuestionSession::new(question, response, snapshot));

            if state.question_index + 1 < self.questions.len() {
                state.question_index += 1;
                let finalized = state.question_index;
                state.log.push(&format!("Query {finalized} finalized."));
                None
            } else {
                state.epoch += 1;
                state.phase = SessionPhase::Finished;
                Some(report::aggregate(
                    &state.meeting_url,
                    &state.metrics,
                    state.sessions.clone(),
                ))
            }
        };

        if summary.is_some() {
            self.stop_tasks().await;
            info!("Interview complete; report assembled");
        }

        Ok(summary)
    }

    /// Tear down the session on operator request. Discards all accumulated
    /// sessions and metrics; no summary is produced.
    pub async fn cancel(&self) -> Result<()> {
        {
            let mut state = self.status.lock().await;
            if state.phase == SessionPhase::Idle {
                warn!("Cancel requested with no session in progress");
                return Ok(());
            }
            state.epoch += 1;
            state.clear_to_idle();
            state.log.push("Bridge terminated by operator.");
        }
        self.stop_tasks().await;
        Ok(())
    }

    /// Start over for a fresh interview, including a fresh activity log.
    pub async fn reset(&self) {
        {
            let mut state = self.status.lock().await;
            let epoch = state.epoch + 1;
            *state = SessionState::new(self.log_capacity);
            state.epoch = epoch;
        }
        self.stop_tasks().await;
    }

    async fn spawn_generator(&self, epoch: u64) {
        let status = self.status.clone();
        let period = self.tick_interval;

        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; samples start one period in
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let metric =
                    generator::sample(&mut rng, chrono::Utc::now().timestamp_millis());

                let mut state = status.lock().await;
                if state.phase != SessionPhase::Active || state.epoch != epoch {
                    break;
                }
                if metric.stress_level > STRESS_SURGE_THRESHOLD {
                    state.log.push("SIGNAL: Physiological stress surge detected.");
                }
                state.metrics.push(metric);
            }
        });

        *self.tick_task.lock().await = Some(task);
    }

    async fn spawn_ended_watcher(&self, epoch: u64, mut ended_rx: watch::Receiver<bool>) {
        let status = self.status.clone();
        let tick_task = Arc::clone(&self.tick_task);
        let stream = Arc::clone(&self.stream);

        let task = tokio::spawn(async move {
            if ended_rx.wait_for(|ended| *ended).await.is_err() {
                // stream released locally without an end signal
                return;
            }

            let mut state = status.lock().await;
            if state.epoch != epoch || state.phase != SessionPhase::Active {
                return;
            }
            state.epoch += 1;
            state.clear_to_idle();
            state.log.push("Uplink lost. Session ended.");
            drop(state);

            warn!("Capture stream ended externally; session torn down");

            if let Some(task) = tick_task.lock().await.take() {
                task.abort();
            }
            *stream.lock().await = None;
        });

        *self.ended_task.lock().await = Some(task);
    }

    async fn stop_tasks(&self) {
        if let Some(task) = self.tick_task.lock().await.take() {
            task.abort();
        }
        if let Some(task) = self.ended_task.lock().await.take() {
            task.abort();
        }
        *self.stream.lock().await = None;
    }
}
