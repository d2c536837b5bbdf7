//! Session phase, state, and the shared status handle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::log::ActivityLog;
use super::metrics::{BehavioralMetric, QuestionSession};

/// Phase of the interview session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No capture stream held.
    Idle,
    /// Capture requested from the host, not yet granted.
    Bridging,
    /// Capture live, metric generator running.
    Active,
    /// Terminal; the summary has been handed off.
    Finished,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Bridging => "bridging",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

/// Mutable session state owned by the machine and read by API handlers.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub meeting_url: String,
    pub question_index: usize,
    /// Full ordered metric history; the last entry drives the live display
    /// and the whole sequence feeds report aggregation.
    pub metrics: Vec<BehavioralMetric>,
    pub sessions: Vec<QuestionSession>,
    pub log: ActivityLog,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Generation counter. Bumped on every teardown so a tick sampled
    /// before an abort landed cannot touch a since-reset state.
    pub epoch: u64,
}

impl SessionState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            phase: SessionPhase::Idle,
            meeting_url: String::new(),
            question_index: 0,
            metrics: Vec::new(),
            sessions: Vec::new(),
            log: ActivityLog::new(log_capacity),
            started_at: None,
            epoch: 0,
        }
    }

    /// Drop all accumulated session data and return to `Idle`. The activity
    /// log is retained; callers append their exit message.
    pub fn clear_to_idle(&mut self) {
        self.phase = SessionPhase::Idle;
        self.meeting_url.clear();
        self.question_index = 0;
        self.metrics.clear();
        self.sessions.clear();
        self.started_at = None;
    }

    pub fn latest_metric(&self) -> Option<&BehavioralMetric> {
        self.metrics.last()
    }
}

/// Thread-safe handle for sharing session state between the machine, its
/// spawned tasks, and API handlers.
#[derive(Clone)]
pub struct SessionStatusHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStatusHandle {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState::new(log_capacity))),
        }
    }

    pub async fn get(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.lock().await.phase
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().await
    }
}
