//! Top-level screen coordinator.
//!
//! A strict linear state machine over the three screens:
//! Landing → Session → Report → (reset) → Landing
//!
//! The coordinator holds the only cross-screen shared state: the current
//! screen, the meeting URL, and the finished summary.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::session::InterviewSummary;

/// Label substituted when the operator submits an empty meeting URL.
pub const URL_PLACEHOLDER: &str = "External Link Provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Landing,
    Session,
    Report,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Session => "session",
            Self::Report => "report",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorState {
    pub screen: Screen,
    pub meeting_url: Option<String>,
    pub summary: Option<InterviewSummary>,
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self {
            screen: Screen::Landing,
            meeting_url: None,
            summary: None,
        }
    }
}

/// Thread-safe handle for sharing screen state between the command loop and
/// API handlers.
#[derive(Clone, Default)]
pub struct CoordinatorHandle {
    inner: Arc<Mutex<CoordinatorState>>,
}

impl CoordinatorHandle {
    pub async fn get(&self) -> CoordinatorState {
        self.inner.lock().await.clone()
    }

    /// Landing → Session. Requires the consent flag; an empty URL is
    /// accepted and substituted with a placeholder label. Returns the
    /// effective meeting URL.
    pub async fn begin(&self, meeting_url: &str, consent: bool) -> Result<String> {
        let mut state = self.inner.lock().await;
        if state.screen != Screen::Landing {
            bail!("Cannot begin an interview from the {} screen", state.screen.as_str());
        }
        if !consent {
            bail!("Consent not confirmed; interview not started");
        }

        let url = if meeting_url.trim().is_empty() {
            URL_PLACEHOLDER.to_string()
        } else {
            meeting_url.to_string()
        };

        state.screen = Screen::Session;
        state.meeting_url = Some(url.clone());
        state.summary = None;
        Ok(url)
    }

    /// Session → Report, carrying the finished summary.
    pub async fn complete(&self, summary: InterviewSummary) -> Result<()> {
        let mut state = self.inner.lock().await;
        if state.screen != Screen::Session {
            bail!(
                "Cannot complete an interview from the {} screen",
                state.screen.as_str()
            );
        }
        state.screen = Screen::Report;
        state.summary = Some(summary);
        Ok(())
    }

    /// Return to Landing, clearing the URL and summary.
    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        *state = CoordinatorState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::report;

    fn summary() -> InterviewSummary {
        report::aggregate("url", &[], Vec::new())
    }

    #[tokio::test]
    async fn test_linear_flow() {
        let coordinator = CoordinatorHandle::default();
        assert_eq!(coordinator.get().await.screen, Screen::Landing);

        let url = coordinator.begin("https://meet.example", true).await.unwrap();
        assert_eq!(url, "https://meet.example");
        assert_eq!(coordinator.get().await.screen, Screen::Session);

        coordinator.complete(summary()).await.unwrap();
        let state = coordinator.get().await;
        assert_eq!(state.screen, Screen::Report);
        assert!(state.summary.is_some());

        coordinator.reset().await;
        let state = coordinator.get().await;
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.meeting_url.is_none());
        assert!(state.summary.is_none());
    }

    #[tokio::test]
    async fn test_consent_gate() {
        let coordinator = CoordinatorHandle::default();
        assert!(coordinator.begin("https://meet.example", false).await.is_err());
        assert_eq!(coordinator.get().await.screen, Screen::Landing);
    }

    #[tokio::test]
    async fn test_empty_url_substituted() {
        let coordinator = CoordinatorHandle::default();
        let url = coordinator.begin("   ", true).await.unwrap();
        assert_eq!(url, URL_PLACEHOLDER);
        assert_eq!(
            coordinator.get().await.meeting_url.as_deref(),
            Some(URL_PLACEHOLDER)
        );
    }

    #[tokio::test]
    async fn test_out_of_order_transitions_rejected() {
        let coordinator = CoordinatorHandle::default();
        assert!(coordinator.complete(summary()).await.is_err());

        coordinator.begin("url", true).await.unwrap();
        assert!(coordinator.begin("url", true).await.is_err());

        coordinator.complete(summary()).await.unwrap();
        assert!(coordinator.complete(summary()).await.is_err());
    }
}
