//! Capture source abstraction for acquiring a screen-share feed from the
//! host environment.
//!
//! The service never inspects the feed's content; it only needs the grant /
//! deny outcome and the ended notification. Real acquisition lives behind
//! the trait so the shipped simulated source can stand in for the host.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Trait for screen-share capture providers.
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Request a capture stream from the host environment.
    ///
    /// Suspends until the request is granted or denied; no timeout is
    /// applied. A denial or acquisition failure is returned as an error.
    async fn request_capture(&self) -> Result<CaptureStream>;
}

/// Handle to a live capture feed.
///
/// Dropping the handle releases the feed. The ended notification fires when
/// the host environment revokes the capture out from under the service.
pub struct CaptureStream {
    ended_rx: watch::Receiver<bool>,
}

impl CaptureStream {
    pub fn new(ended_rx: watch::Receiver<bool>) -> Self {
        Self { ended_rx }
    }

    /// Subscribe to the ended notification.
    pub fn ended(&self) -> watch::Receiver<bool> {
        self.ended_rx.clone()
    }

    pub fn has_ended(&self) -> bool {
        *self.ended_rx.borrow()
    }
}

/// Stand-in capture provider.
///
/// Grants every request (or denies every request, when built with
/// [`SimulatedCaptureSource::denying`]) and lets callers revoke the active
/// stream to exercise the external-end path.
pub struct SimulatedCaptureSource {
    grant: bool,
    active: Arc<Mutex<Option<watch::Sender<bool>>>>,
}

impl SimulatedCaptureSource {
    pub fn granting() -> Self {
        Self {
            grant: true,
            active: Arc::new(Mutex::new(None)),
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Revoke the currently granted stream, as the host environment does
    /// when the user stops sharing.
    pub fn end_stream(&self) {
        if let Some(tx) = self.active.lock().expect("capture lock poisoned").take() {
            let _ = tx.send(true);
        }
    }
}

#[async_trait]
impl CaptureSource for SimulatedCaptureSource {
    async fn request_capture(&self) -> Result<CaptureStream> {
        if !self.grant {
            bail!("Capture request denied by host environment");
        }

        let (tx, rx) = watch::channel(false);
        *self.active.lock().expect("capture lock poisoned") = Some(tx);
        Ok(CaptureStream::new(rx))
    }
}
