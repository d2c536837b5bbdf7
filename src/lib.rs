pub mod api;
pub mod app;
pub mod capture;
pub mod cli;
pub mod config;
pub mod global;
pub mod session;

pub use app::coordinator::{CoordinatorHandle, Screen};
pub use capture::{CaptureSource, CaptureStream, SimulatedCaptureSource};
pub use config::Config;
pub use session::{
    BehavioralMetric, InterviewMachine, InterviewSummary, QuestionSession, SessionPhase,
    SessionStatusHandle,
};
