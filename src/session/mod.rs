//! Interview session core.
//!
//! This module owns the lifecycle logic of a simulated interview:
//! - Capture stream acquisition and teardown
//! - The repeating synthetic metric generator
//! - Question cursor and per-question records
//! - Report aggregation and the final summary

pub mod generator;
pub mod log;
pub mod machine;
pub mod metrics;
pub mod questions;
pub mod report;
pub mod status;

pub use log::ActivityLog;
pub use machine::InterviewMachine;
pub use metrics::{BehavioralMetric, InterviewSummary, QuestionSession};
pub use status::{SessionPhase, SessionState, SessionStatusHandle};
