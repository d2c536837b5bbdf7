//! Final report assembly.

use super::metrics::{BehavioralMetric, InterviewSummary, QuestionSession};

pub const CANDIDATE_NAME: &str = "Remote Subject";

/// Overall truth likelihood below this value populates the concern list.
pub const CONCERN_TRUTH_THRESHOLD: f64 = 0.75;

const KEY_STRENGTHS: [&str; 2] = ["Fast Neural Recovery", "Stable Eye Tracking"];
const CONCERN_AUTONOMIC_VARIANCE: &str = "Autonomic Variance Detected";

/// Assemble the interview summary from the full metric history and the
/// answered question records. Pure; the averages cover every generated
/// sample, not just the per-question snapshots.
pub fn aggregate(
    meeting_url: &str,
    metric_history: &[BehavioralMetric],
    sessions: Vec<QuestionSession>,
) -> InterviewSummary {
    let denominator = metric_history.len().max(1) as f64;
    let average_stress =
        metric_history.iter().map(|m| m.stress_level).sum::<f64>() / denominator;
    let overall_truth_likelihood =
        metric_history.iter().map(|m| m.truth_probability).sum::<f64>() / denominator;

    let areas_of_concern = if overall_truth_likelihood < CONCERN_TRUTH_THRESHOLD {
        vec![CONCERN_AUTONOMIC_VARIANCE.to_string()]
    } else {
        Vec::new()
    };

    InterviewSummary {
        candidate_name: CANDIDATE_NAME.to_string(),
        meeting_url: meeting_url.to_string(),
        overall_truth_likelihood,
        average_stress,
        key_strengths: KEY_STRENGTHS.iter().map(|s| s.to_string()).collect(),
        areas_of_concern,
        sessions,
    }
}
