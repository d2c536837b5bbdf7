//! Behavioral data records produced during an interview session.

use serde::{Deserialize, Serialize};

/// Risk flag attached to a question when the truth snapshot crosses the threshold.
pub const RISK_FLAG_INCONSISTENCY: &str = "Statement Inconsistency";

/// Truth probability below this value flags the question record.
pub const RISK_TRUTH_THRESHOLD: f64 = 0.7;

/// Placeholder used when a question is advanced with an empty response.
pub const DEFAULT_RESPONSE: &str = "Behavioral data packet synchronized.";

/// One synthetic behavioral sample. Immutable once created; all probability
/// and level fields are clamped to [0, 1] at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralMetric {
    pub timestamp_ms: i64,
    pub emotion: String,
    pub confidence_score: f64,
    pub stress_level: f64,
    pub truth_probability: f64,
    pub micro_expressions: Vec<String>,
    pub voice_jitter: f64,
    pub blink_rate: f64,
}

impl BehavioralMetric {
    /// Neutral fallback used when a question is advanced before any sample
    /// has arrived.
    pub fn neutral(timestamp_ms: i64) -> Self {
        Self {
            timestamp_ms,
            emotion: "Neutral".to_string(),
            confidence_score: 0.8,
            stress_level: 0.2,
            truth_probability: 0.9,
            micro_expressions: Vec::new(),
            voice_jitter: 0.0,
            blink_rate: 12.0,
        }
    }
}

/// Record of one answered question together with its behavioral snapshot.
/// Created when the operator advances past a question; never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSession {
    pub id: uuid::Uuid,
    pub question: String,
    pub response: String,
    pub analysis: BehavioralMetric,
    pub risk_flags: Vec<String>,
}

impl QuestionSession {
    pub fn new(question: String, response: &str, analysis: BehavioralMetric) -> Self {
        let response = if response.trim().is_empty() {
            DEFAULT_RESPONSE.to_string()
        } else {
            response.to_string()
        };

        let risk_flags = if analysis.truth_probability < RISK_TRUTH_THRESHOLD {
            vec![RISK_FLAG_INCONSISTENCY.to_string()]
        } else {
            Vec::new()
        };

        Self {
            id: uuid::Uuid::new_v4(),
            question,
            response,
            analysis,
            risk_flags,
        }
    }
}

/// Final interview report. Assembled once at the end of a session and handed
/// to the report screen; immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub candidate_name: String,
    pub meeting_url: String,
    pub overall_truth_likelihood: f64,
    pub average_stress: f64,
    pub key_strengths: Vec<String>,
    pub areas_of_concern: Vec<String>,
    pub sessions: Vec<QuestionSession>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_defaults() {
        let metric = BehavioralMetric::neutral(0);
        assert_eq!(metric.emotion, "Neutral");
        assert_eq!(metric.confidence_score, 0.8);
        assert_eq!(metric.stress_level, 0.2);
        assert_eq!(metric.truth_probability, 0.9);
        assert!(metric.micro_expressions.is_empty());
        assert_eq!(metric.voice_jitter, 0.0);
        assert_eq!(metric.blink_rate, 12.0);
    }

    #[test]
    fn test_risk_flag_below_threshold() {
        let mut metric = BehavioralMetric::neutral(0);
        metric.truth_probability = 0.69;
        let session = QuestionSession::new("Q?".to_string(), "answer", metric);
        assert_eq!(session.risk_flags, vec![RISK_FLAG_INCONSISTENCY]);
    }

    #[test]
    fn test_no_risk_flag_at_threshold() {
        let mut metric = BehavioralMetric::neutral(0);
        metric.truth_probability = 0.7;
        let session = QuestionSession::new("Q?".to_string(), "answer", metric);
        assert!(session.risk_flags.is_empty());
    }

    #[test]
    fn test_empty_response_substituted() {
        let session =
            QuestionSession::new("Q?".to_string(), "   ", BehavioralMetric::neutral(0));
        assert_eq!(session.response, DEFAULT_RESPONSE);

        let session =
            QuestionSession::new("Q?".to_string(), "real answer", BehavioralMetric::neutral(0));
        assert_eq!(session.response, "real answer");
    }
}
