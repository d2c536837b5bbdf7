//! Synthetic behavioral metric sampling.
//!
//! Samples are a pure function of a random source and the tick time. They
//! carry no information from the captured stream; truth probability is a
//! deterministic function of the sampled stress level.

use rand::Rng;

use super::metrics::BehavioralMetric;

/// Stress above this level is reported as a surge and shifts the
/// micro-expression set.
pub const STRESS_SURGE_THRESHOLD: f64 = 0.4;

const EMOTIONS: [&str; 6] = [
    "Neutral",
    "Engaged",
    "Thinking",
    "Confident",
    "Hesitant",
    "Surprised",
];

/// Draw one synthetic sample.
pub fn sample<R: Rng>(rng: &mut R, timestamp_ms: i64) -> BehavioralMetric {
    let stress: f64 = rng.gen_range(0.05..0.50);
    let confidence: f64 = rng.gen_range(0.70..1.00);
    let truth = (1.10 - 0.5 * stress).min(1.0);

    let emotion = EMOTIONS[rng.gen_range(0..EMOTIONS.len())].to_string();

    let micro_expressions = if stress > STRESS_SURGE_THRESHOLD {
        vec!["Eye Flutter".to_string(), "Lower Lip Tension".to_string()]
    } else {
        vec!["Stable Gaze".to_string()]
    };

    BehavioralMetric {
        timestamp_ms,
        emotion,
        confidence_score: confidence.clamp(0.0, 1.0),
        stress_level: stress.clamp(0.0, 1.0),
        truth_probability: truth.clamp(0.0, 1.0),
        micro_expressions,
        voice_jitter: rng.gen_range(0.0..0.05),
        blink_rate: rng.gen_range(8.0..20.0),
    }
}
