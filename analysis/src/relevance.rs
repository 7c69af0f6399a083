//! Topic relevance scoring.
//!
//! There is no real similarity computation yet: this strategy returns a
//! favorable baseline with bounded variability. It implements the same
//! scoring capability as the other analyzers so a genuine embedding-based
//! comparison can replace it without touching aggregation or orchestration.

use std::sync::Arc;

use crate::noise::NoiseSource;
use crate::segment::Segments;
use crate::{Analyzer, ScoreError, clamp_score};

const BASELINE: f64 = 7.5;
const JITTER: f64 = 1.5;

/// Placeholder relevance strategy.
pub struct RelevanceAnalyzer {
    noise: Arc<dyn NoiseSource>,
    /// Reserved for a future similarity implementation; unused today.
    reference_topic: Option<String>,
}

impl RelevanceAnalyzer {
    #[must_use]
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            noise,
            reference_topic: None,
        }
    }

    /// Attach the topic the text will eventually be compared against.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.reference_topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn reference_topic(&self) -> Option<&str> {
        self.reference_topic.as_deref()
    }
}

impl Analyzer for RelevanceAnalyzer {
    fn name(&self) -> &'static str {
        "relevance"
    }

    fn score(&self, _segments: &Segments) -> Result<f64, ScoreError> {
        Ok(clamp_score(BASELINE + self.noise.jitter(JITTER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;
    use crate::{Silent, Simulated};

    #[test]
    fn baseline_without_noise() {
        let analyzer = RelevanceAnalyzer::new(Arc::new(Silent));
        assert_eq!(analyzer.score(&segment("anything at all")).unwrap(), 7.5);
    }

    #[test]
    fn noisy_scores_stay_within_bounds() {
        let analyzer = RelevanceAnalyzer::new(Arc::new(Simulated));
        let segments = segment("anything at all");
        for _ in 0..200 {
            let value = analyzer.score(&segments).unwrap();
            assert!((6.0..=9.0).contains(&value), "score {value} out of bounds");
        }
    }

    #[test]
    fn reference_topic_is_recorded_but_unused() {
        let analyzer = RelevanceAnalyzer::new(Arc::new(Silent)).with_topic("climate policy");
        assert_eq!(analyzer.reference_topic(), Some("climate policy"));
        assert_eq!(analyzer.score(&segment("unrelated text")).unwrap(), 7.5);
    }
}
