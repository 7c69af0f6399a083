//! Coherence and organization scoring.

use std::sync::Arc;

use crate::noise::NoiseSource;
use crate::segment::{Segments, first_sentence};
use crate::{Analyzer, ScoreError, clamp_score};

/// Returned when there are not enough paragraphs to evaluate structure.
const NEUTRAL: f64 = 5.5;
const JITTER: f64 = 0.8;

/// Phrases whose presence in a paragraph's first sentence signal a
/// deliberate transition from the previous paragraph.
const TRANSITION_PHRASES: [&str; 8] = [
    "however",
    "therefore",
    "consequently",
    "furthermore",
    "additionally",
    "moreover",
    "in addition",
    "on the other hand",
];

/// Scores paragraph-length consistency and transition usage.
pub struct CoherenceAnalyzer {
    noise: Arc<dyn NoiseSource>,
}

impl CoherenceAnalyzer {
    #[must_use]
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }
}

impl Analyzer for CoherenceAnalyzer {
    fn name(&self) -> &'static str {
        "coherence"
    }

    fn score(&self, segments: &Segments) -> Result<f64, ScoreError> {
        let paragraphs = segments.paragraphs();
        if paragraphs.len() < 2 {
            // Not enough structure to evaluate; fixed score, no jitter.
            return Ok(NEUTRAL);
        }

        // Consistent paragraph lengths read as deliberate structure.
        let lengths: Vec<f64> = paragraphs
            .iter()
            .map(|p| p.chars().count() as f64)
            .collect();
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        let variance =
            lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
        let structure = (10.0 - 5.0 * (variance.sqrt() / mean)).max(0.0);

        let transitions = paragraphs[1..]
            .iter()
            .filter(|p| opens_with_transition(p))
            .count();
        let transition = transitions as f64 / (paragraphs.len() - 1) as f64 * 10.0;

        let base = 0.6 * structure + 0.4 * transition;
        Ok(clamp_score(base + self.noise.jitter(JITTER)))
    }
}

fn opens_with_transition(paragraph: &str) -> bool {
    let Some(sentence) = first_sentence(paragraph) else {
        return false;
    };
    let sentence = sentence.to_lowercase();
    TRANSITION_PHRASES
        .iter()
        .any(|phrase| sentence.contains(phrase))
}
