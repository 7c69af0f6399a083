//! Vocabulary richness scoring.

use std::collections::HashSet;
use std::sync::Arc;

use crate::noise::NoiseSource;
use crate::segment::Segments;
use crate::{Analyzer, ScoreError, clamp_score};

/// Returned when there are too few words to measure diversity.
const NEUTRAL: f64 = 5.0;
const MIN_WORDS: usize = 10;
const JITTER: f64 = 0.5;

/// Scores lexical diversity (type-token ratio) and word-length complexity.
pub struct VocabularyAnalyzer {
    noise: Arc<dyn NoiseSource>,
}

impl VocabularyAnalyzer {
    #[must_use]
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }
}

impl Analyzer for VocabularyAnalyzer {
    fn name(&self) -> &'static str {
        "vocabulary"
    }

    fn score(&self, segments: &Segments) -> Result<f64, ScoreError> {
        let words = segments.words();
        if words.len() < MIN_WORDS {
            return Ok(NEUTRAL);
        }

        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let unique: HashSet<&str> = lowered.iter().map(String::as_str).collect();

        // Type-Token Ratio, typically 0.3-0.7 for running prose.
        let ttr = unique.len() as f64 / lowered.len() as f64;
        let diversity = ttr * 20.0;

        // Word length as a proxy for lexical complexity.
        let total_len: usize = lowered.iter().map(|w| w.chars().count()).sum();
        let average_len = total_len as f64 / lowered.len() as f64;
        let complexity = (average_len * 2.0).min(10.0);

        let base = 0.7 * diversity + 0.3 * complexity;
        Ok(clamp_score(base + self.noise.jitter(JITTER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Silent;
    use crate::segment::segment;

    fn score(text: &str) -> f64 {
        VocabularyAnalyzer::new(Arc::new(Silent))
            .score(&segment(text))
            .unwrap()
    }

    #[test]
    fn fewer_than_ten_words_is_neutral() {
        assert_eq!(score("one two three four five six seven eight nine"), 5.0);
        assert_eq!(score(""), 5.0);
    }

    #[test]
    fn ten_words_pass_the_gate() {
        assert_ne!(score("one two three four five six seven eight nine ten"), 5.0);
    }

    #[test]
    fn repetitive_text_scores_low() {
        // Ten copies of "the": TTR 0.1 so diversity 2; average length 3 so
        // complexity 6; 0.7 * 2 + 0.3 * 6 = 3.2.
        let value = score("the the the the the the the the the the");
        assert!((value - 3.2).abs() < 1e-9);
    }

    #[test]
    fn word_comparison_is_case_insensitive() {
        let value = score("The the THE tHe the the the the the the");
        assert!((value - 3.2).abs() < 1e-9);
    }

    #[test]
    fn rich_vocabulary_clamps_at_ten() {
        // All-unique words: diversity 20 alone exceeds the ceiling.
        let value = score("manifold orchard kindle brevity solace quartz nimbus verdant copse zephyr");
        assert_eq!(value, 10.0);
    }
}
