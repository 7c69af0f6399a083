//! Grammar and syntax scoring.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::noise::NoiseSource;
use crate::segment::Segments;
use crate::{Analyzer, ScoreError, clamp_score};

/// Whitespace immediately followed by punctuation, e.g. "word , word".
static MISPLACED_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s[,.!?;:]").expect("valid misplaced punctuation regex"));

const JITTER: f64 = 0.5;
/// Capitalization sub-score when there are no sentences to inspect.
const NO_SENTENCE_DEFAULT: f64 = 5.0;
/// Sentences longer than this many whitespace-separated tokens count as run-ons.
const RUN_ON_TOKENS: usize = 30;

/// Scores capitalization, punctuation placement, and run-on sentences.
///
/// The final score is the mean of the three sub-scores, each floored at 0,
/// clamped to `[1, 10]` after jitter.
pub struct SyntaxAnalyzer {
    noise: Arc<dyn NoiseSource>,
}

impl SyntaxAnalyzer {
    #[must_use]
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }
}

impl Analyzer for SyntaxAnalyzer {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn score(&self, segments: &Segments) -> Result<f64, ScoreError> {
        let sentences = segments.sentences();

        let capitalization = if sentences.is_empty() {
            NO_SENTENCE_DEFAULT
        } else {
            let capitalized = sentences.iter().filter(|s| starts_uppercase(s)).count();
            capitalized as f64 / sentences.len() as f64 * 10.0
        };

        let mistakes = MISPLACED_PUNCTUATION.find_iter(segments.plain()).count();
        let punctuation = (10.0 - mistakes as f64).max(0.0);

        let run_ons = sentences
            .iter()
            .filter(|s| s.split_whitespace().count() > RUN_ON_TOKENS)
            .count();
        let sentence_length = (10.0 - 2.0 * run_ons as f64).max(0.0);

        let base = (capitalization + punctuation + sentence_length) / 3.0;
        Ok(clamp_score(base + self.noise.jitter(JITTER)))
    }
}

/// Whether the first alphabetic character is uppercase.
fn starts_uppercase(sentence: &str) -> bool {
    sentence
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_uppercase)
}
