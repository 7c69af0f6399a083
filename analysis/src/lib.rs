//! Heuristic text-quality scoring.
//!
//! Four independent analyzers consume a shared [`Segments`] view of a
//! document and each produce a bounded score; [`overall_score`] combines
//! them. Nothing here performs genuine linguistic analysis - the scores are
//! numeric proxies computed from surface statistics, with optional bounded
//! jitter behind the [`NoiseSource`] seam.

mod aggregate;
mod coherence;
mod noise;
mod relevance;
mod segment;
mod syntax;
mod vocabulary;

pub use aggregate::{DEFAULT_WEIGHTS, overall_score};
pub use coherence::CoherenceAnalyzer;
pub use noise::{NoiseSource, Silent, Simulated};
pub use relevance::RelevanceAnalyzer;
pub use segment::{Segments, segment};
pub use syntax::SyntaxAnalyzer;
pub use vocabulary::VocabularyAnalyzer;

use std::sync::Arc;

use thiserror::Error;

/// An analyzer step failed; the surrounding pass must be aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{analyzer} analyzer failed: {message}")]
pub struct ScoreError {
    pub analyzer: &'static str,
    pub message: String,
}

/// The shared scoring capability: segmented text in, bounded score out.
pub trait Analyzer: Send + Sync {
    /// Stable short name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Score the segmented text on a 0-10 scale.
    ///
    /// Analyzers with a minimum-content gate return their fixed neutral
    /// score below the gate and floor at 1 above it.
    fn score(&self, segments: &Segments) -> Result<f64, ScoreError>;
}

/// Final clamp applied by every analyzer past its content gate.
pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(1.0, 10.0)
}

/// The four standard analyzers, in aggregation order: grammar, coherence,
/// vocabulary, relevance.
pub struct AnalyzerSuite {
    grammar: Box<dyn Analyzer>,
    coherence: Box<dyn Analyzer>,
    vocabulary: Box<dyn Analyzer>,
    relevance: Box<dyn Analyzer>,
}

impl AnalyzerSuite {
    /// The standard suite, sharing one noise source.
    #[must_use]
    pub fn standard(noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            grammar: Box::new(SyntaxAnalyzer::new(Arc::clone(&noise))),
            coherence: Box::new(CoherenceAnalyzer::new(Arc::clone(&noise))),
            vocabulary: Box::new(VocabularyAnalyzer::new(Arc::clone(&noise))),
            relevance: Box::new(RelevanceAnalyzer::new(noise)),
        }
    }

    /// Swap the relevance strategy, e.g. for a future embedding-similarity
    /// implementation. The other analyzers and the aggregation contract are
    /// unaffected.
    #[must_use]
    pub fn with_relevance(mut self, relevance: Box<dyn Analyzer>) -> Self {
        self.relevance = relevance;
        self
    }

    /// Run all four analyzers over the same segmented text.
    ///
    /// The analyzers are independent and order-irrelevant; any failure
    /// aborts the whole pass.
    pub fn score_all(&self, segments: &Segments) -> Result<[f64; 4], ScoreError> {
        Ok([
            self.grammar.score(segments)?,
            self.coherence.score(segments)?,
            self.vocabulary.score(segments)?,
            self.relevance.score(segments)?,
        ])
    }
}
