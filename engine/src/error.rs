//! Error taxonomy for analysis passes.

use realscore_analysis::ScoreError;
use realscore_types::{DocumentId, Scores};
use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

/// Why an analysis pass aborted.
///
/// A gated pass (too little content) is an outcome, not an error - see
/// [`crate::PassOutcome`]. Nothing here is fatal to the process; the system
/// degrades to "no (or stale) scores" rather than terminating.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The embedding provider has not finished bootstrapping. The pass made
    /// no mutation and may simply be retried on a later change.
    #[error("embedding provider is not ready")]
    ProviderNotReady,

    /// The embedding warm-up probe failed.
    #[error("embedding provider failed")]
    Provider(#[source] ProviderError),

    /// An analyzer step failed; the pass aborted with no partial scores.
    #[error(transparent)]
    Analysis(#[from] ScoreError),

    /// Scores were computed but could not be durably saved. The computed
    /// value rides along so the caller still holds it in memory; the next
    /// qualifying change retries persistence implicitly.
    #[error("failed to persist scores for document {document_id}")]
    Persistence {
        document_id: DocumentId,
        scores: Scores,
        #[source]
        source: StoreError,
    },
}

impl From<ProviderError> for EngineError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotReady => Self::ProviderNotReady,
            other => Self::Provider(other),
        }
    }
}

impl EngineError {
    /// Whether a later change event can be expected to succeed without
    /// intervention.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderNotReady | Self::Persistence { .. })
    }
}
