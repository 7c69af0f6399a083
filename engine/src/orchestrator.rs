//! Analysis orchestration: debounce, gate, score, apply-if-fresh.
//!
//! Per document the flow is `Idle -> Debouncing -> Gating -> Analyzing ->
//! (Applying | Discarding) -> Idle`. A change event arms (or re-arms) a
//! cancellable quiet-period timer; when the timer fires, a pass runs against
//! a snapshot of the content taken at the event. In-flight passes are never
//! cancelled - a result is discarded at apply time by an explicit sequence
//! -number comparison whenever a later-submitted pass has already applied,
//! regardless of wall-clock completion order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use realscore_analysis::{AnalyzerSuite, NoiseSource, Silent, Simulated, overall_score, segment};
use realscore_types::{ChangeEvent, DocumentId, Scores};

use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::provider::EmbeddingProvider;
use crate::store::{DocumentStore, StoreError};

/// Confidence reported on every successful heuristic pass.
pub const ANALYSIS_CONFIDENCE: f64 = 0.85;

/// Ephemeral ticket for one analysis pass; exists only for ordering
/// decisions and is never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    document_id: DocumentId,
    snapshot: String,
    sequence: u64,
}

impl AnalysisRequest {
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// The raw markup content captured when the request was admitted.
    #[must_use]
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Whether a change was admitted for analysis.
#[derive(Debug)]
pub enum Submission {
    Accepted(AnalysisRequest),
    /// Below the minimum word count; nothing was touched.
    TooShort { words: usize },
}

/// Terminal outcome of a pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// Fresh result: scores attached to the document and persisted.
    Applied(Scores),
    /// A later-submitted pass already applied; this result was discarded.
    Superseded { applied: u64 },
    /// Below the minimum word count; prior scores left untouched.
    TooShort { words: usize },
}

/// An applied score set, published for display collaborators.
#[derive(Debug, Clone)]
pub struct ScoreUpdate {
    pub document_id: DocumentId,
    pub sequence: u64,
    pub scores: Scores,
}

#[derive(Debug, Default)]
struct DocState {
    /// Armed quiet-period timer, if any. Re-arming aborts the old one.
    debounce: Option<AbortHandle>,
    /// Monotonically increasing per-document request counter.
    next_sequence: u64,
    /// Highest sequence whose result has been applied.
    last_applied: Option<u64>,
}

struct Inner {
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn EmbeddingProvider>,
    analyzers: AnalyzerSuite,
    settings: EngineSettings,
    documents: Mutex<HashMap<DocumentId, Arc<Mutex<DocState>>>>,
    updates: mpsc::UnboundedSender<ScoreUpdate>,
}

/// Coordinates analysis passes across documents.
///
/// Passes for different documents are fully independent; the only shared
/// state is the per-document sequence bookkeeping.
pub struct AnalysisOrchestrator {
    inner: Arc<Inner>,
}

impl AnalysisOrchestrator {
    /// Build an orchestrator with the standard analyzer suite. Returns the
    /// receiver on which applied score updates are published.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn EmbeddingProvider>,
        settings: EngineSettings,
    ) -> (Self, mpsc::UnboundedReceiver<ScoreUpdate>) {
        let noise: Arc<dyn NoiseSource> = if settings.jitter {
            Arc::new(Simulated)
        } else {
            Arc::new(Silent)
        };
        let analyzers = AnalyzerSuite::standard(noise);
        Self::with_analyzers(store, provider, settings, analyzers)
    }

    /// Build an orchestrator with a custom analyzer suite, e.g. a swapped
    /// relevance strategy.
    #[must_use]
    pub fn with_analyzers(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn EmbeddingProvider>,
        settings: EngineSettings,
        analyzers: AnalyzerSuite,
    ) -> (Self, mpsc::UnboundedReceiver<ScoreUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let inner = Arc::new(Inner {
            store,
            provider,
            analyzers,
            settings,
            documents: Mutex::new(HashMap::new()),
            updates,
        });
        (Self { inner }, receiver)
    }

    /// Handle a change event from the editing surface: re-arm the document's
    /// quiet-period timer. The superseded timer is cancelled, not ignored;
    /// only the last event inside a quiet window starts a pass.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_change(&self, event: ChangeEvent) {
        let state = self.inner.doc_state(event.document_id);
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut state = state.lock().expect("document state lock poisoned");
            if let Some(previous) = state.debounce.take() {
                previous.abort();
            }
            state.debounce = Some(handle);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let quiet = Abortable::new(tokio::time::sleep(inner.settings.debounce), registration);
            if quiet.await.is_err() {
                // A newer change event re-armed the timer.
                return;
            }

            match inner.run_pass(event.document_id, &event.content) {
                Ok(outcome) => {
                    tracing::debug!(
                        document = %event.document_id,
                        ?outcome,
                        "analysis pass finished"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        document = %event.document_id,
                        retryable = err.is_retryable(),
                        "analysis pass failed: {err}"
                    );
                }
            }
        });
    }

    /// Run a full gate-analyze-apply pass immediately, bypassing debounce.
    pub fn analyze_now(
        &self,
        document_id: DocumentId,
        content: &str,
    ) -> Result<PassOutcome, EngineError> {
        self.inner.run_pass(document_id, content)
    }

    /// Gate a change on minimum content and allocate its sequence number.
    pub fn submit(&self, document_id: DocumentId, content: &str) -> Submission {
        self.inner.submit(document_id, content)
    }

    /// Score an admitted request. Mutates nothing.
    pub fn execute(&self, request: &AnalysisRequest) -> Result<Scores, EngineError> {
        self.inner.execute(request)
    }

    /// Apply a completed result unless a later-submitted pass has already
    /// applied. The decision is an explicit sequence comparison; completion
    /// order never matters.
    pub fn apply(
        &self,
        request: &AnalysisRequest,
        scores: Scores,
    ) -> Result<PassOutcome, EngineError> {
        self.inner.apply(request, scores)
    }
}

impl Inner {
    fn doc_state(&self, id: DocumentId) -> Arc<Mutex<DocState>> {
        let mut documents = self.documents.lock().expect("document map lock poisoned");
        Arc::clone(documents.entry(id).or_default())
    }

    fn run_pass(&self, document_id: DocumentId, content: &str) -> Result<PassOutcome, EngineError> {
        let request = match self.submit(document_id, content) {
            Submission::Accepted(request) => request,
            Submission::TooShort { words } => {
                tracing::debug!(
                    document = %document_id,
                    words,
                    "content below minimum, skipping analysis"
                );
                return Ok(PassOutcome::TooShort { words });
            }
        };

        let scores = self.execute(&request)?;
        self.apply(&request, scores)
    }

    fn submit(&self, document_id: DocumentId, content: &str) -> Submission {
        let words = segment(content).word_count();
        if words < self.settings.min_words {
            return Submission::TooShort { words };
        }

        let state = self.doc_state(document_id);
        let mut state = state.lock().expect("document state lock poisoned");
        state.next_sequence += 1;

        Submission::Accepted(AnalysisRequest {
            document_id,
            snapshot: content.to_string(),
            sequence: state.next_sequence,
        })
    }

    fn execute(&self, request: &AnalysisRequest) -> Result<Scores, EngineError> {
        if !self.provider.is_ready() {
            return Err(EngineError::ProviderNotReady);
        }

        let segments = segment(request.snapshot());

        // Callability probe; the vector itself carries no contract here.
        self.provider.embed(segments.plain())?;

        let [grammar, coherence, vocabulary, relevance] = self.analyzers.score_all(&segments)?;
        let overall = overall_score(
            &[grammar, coherence, vocabulary, relevance],
            &self.settings.weights,
        );

        Ok(Scores {
            grammar,
            coherence,
            vocabulary,
            relevance,
            overall,
            confidence: ANALYSIS_CONFIDENCE,
        })
    }

    fn apply(&self, request: &AnalysisRequest, scores: Scores) -> Result<PassOutcome, EngineError> {
        let state = self.doc_state(request.document_id);
        let mut state = state.lock().expect("document state lock poisoned");

        if let Some(applied) = state.last_applied
            && applied > request.sequence
        {
            return Ok(PassOutcome::Superseded { applied });
        }
        state.last_applied = Some(request.sequence);

        // The per-document lock is held through persistence so an older
        // pass can never interleave its write with a fresher one.
        match self.persist(request.document_id, scores) {
            Ok(()) => {
                drop(state);
                let _ = self.updates.send(ScoreUpdate {
                    document_id: request.document_id,
                    sequence: request.sequence,
                    scores,
                });
                Ok(PassOutcome::Applied(scores))
            }
            Err(source) => Err(EngineError::Persistence {
                document_id: request.document_id,
                scores,
                source,
            }),
        }
    }

    fn persist(&self, document_id: DocumentId, scores: Scores) -> Result<(), StoreError> {
        let Some(mut document) = self.store.get(document_id)? else {
            return Err(StoreError::Missing(document_id));
        };
        document.scores = Some(scores);
        self.store.put(&document)
    }
}
