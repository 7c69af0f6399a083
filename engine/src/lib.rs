//! Analysis engine for realscore - orchestration and collaborators.
//!
//! This crate owns the decision of *when* to score a document: it debounces
//! change events, gates on minimum content, runs the analyzers from
//! `realscore-analysis`, and applies results under an explicit sequence
//! -number comparison so a stale pass can never overwrite a fresh one. The
//! document store and the embedding provider are narrow trait seams with
//! local implementations.

mod config;
mod error;
mod orchestrator;
mod provider;
mod store;

pub use config::{
    AnalysisConfig, ConfigError, EngineSettings, RealscoreConfig, StorageConfig, config_path,
    default_data_dir,
};
pub use error::EngineError;
pub use orchestrator::{
    ANALYSIS_CONFIDENCE, AnalysisOrchestrator, AnalysisRequest, PassOutcome, ScoreUpdate,
    Submission,
};
pub use provider::{
    EmbeddingProvider, ENCODER_DIMENSIONS, LocalEncoder, ProviderError, ProviderStatus,
};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};

// Re-export the domain types and scoring building blocks for callers that
// only want to depend on the engine crate.
pub use realscore_analysis::{
    Analyzer, AnalyzerSuite, DEFAULT_WEIGHTS, NoiseSource, ScoreError, Segments, Silent,
    Simulated, overall_score, segment,
};
pub use realscore_types::{ChangeEvent, Document, DocumentId, Scores};
