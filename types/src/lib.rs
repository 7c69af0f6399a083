//! Core domain types for realscore.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Document Identity
// ============================================================================

/// Opaque unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Scores
// ============================================================================

/// The five bounded quality numbers plus a confidence value.
///
/// Sub-scores and `overall` live in `[0, 10]`; an analyzer that has passed
/// its minimum-content gate floors its result at 1. `overall` is always the
/// aggregator's weighted combination of the other four from the *same*
/// analysis pass - it is never set independently, and a `Scores` value is
/// replaced wholesale on each successful pass, never merged field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Grammar and syntax.
    pub grammar: f64,
    /// Coherence and organization.
    pub coherence: f64,
    /// Vocabulary richness.
    pub vocabulary: f64,
    /// Topic relevance.
    pub relevance: f64,
    /// Overall quality.
    pub overall: f64,
    /// Confidence in the scores, in `[0, 1]`.
    pub confidence: f64,
}

// ============================================================================
// Document
// ============================================================================

/// A document owned by the caller.
///
/// The scoring engine never creates or deletes documents; it only reads
/// `content` and writes `scores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    /// Markup string; the source of truth for the document text.
    pub content: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,
}

impl Document {
    /// Create a document with the given title and content, stamped now.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            title: title.into(),
            content: content.into(),
            created: now,
            last_modified: now,
            scores: None,
        }
    }

    /// A fresh empty document, the way the editing surface creates one.
    #[must_use]
    pub fn untitled() -> Self {
        Self::new("Untitled Document", "")
    }

    /// Bump `last_modified` to now. Called by owners on content edits;
    /// the scoring engine itself never touches timestamps.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

// ============================================================================
// Change Events
// ============================================================================

/// A content change pushed into the orchestrator by the editing surface.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub document_id: DocumentId,
    /// Raw markup content at the time of the change.
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    #[must_use]
    pub fn new(document_id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            document_id,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
