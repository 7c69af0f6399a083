//! Model/embedding provider collaborator.
//!
//! The engine consumes the provider only to confirm readiness and
//! callability; the embedding vector carries no numeric contract here. A
//! real sentence-encoder backend can replace [`LocalEncoder`] without
//! touching the orchestrator.

use std::sync::RwLock;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider has not finished bootstrapping")]
    NotReady,
    #[error("embedding failed: {0}")]
    Embed(String),
}

/// Coarse bootstrap status, for display collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Shared external model resource, bootstrapped once per process.
pub trait EmbeddingProvider: Send + Sync {
    /// Non-blocking readiness check. Must never wait for the bootstrap.
    fn is_ready(&self) -> bool;

    /// Embed text into an opaque vector. Fails fast when not ready.
    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Number of dimensions produced by [`LocalEncoder`].
pub const ENCODER_DIMENSIONS: usize = 64;

/// A small in-process encoder standing in for a real sentence-embedding
/// model.
///
/// Construct it, then call [`LocalEncoder::bootstrap`], which runs a warm-up
/// inference and flips the encoder ready. Until then every embed call fails
/// fast with [`ProviderError::NotReady`].
pub struct LocalEncoder {
    status: RwLock<ProviderStatus>,
}

impl LocalEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: RwLock::new(ProviderStatus::Idle),
        }
    }

    /// Load and warm up the encoder.
    pub fn bootstrap(&self) {
        self.set_status(ProviderStatus::Loading);
        // Warm-up inference: the first call pays any one-time setup cost,
        // the way real model providers are primed after loading.
        let _ = encode("warming up the encoder");
        self.set_status(ProviderStatus::Ready);
    }

    #[must_use]
    pub fn status(&self) -> ProviderStatus {
        *self.status.read().expect("provider status lock poisoned")
    }

    fn set_status(&self, status: ProviderStatus) {
        *self.status.write().expect("provider status lock poisoned") = status;
    }
}

impl Default for LocalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingProvider for LocalEncoder {
    fn is_ready(&self) -> bool {
        self.status() == ProviderStatus::Ready
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if !self.is_ready() {
            return Err(ProviderError::NotReady);
        }
        Ok(encode(text))
    }
}

/// Hashed bag-of-words embedding, L2-normalized.
fn encode(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0_f32; ENCODER_DIMENSIONS];
    for word in text.split_whitespace() {
        vector[bucket(word)] += 1.0;
    }

    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}

/// FNV-1a over the word's bytes, folded into the vector width.
fn bucket(word: &str) -> usize {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for byte in word.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash % ENCODER_DIMENSIONS as u64) as usize
}
