use crate::provider::EmbeddingProvider;
use async_trait::async_trait;
use dp_core::Result;
use dp_index::distance;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic character n-gram feature-hashing embedder.
///
/// Each n-gram of the lowercased, whitespace-collapsed text hashes to one
/// bucket with a sign bit; the accumulated vector is L2-normalized. Texts
/// sharing most of their n-grams land close in cosine space, which is all
/// the detectors need. No model download, no global state.
pub struct HashingEmbedder {
    dimension: usize,
    ngram: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self::with_ngram(dimension, 3)
    }

    pub fn with_ngram(dimension: usize, ngram: usize) -> Self {
        assert!(dimension > 0, "dimension must be positive");
        assert!(ngram > 0, "ngram must be positive");
        Self { dimension, ngram }
    }

    /// Embed one text. Pure and deterministic.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let normalized = text
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let chars: Vec<char> = normalized.chars().collect();

        let mut v = vec![0.0f32; self.dimension];
        if chars.is_empty() {
            return v;
        }
        if chars.len() < self.ngram {
            self.accumulate(&mut v, &normalized);
        } else {
            for window in chars.windows(self.ngram) {
                let gram: String = window.iter().collect();
                self.accumulate(&mut v, &gram);
            }
        }
        distance::normalize_vector(&mut v);
        v
    }

    fn accumulate(&self, v: &mut [f32], feature: &str) {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        let h = hasher.finish();
        let bucket = (h as usize) % self.dimension;
        let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
        v[bucket] += sign;
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        "char-ngram-hashing"
    }
}
