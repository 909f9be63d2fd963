use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoppelConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub detection: DetectionParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub dimension: usize,
    pub provider: String,
}

impl Default for DoppelConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            embedding: EmbeddingConfig {
                dimension: 384,
                provider: "hashing".into(),
            },
            detection: DetectionParams::default(),
        }
    }
}

/// Tunables for all three detectors, overridable per request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    pub vector: VectorIndexParams,
    pub hyperplane: HyperplaneLshParams,
    pub shingle: ShingleMinhashParams,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexParams {
    /// Neighbors retrieved per document, clamped to corpus size.
    pub top_k: usize,
    /// Minimum cosine similarity for a pair to count as a duplicate.
    pub similarity_threshold: f32,
}

impl Default for VectorIndexParams {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperplaneLshParams {
    /// Signature length in bits. Must be divisible by `bands`.
    pub nbits: usize,
    /// Number of LSH bands. Band width `nbits / bands` is capped at 64.
    pub bands: usize,
    /// Maximum Hamming distance for a verified pair.
    pub hamming_threshold: u32,
    /// Seed for hyperplane generation.
    pub seed: u64,
}

impl Default for HyperplaneLshParams {
    fn default() -> Self {
        Self {
            nbits: 128,
            bands: 8,
            hamming_threshold: 15,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShingleMinhashParams {
    /// MinHash sketch length.
    pub num_perm: usize,
    /// Minimum sketch-estimated Jaccard for a verified pair.
    pub jaccard_threshold: f64,
    /// Character shingle width.
    pub k_shingles: usize,
}

impl Default for ShingleMinhashParams {
    fn default() -> Self {
        Self {
            num_perm: 128,
            jaccard_threshold: 0.5,
            k_shingles: 5,
        }
    }
}
