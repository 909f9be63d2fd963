use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DpError;

/// A document in the detection corpus.
///
/// `id` is the 0-based position of the document in the input batch and is
/// stable for the duration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            embedding: None,
        }
    }

    pub fn with_embedding(id: usize, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id,
            text: text.into(),
            embedding: Some(embedding),
        }
    }
}

/// A scored pair of near-duplicate document ids.
///
/// Canonical form: `a < b`. The meaning of `score` depends on the method
/// that produced the pair, see [`ScorePolarity`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub a: usize,
    pub b: usize,
    pub score: f32,
}

impl SimilarityPair {
    /// Create a pair, swapping ids into canonical `a < b` order.
    pub fn new(i: usize, j: usize, score: f32) -> Self {
        debug_assert_ne!(i, j);
        if i < j {
            Self { a: i, b: j, score }
        } else {
            Self { a: j, b: i, score }
        }
    }

    /// The canonical id pair, usable as a dedup key.
    pub fn ids(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// Detection methods, selectable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Exact cosine search over an inner-product index.
    VectorIndex,
    /// Random-hyperplane signatures with LSH banding, Hamming verification.
    HyperplaneLsh,
    /// Character shingles, MinHash sketches, Jaccard verification.
    ShingleMinhash,
}

impl DetectionMethod {
    pub fn all() -> [DetectionMethod; 3] {
        [
            Self::VectorIndex,
            Self::HyperplaneLsh,
            Self::ShingleMinhash,
        ]
    }

    /// Whether this method consumes document embeddings or raw text.
    pub fn needs_embeddings(&self) -> bool {
        !matches!(self, Self::ShingleMinhash)
    }

    /// Which direction of `score` means "more similar" for this method.
    pub fn score_polarity(&self) -> ScorePolarity {
        match self {
            Self::VectorIndex | Self::ShingleMinhash => ScorePolarity::Similarity,
            Self::HyperplaneLsh => ScorePolarity::Distance,
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorIndex => write!(f, "vector_index"),
            Self::HyperplaneLsh => write!(f, "hyperplane_lsh"),
            Self::ShingleMinhash => write!(f, "shingle_minhash"),
        }
    }
}

impl FromStr for DetectionMethod {
    type Err = DpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector_index" => Ok(Self::VectorIndex),
            "hyperplane_lsh" => Ok(Self::HyperplaneLsh),
            "shingle_minhash" => Ok(Self::ShingleMinhash),
            other => Err(DpError::UnknownMethod(other.to_string())),
        }
    }
}

/// Interpretation of [`SimilarityPair::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolarity {
    /// Higher score = more similar (cosine, Jaccard).
    Similarity,
    /// Lower score = more similar (Hamming distance).
    Distance,
}

/// Which cluster member survives deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativePolicy {
    /// Fewest characters, ties broken by lowest id.
    Shortest,
    /// Most characters, ties broken by lowest id.
    Longest,
    /// Closest to the mean embedding, ties broken by lowest id.
    Centroid,
}

impl Default for RepresentativePolicy {
    fn default() -> Self {
        Self::Centroid
    }
}

impl fmt::Display for RepresentativePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shortest => write!(f, "shortest"),
            Self::Longest => write!(f, "longest"),
            Self::Centroid => write!(f, "centroid"),
        }
    }
}

impl FromStr for RepresentativePolicy {
    type Err = DpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortest" => Ok(Self::Shortest),
            "longest" => Ok(Self::Longest),
            "centroid" => Ok(Self::Centroid),
            other => Err(DpError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A document inside a cluster, with its survival marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterDocument {
    pub id: usize,
    pub text: String,
    pub is_representative: bool,
}

/// A group of mutually near-duplicate documents (always 2 or more).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Smallest member id, the canonical name of the cluster.
    pub root: usize,
    /// Member ids in ascending order.
    pub members: Vec<usize>,
    /// The member chosen to survive deduplication.
    pub representative: usize,
    pub documents: Vec<ClusterDocument>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Aggregate counters for one detection run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    pub total_docs: usize,
    pub n_clusters: usize,
    pub n_removed: usize,
    pub n_kept: usize,
    pub n_pairs: usize,
    pub removal_rate: f64,
}

impl Stats {
    pub fn new(
        total_docs: usize,
        n_clusters: usize,
        n_removed: usize,
        n_kept: usize,
        n_pairs: usize,
    ) -> Self {
        let removal_rate = if total_docs == 0 {
            0.0
        } else {
            n_removed as f64 / total_docs as f64
        };
        Self {
            total_docs,
            n_clusters,
            n_removed,
            n_kept,
            n_pairs,
            removal_rate,
        }
    }
}

/// Full clustering outcome for one corpus and one detection method.
///
/// `duplicates` and `kept` partition the corpus: every document id appears
/// in exactly one of the two lists, both sorted ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Clusters keyed by a stable 0-based index, assigned in ascending
    /// order of each cluster's smallest member id.
    pub clusters: BTreeMap<usize, Cluster>,
    pub stats: Stats,
    pub duplicates: Vec<usize>,
    pub kept: Vec<usize>,
}
