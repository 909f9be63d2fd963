//! Exact cosine detection through an inner-product index.
//!
//! Embeddings are L2-normalized copies inserted into a [`FlatIndex`] under the
//! IP metric, so every search score is the cosine of the original vectors.
//! Each document queries for its own neighborhood and keeps matches at or
//! above the similarity threshold.

use std::collections::HashSet;

use dp_core::{DpError, Result, SimilarityPair, VectorIndexParams};
use dp_index::{
    distance::{normalize_vector, DistanceMetric},
    FlatIndex, VectorIndex,
};

/// Find all pairs whose cosine similarity reaches the configured threshold.
///
/// Returns pairs sorted by descending similarity. An empty embedding matrix
/// yields an empty list.
pub fn find_duplicates(
    embeddings: &[Vec<f32>],
    params: &VectorIndexParams,
) -> Result<Vec<SimilarityPair>> {
    if embeddings.is_empty() {
        return Ok(Vec::new());
    }
    let dimension = embeddings[0].len();
    if dimension == 0 {
        return Err(DpError::InvalidInput(
            "embeddings must have at least one dimension".into(),
        ));
    }

    let n = embeddings.len();
    let index = FlatIndex::with_capacity(dimension, DistanceMetric::Ip, n);
    let mut normalized: Vec<Vec<f32>> = Vec::with_capacity(n);
    for (id, row) in embeddings.iter().enumerate() {
        let mut copy = row.clone();
        normalize_vector(&mut copy);
        index.insert(id, &copy)?;
        normalized.push(copy);
    }

    // The query vector is in the index, so self occupies one result slot.
    let top_k = params.top_k.min(n);
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut pairs = Vec::new();
    for (id, query) in normalized.iter().enumerate() {
        let results = index.search(query, top_k)?;
        for (neighbor, score) in results.iter() {
            if neighbor == id || score < params.similarity_threshold {
                continue;
            }
            let pair = SimilarityPair::new(id, neighbor, score);
            if seen.insert(pair.ids()) {
                pairs.push(pair);
            }
        }
    }

    pairs.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.ids().cmp(&y.ids()))
    });
    tracing::debug!(
        pairs = pairs.len(),
        documents = n,
        "vector index detection complete"
    );
    Ok(pairs)
}
