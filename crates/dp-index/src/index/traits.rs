use super::SearchResult;
use crate::distance::DistanceMetric;
use crate::error::Result;

/// Core trait for vector index implementations.
pub trait VectorIndex: Send + Sync {
    /// Insert a vector under the given document id. Reinserting an id
    /// replaces its vector.
    fn insert(&self, id: usize, vector: &[f32]) -> Result<()>;

    /// Batch insert vectors.
    fn insert_batch(&self, ids: &[usize], vectors: &[Vec<f32>]) -> Result<()> {
        for (id, vec) in ids.iter().zip(vectors.iter()) {
            self.insert(*id, vec)?;
        }
        Ok(())
    }

    /// Search for the top-k nearest vectors.
    fn search(&self, query: &[f32], top_k: usize) -> Result<SearchResult>;

    /// Number of vectors in the index.
    fn len(&self) -> usize;

    /// Check if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of vectors in this index.
    fn dimension(&self) -> usize;

    /// The distance metric used.
    fn metric(&self) -> DistanceMetric;
}
