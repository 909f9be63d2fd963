//! Vector index implementations.

mod flat;
mod traits;

pub use flat::FlatIndex;
pub use traits::VectorIndex;

/// Search result: (id, score) pairs sorted by descending score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub ids: Vec<usize>,
    pub scores: Vec<f32>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            ids: vec![],
            scores: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over (id, score) pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.ids.iter().copied().zip(self.scores.iter().copied())
    }
}
