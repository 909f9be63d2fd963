use super::{traits::VectorIndex, SearchResult};
use crate::distance::{self, DistanceMetric};
use crate::error::{IndexError, Result};
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Brute-force (flat) vector index.
/// Exact nearest-neighbor search by scanning all vectors.
pub struct FlatIndex {
    dimension: usize,
    metric: DistanceMetric,
    inner: RwLock<FlatInner>,
}

struct FlatInner {
    ids: Vec<usize>,
    vectors: Vec<Vec<f32>>,
    id_to_pos: HashMap<usize, usize>,
}

impl FlatIndex {
    pub fn new(dimension: usize, metric: DistanceMetric) -> Self {
        Self::with_capacity(dimension, metric, 0)
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(dimension: usize, metric: DistanceMetric, capacity: usize) -> Self {
        Self {
            dimension,
            metric,
            inner: RwLock::new(FlatInner {
                ids: Vec::with_capacity(capacity),
                vectors: Vec::with_capacity(capacity),
                id_to_pos: HashMap::with_capacity(capacity),
            }),
        }
    }

    fn check_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        if !distance::all_finite(vector) {
            return Err(IndexError::InvalidVector(
                "vector contains NaN or infinite components".into(),
            ));
        }
        Ok(())
    }
}

impl VectorIndex for FlatIndex {
    fn insert(&self, id: usize, vector: &[f32]) -> Result<()> {
        self.check_vector(vector)?;
        let mut inner = self.inner.write();
        let mut vec = vector.to_vec();
        // For cosine, normalize on insert so search reduces to IP
        if self.metric == DistanceMetric::Cosine {
            distance::normalize_vector(&mut vec);
        }
        if let Some(&pos) = inner.id_to_pos.get(&id) {
            inner.vectors[pos] = vec;
        } else {
            let pos = inner.ids.len();
            inner.ids.push(id);
            inner.vectors.push(vec);
            inner.id_to_pos.insert(id, pos);
        }
        Ok(())
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<SearchResult> {
        self.check_vector(query)?;
        let inner = self.inner.read();
        if inner.ids.is_empty() || top_k == 0 {
            return Ok(SearchResult::empty());
        }

        let query_vec = if self.metric == DistanceMetric::Cosine {
            let mut q = query.to_vec();
            distance::normalize_vector(&mut q);
            q
        } else {
            query.to_vec()
        };

        let effective_metric = if self.metric == DistanceMetric::Cosine {
            DistanceMetric::Ip // normalized vectors: cosine = IP
        } else {
            self.metric
        };

        // Min-heap of size top_k over (score, Reverse(id)); equal scores
        // evict the larger id first so ranking ties resolve to lower ids.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, Reverse<usize>)>> =
            BinaryHeap::with_capacity(top_k + 1);
        for (&id, vec) in inner.ids.iter().zip(inner.vectors.iter()) {
            let score = distance::compute_score(effective_metric, &query_vec, vec);
            heap.push(Reverse((OrderedFloat(score), Reverse(id))));
            if heap.len() > top_k {
                heap.pop();
            }
        }

        let mut ranked: Vec<(usize, f32)> = heap
            .into_iter()
            .map(|Reverse((score, Reverse(id)))| (id, score.into_inner()))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        Ok(SearchResult {
            ids: ranked.iter().map(|r| r.0).collect(),
            scores: ranked.iter().map(|r| r.1).collect(),
        })
    }

    fn len(&self) -> usize {
        self.inner.read().ids.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }
}
