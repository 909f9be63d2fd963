//! Shingle MinHash detection over raw document text.
//!
//! Texts are normalized and decomposed into character shingle sets, sketched
//! with MinHash, and banded through an LSH structure tuned to the Jaccard
//! threshold. Candidates are verified by exact sketch Jaccard before a pair
//! is accepted.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use dp_core::{DpError, Result, ShingleMinhashParams, SimilarityPair};

/// Lowercase, collapse whitespace runs to a single space, trim.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The set of all contiguous `k`-character substrings of the normalized text.
///
/// A normalized text shorter than `k` yields the singleton set containing the
/// whole text, so very short documents remain comparable.
pub fn shingle_set(text: &str, k: usize) -> HashSet<String> {
    let normalized = normalize_text(text);
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < k {
        let mut set = HashSet::with_capacity(1);
        set.insert(normalized);
        return set;
    }
    chars
        .windows(k)
        .map(|window| window.iter().collect())
        .collect()
}

/// MinHash sketch generator with a fixed family of seeded hash functions.
#[derive(Debug, Clone)]
pub struct MinHasher {
    num_perm: usize,
    seeds: Vec<u64>,
}

impl MinHasher {
    pub fn new(num_perm: usize) -> Self {
        Self::with_seed(num_perm, 42)
    }

    pub fn with_seed(num_perm: usize, seed: u64) -> Self {
        let mut seeds = Vec::with_capacity(num_perm);
        let mut state = seed;
        for _ in 0..num_perm {
            // LCG for per-function seed derivation.
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            seeds.push(state);
        }
        Self { num_perm, seeds }
    }

    /// Sketch a shingle set as the per-function minimum hash values.
    pub fn sketch(&self, shingles: &HashSet<String>) -> Sketch {
        let mut values = vec![u64::MAX; self.num_perm];
        for shingle in shingles {
            for (i, &seed) in self.seeds.iter().enumerate() {
                let hash = hash_with_seed(shingle, seed);
                if hash < values[i] {
                    values[i] = hash;
                }
            }
        }
        Sketch { values }
    }

    pub fn num_perm(&self) -> usize {
        self.num_perm
    }
}

fn hash_with_seed(item: &str, seed: u64) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    item.hash(&mut hasher);
    hasher.finish()
}

/// A MinHash sketch of one document's shingle set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    pub values: Vec<u64>,
}

impl Sketch {
    /// Estimated Jaccard similarity as the fraction of matching positions.
    pub fn jaccard(&self, other: &Sketch) -> f64 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }
        let matches = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        matches as f64 / self.values.len() as f64
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// LSH index over sketches for candidate pair generation.
#[derive(Debug)]
pub struct SketchLsh {
    bands: usize,
    rows_per_band: usize,
    buckets: Vec<HashMap<u64, Vec<usize>>>,
    sketches: Vec<Sketch>,
}

impl SketchLsh {
    pub fn new(bands: usize, rows_per_band: usize) -> Self {
        Self {
            bands,
            rows_per_band,
            buckets: (0..bands).map(|_| HashMap::new()).collect(),
            sketches: Vec::new(),
        }
    }

    /// Pick the band/row split of `num_perm` whose collision threshold
    /// `(1/bands)^(1/rows)` lands closest to the target.
    pub fn with_threshold(num_perm: usize, threshold: f64) -> Self {
        let mut best_bands = 1;
        let mut best_error = f64::MAX;
        for bands in 1..=num_perm {
            if num_perm % bands != 0 {
                continue;
            }
            let rows = num_perm / bands;
            let t = (1.0 / bands as f64).powf(1.0 / rows as f64);
            let error = (t - threshold).abs();
            if error < best_error {
                best_error = error;
                best_bands = bands;
            }
        }
        Self::new(best_bands, num_perm / best_bands)
    }

    /// Insert a sketch, returning the id it was stored under.
    pub fn insert(&mut self, sketch: Sketch) -> usize {
        let id = self.sketches.len();
        for (band, chunk) in sketch.values.chunks(self.rows_per_band).enumerate() {
            if band >= self.bands {
                break;
            }
            let key = hash_band(chunk);
            self.buckets[band].entry(key).or_default().push(id);
        }
        self.sketches.push(sketch);
        id
    }

    /// Ids sharing at least one band bucket with the sketch.
    pub fn query(&self, sketch: &Sketch) -> Vec<usize> {
        let mut candidates: HashSet<usize> = HashSet::new();
        for (band, chunk) in sketch.values.chunks(self.rows_per_band).enumerate() {
            if band >= self.bands {
                break;
            }
            let key = hash_band(chunk);
            if let Some(ids) = self.buckets[band].get(&key) {
                candidates.extend(ids.iter().copied());
            }
        }
        candidates.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sketches.is_empty()
    }

    /// Approximate collision threshold of this band configuration.
    pub fn threshold(&self) -> f64 {
        (1.0 / self.bands as f64).powf(1.0 / self.rows_per_band as f64)
    }
}

fn hash_band(values: &[u64]) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    let mut hasher = DefaultHasher::new();
    for value in values {
        value.hash(&mut hasher);
    }
    hasher.finish()
}

/// Find all pairs whose sketch Jaccard reaches the configured threshold.
///
/// Returns pairs sorted by descending similarity. Fewer than two documents
/// yields an empty list with a warning rather than an error.
pub fn find_duplicates(
    texts: &[String],
    params: &ShingleMinhashParams,
) -> Result<Vec<SimilarityPair>> {
    if params.num_perm == 0 {
        return Err(DpError::InvalidParams("num_perm must be positive".into()));
    }
    if params.k_shingles == 0 {
        return Err(DpError::InvalidParams(
            "k_shingles must be positive".into(),
        ));
    }
    if texts.len() < 2 {
        tracing::warn!(
            documents = texts.len(),
            "shingle detection needs at least 2 documents, returning no pairs"
        );
        return Ok(Vec::new());
    }

    let hasher = MinHasher::new(params.num_perm);
    let sketches: Vec<Sketch> = texts
        .iter()
        .map(|text| hasher.sketch(&shingle_set(text, params.k_shingles)))
        .collect();

    let mut lsh = SketchLsh::with_threshold(params.num_perm, params.jaccard_threshold);
    for sketch in &sketches {
        lsh.insert(sketch.clone());
    }

    let mut pairs = Vec::new();
    for (i, sketch) in sketches.iter().enumerate() {
        for j in lsh.query(sketch) {
            // Each unordered pair is produced from its lower id only.
            if j <= i {
                continue;
            }
            let similarity = sketch.jaccard(&sketches[j]);
            if similarity >= params.jaccard_threshold {
                pairs.push(SimilarityPair::new(i, j, similarity as f32));
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
        documents = texts.len(),
        "shingle MinHash detection complete"
    );
    Ok(pairs)
}
