//! Hyperplane LSH detection over embedding vectors.
//!
//! A seeded generator draws `nbits` unit-norm hyperplanes once per run; each
//! document's signature sets bit `k` when its embedding lies on the positive
//! side of hyperplane `k`. Banding buckets documents by signature slices to
//! produce candidates, which are verified by exact Hamming distance.

use std::collections::{HashMap, HashSet};

use dp_core::{DpError, HyperplaneLshParams, Result, SimilarityPair};
use dp_index::distance::{all_finite, inner_product, normalize_vector};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Bit signature packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    words: Vec<u64>,
    nbits: usize,
}

impl Signature {
    fn zeroed(nbits: usize) -> Self {
        Self {
            words: vec![0; (nbits + 63) / 64],
            nbits,
        }
    }

    fn set_bit(&mut self, k: usize) {
        self.words[k / 64] |= 1 << (k % 64);
    }

    pub fn bit(&self, k: usize) -> bool {
        (self.words[k / 64] >> (k % 64)) & 1 == 1
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Number of differing bits between two signatures of equal length.
    pub fn hamming(&self, other: &Signature) -> u32 {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// The integer value of band `band` of width `width` bits.
    pub fn band_key(&self, band: usize, width: usize) -> u64 {
        let start = band * width;
        let mut key = 0u64;
        for offset in 0..width {
            key = (key << 1) | u64::from(self.bit(start + offset));
        }
        key
    }
}

/// Projects embeddings onto a fixed set of seeded random hyperplanes.
///
/// Two hashers built with the same dimension, bit count, and seed produce
/// identical signatures for identical inputs.
pub struct HyperplaneHasher {
    dimension: usize,
    planes: Vec<Vec<f32>>,
}

impl HyperplaneHasher {
    pub fn new(dimension: usize, nbits: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut planes = Vec::with_capacity(nbits);
        for _ in 0..nbits {
            let mut plane = Vec::with_capacity(dimension);
            while plane.len() < dimension {
                let (a, b) = gaussian_pair(&mut rng);
                plane.push(a);
                if plane.len() < dimension {
                    plane.push(b);
                }
            }
            normalize_vector(&mut plane);
            planes.push(plane);
        }
        Self { dimension, planes }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn nbits(&self) -> usize {
        self.planes.len()
    }

    /// Compute the bit signature of one embedding.
    pub fn signature(&self, vector: &[f32]) -> Result<Signature> {
        if vector.len() != self.dimension {
            return Err(DpError::InvalidInput(format!(
                "dimension mismatch: hasher expects {}, got {}",
                self.dimension,
                vector.len()
            )));
        }
        if !all_finite(vector) {
            return Err(DpError::InvalidInput(
                "vector contains NaN or infinite components".into(),
            ));
        }
        let mut signature = Signature::zeroed(self.planes.len());
        for (k, plane) in self.planes.iter().enumerate() {
            if inner_product(vector, plane) > 0.0 {
                signature.set_bit(k);
            }
        }
        Ok(signature)
    }
}

/// Box-Muller transform over the seeded uniform stream.
fn gaussian_pair(rng: &mut StdRng) -> (f32, f32) {
    let u1: f32 = rng.gen::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.gen();
    let radius = (-2.0 * u1.ln()).sqrt();
    let angle = std::f32::consts::TAU * u2;
    (radius * angle.cos(), radius * angle.sin())
}

fn validate_params(params: &HyperplaneLshParams) -> Result<usize> {
    if params.nbits == 0 {
        return Err(DpError::InvalidParams("nbits must be positive".into()));
    }
    if params.bands == 0 {
        return Err(DpError::InvalidParams("bands must be positive".into()));
    }
    if params.nbits % params.bands != 0 {
        return Err(DpError::InvalidParams(format!(
            "nbits ({}) must be divisible by bands ({})",
            params.nbits, params.bands
        )));
    }
    let width = params.nbits / params.bands;
    if width > 64 {
        return Err(DpError::InvalidParams(format!(
            "band width {width} exceeds 64 bits"
        )));
    }
    Ok(width)
}

/// Find all pairs whose signatures lie within the Hamming threshold.
///
/// Returns pairs sorted by ascending distance (smaller is more similar).
pub fn find_duplicates(
    embeddings: &[Vec<f32>],
    params: &HyperplaneLshParams,
) -> Result<Vec<SimilarityPair>> {
    let width = validate_params(params)?;
    if embeddings.is_empty() {
        return Ok(Vec::new());
    }
    let dimension = embeddings[0].len();
    if dimension == 0 {
        return Err(DpError::InvalidInput(
            "embeddings must have at least one dimension".into(),
        ));
    }

    let hasher = HyperplaneHasher::new(dimension, params.nbits, params.seed);
    let mut signatures = Vec::with_capacity(embeddings.len());
    for row in embeddings {
        signatures.push(hasher.signature(row)?);
    }

    let mut candidates: HashSet<(usize, usize)> = HashSet::new();
    for band in 0..params.bands {
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for (id, signature) in signatures.iter().enumerate() {
            buckets
                .entry(signature.band_key(band, width))
                .or_default()
                .push(id);
        }
        for members in buckets.values() {
            if members.len() < 2 {
                continue;
            }
            // Bucket members are in ascending id order already.
            for (slot, &i) in members.iter().enumerate() {
                for &j in &members[slot + 1..] {
                    candidates.insert((i, j));
                }
            }
        }
    }

    let mut pairs = Vec::new();
    for &(i, j) in &candidates {
        let distance = signatures[i].hamming(&signatures[j]);
        if distance <= params.hamming_threshold {
            pairs.push(SimilarityPair::new(i, j, distance as f32));
        }
    }

    pairs.sort_by(|x, y| {
        x.score
            .partial_cmp(&y.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.ids().cmp(&y.ids()))
    });
    tracing::debug!(
        candidates = candidates.len(),
        pairs = pairs.len(),
        documents = embeddings.len(),
        "hyperplane LSH detection complete"
    );
    Ok(pairs)
}
