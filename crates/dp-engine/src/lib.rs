//! Doppel Engine — near-duplicate detection over a document corpus.
//!
//! Detectors:
//! 1. Vector index — cosine similarity over embeddings via an inner-product index
//! 2. Hyperplane LSH — random-hyperplane bit signatures compared by Hamming distance
//! 3. Shingle MinHash — character shingles sketched and banded for Jaccard estimation
//!
//! Every detector emits canonical [`SimilarityPair`]s which [`cluster`] folds
//! into duplicate groups with a designated representative per group.

pub mod cluster;
pub mod hyperplane;
pub mod pipeline;
pub mod shingle;
pub mod vector;

use dp_core::{DetectionMethod, DetectionParams, Document, DpError, Result, SimilarityPair};

pub use cluster::{cluster, group_members, select_representative, UnionFind};
pub use hyperplane::HyperplaneHasher;
pub use pipeline::{DetectionPipeline, MethodOutcome, MethodReport, PipelineOutcome};
pub use shingle::{MinHasher, Sketch, SketchLsh};


/// A batch of documents prepared for detection. Texts are always present;
/// embeddings are attached only when an upstream provider supplied them.
#[derive(Debug, Clone)]
pub struct Corpus {
    texts: Vec<String>,
    embeddings: Option<Vec<Vec<f32>>>,
}

impl Corpus {
    pub fn from_texts(texts: Vec<String>) -> Self {
        Self {
            texts,
            embeddings: None,
        }
    }

    /// Attach one embedding row per document.
    pub fn with_embeddings(texts: Vec<String>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if texts.len() != embeddings.len() {
            return Err(DpError::InvalidInput(format!(
                "got {} embeddings for {} documents",
                embeddings.len(),
                texts.len()
            )));
        }
        Ok(Self {
            texts,
            embeddings: Some(embeddings),
        })
    }

    /// Build a corpus from documents, which must carry embeddings either
    /// uniformly or not at all.
    pub fn from_documents(documents: &[Document]) -> Result<Self> {
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let with_embedding = documents.iter().filter(|d| d.embedding.is_some()).count();
        if with_embedding == 0 {
            return Ok(Self::from_texts(texts));
        }
        if with_embedding != documents.len() {
            return Err(DpError::InvalidInput(format!(
                "{} of {} documents carry embeddings; expected all or none",
                with_embedding,
                documents.len()
            )));
        }
        let embeddings = documents
            .iter()
            .map(|d| d.embedding.clone().unwrap_or_default())
            .collect();
        Self::with_embeddings(texts, embeddings)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn embeddings(&self) -> Option<&[Vec<f32>]> {
        self.embeddings.as_deref()
    }
}

/// Run a single detection method over the corpus.
pub fn detect(
    corpus: &Corpus,
    method: DetectionMethod,
    params: &DetectionParams,
) -> Result<Vec<SimilarityPair>> {
    match method {
        DetectionMethod::VectorIndex => {
            let embeddings = require_embeddings(corpus, method)?;
            vector::find_duplicates(embeddings, &params.vector)
        }
        DetectionMethod::HyperplaneLsh => {
            let embeddings = require_embeddings(corpus, method)?;
            hyperplane::find_duplicates(embeddings, &params.hyperplane)
        }
        DetectionMethod::ShingleMinhash => shingle::find_duplicates(corpus.texts(), &params.shingle),
    }
}

fn require_embeddings(corpus: &Corpus, method: DetectionMethod) -> Result<&[Vec<f32>]> {
    corpus
        .embeddings()
        .ok_or_else(|| DpError::InvalidInput(format!("{method} requires document embeddings")))
}
