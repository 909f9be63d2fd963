//! Detection pipeline — runs one or more methods over a shared corpus.

use std::time::Instant;

use dp_core::{
    DetectionMethod, DetectionParams, DpError, Report, RepresentativePolicy, Result,
    SimilarityPair,
};
use serde::Serialize;

use crate::{cluster, detect, Corpus};

/// Everything one successful method run produced.
#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    pub method: DetectionMethod,
    pub pairs: Vec<SimilarityPair>,
    pub report: Report,
    pub elapsed_ms: f64,
}

/// One method's slot in the pipeline outcome, success or failure.
#[derive(Debug)]
pub struct MethodOutcome {
    pub method: DetectionMethod,
    pub result: Result<MethodReport>,
}

/// Combined outcome of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub methods: Vec<MethodOutcome>,
    pub total_docs: usize,
}

impl PipelineOutcome {
    /// Methods that completed, in run order.
    pub fn succeeded(&self) -> impl Iterator<Item = &MethodReport> {
        self.methods
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    /// Methods that failed, with their errors, in run order.
    pub fn failed(&self) -> impl Iterator<Item = (DetectionMethod, &DpError)> {
        self.methods.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|error| (outcome.method, error))
        })
    }
}

/// Coordinates detection and clustering across methods.
///
/// Methods are independent pure functions of the same corpus, so one method
/// failing records an error in its own slot and the rest still run.
#[derive(Debug, Clone)]
pub struct DetectionPipeline {
    pub params: DetectionParams,
    pub policy: RepresentativePolicy,
}

impl DetectionPipeline {
    pub fn new(params: DetectionParams, policy: RepresentativePolicy) -> Self {
        Self { params, policy }
    }

    /// Run the given methods in order, one outcome slot per method.
    pub fn run(&self, corpus: &Corpus, methods: &[DetectionMethod]) -> PipelineOutcome {
        let mut outcomes = Vec::with_capacity(methods.len());
        for &method in methods {
            let result = self.run_method(corpus, method);
            if let Err(error) = &result {
                tracing::warn!("detection method {} failed: {}", method, error);
            }
            outcomes.push(MethodOutcome { method, result });
        }
        PipelineOutcome {
            methods: outcomes,
            total_docs: corpus.len(),
        }
    }

    /// Run every available detection method.
    pub fn run_all(&self, corpus: &Corpus) -> PipelineOutcome {
        self.run(corpus, &DetectionMethod::all())
    }

    fn run_method(&self, corpus: &Corpus, method: DetectionMethod) -> Result<MethodReport> {
        let start = Instant::now();
        let pairs = detect(corpus, method, &self.params)?;
        let report = cluster::cluster(&pairs, corpus.texts(), corpus.embeddings(), self.policy)?;
        Ok(MethodReport {
            method,
            pairs,
            report,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new(DetectionParams::default(), RepresentativePolicy::default())
    }
}
