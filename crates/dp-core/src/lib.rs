pub mod config;
pub mod error;
pub mod types;

pub use config::{
    DetectionParams, DoppelConfig, HyperplaneLshParams, ShingleMinhashParams, VectorIndexParams,
};
pub use error::{DpError, Result};
pub use types::{
    Cluster, ClusterDocument, DetectionMethod, Document, Report, RepresentativePolicy,
    ScorePolarity, SimilarityPair, Stats,
};
