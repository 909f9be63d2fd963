//! Dense-vector similarity search for near-duplicate detection.
//!
//! Provides distance primitives and a brute-force inner-product index behind
//! the [`VectorIndex`] trait, so an approximate backend can be swapped in
//! without changing callers.

pub mod distance;
pub mod error;
pub mod index;

pub use error::{IndexError, Result};
pub use index::{FlatIndex, SearchResult, VectorIndex};
