//! Embedding providers for the detection service.
//!
//! The engine consumes embeddings as plain data; whoever drives it (the HTTP
//! server, a test) constructs one provider and passes vectors in. Nothing in
//! this crate holds global state.

pub mod hashing;
pub mod provider;

pub use hashing::HashingEmbedder;
pub use provider::EmbeddingProvider;
