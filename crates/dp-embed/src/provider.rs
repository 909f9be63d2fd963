use async_trait::async_trait;
use dp_core::Result;

/// Contract for embedding backends.
///
/// Implementations must return one row per input, in input order, with a
/// consistent dimension, and must be deterministic for a given model and
/// text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, one row per input in order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut rows = Vec::with_capacity(texts.len());
        for text in texts {
            rows.push(self.embed(text).await?);
        }
        Ok(rows)
    }

    /// Output dimension of every row this provider produces.
    fn dimension(&self) -> usize;

    /// Stable identifier of the underlying model.
    fn model_id(&self) -> &str;
}
