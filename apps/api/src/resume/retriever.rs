use tracing::debug;

use crate::llm_client::{Embedder, LlmError};
use crate::text::similarity::cosine_dense;

#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Per-request vector store over the chunks of one document.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    chunks: Vec<EmbeddedChunk>,
}

impl InMemoryVectorStore {
    /// Embeds each chunk in order.
    pub async fn from_chunks(
        chunks: Vec<String>,
        embedder: &dyn Embedder,
    ) -> Result<Self, LlmError> {
        let mut embedded = Vec::with_capacity(chunks.len());
        for text in chunks {
            let embedding = embedder.embed(&text).await?;
            embedded.push(EmbeddedChunk { text, embedding });
        }
        debug!("Embedded {} resume chunks", embedded.len());
        Ok(Self { chunks: embedded })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Up to `k` chunks most similar to `query_embedding`, most similar first.
    pub fn top_k(&self, query_embedding: &[f32], k: usize) -> Vec<&EmbeddedChunk> {
        let mut scored: Vec<(f32, &EmbeddedChunk)> = self
            .chunks
            .iter()
            .map(|c| (cosine_dense(query_embedding, &c.embedding), c))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(k).map(|(_, c)| c).collect()
    }

    /// Embeds `query` and returns the top `k` chunk texts.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<&str>, LlmError> {
        let query_embedding = embedder.embed(query).await?;
        Ok(self
            .top_k(&query_embedding, k)
            .into_iter()
            .map(|c| c.text.as_str())
            .collect())
    }
}
