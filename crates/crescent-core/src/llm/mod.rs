//! LLM seams and OpenAI-compatible implementations.

pub mod openai;

use crate::error::CoreResult;
use async_trait::async_trait;

pub use openai::{OpenAIEmbedder, OpenAIGenerator, OpenAILlmConfig};

/// Text completion seam for the pipeline.
///
/// Implementations receive the fully rendered prompt and return a plain
/// completion string, with any structural API wrapper already stripped.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> CoreResult<String>;
}

/// Embedding seam used by vector retrievers to embed the query text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>>;
}
