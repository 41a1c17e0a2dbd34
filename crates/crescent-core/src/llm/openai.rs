//! OpenAI-backed generator and embedder
//!
//! Uses the `async-openai` crate against api.openai.com or any
//! OpenAI-compatible endpoint (Ollama, vLLM, LocalAI, ...).
//!
//! # Examples
//!
//! ```rust,ignore
//! use crescent_core::llm::{OpenAIGenerator, OpenAILlmConfig};
//!
//! let generator = OpenAIGenerator::with_config(
//!     OpenAILlmConfig::from_env().with_model("gpt-4o-mini"),
//! );
//! ```

use super::{Embedder, Generator};
use crate::error::{CoreError, CoreResult};
use async_openai::{
    Client,
    config::OpenAIConfig as AsyncOpenAIConfig,
    types::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateEmbeddingRequestArgs,
    },
};
use async_trait::async_trait;

/// Default chat model when none is configured.
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
/// Default embedding model when none is configured.
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Sampling temperature for answer generation. Fixed at 0.0 so that
/// generation is deterministic/greedy given the same prompt.
const ANSWER_TEMPERATURE: f32 = 0.0;

/// Configuration for the OpenAI-compatible clients.
#[derive(Debug, Clone)]
pub struct OpenAILlmConfig {
    /// API key
    pub api_key: String,
    /// API base URL; None means api.openai.com
    pub base_url: Option<String>,
    /// Chat model used for answer generation
    pub model: String,
    /// Model used for query embeddings
    pub embedding_model: String,
}

impl Default for OpenAILlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl OpenAILlmConfig {
    /// Create a new configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENAI_API_KEY`, and optionally `OPENAI_BASE_URL`,
    /// `OPENAI_MODEL`, `OPENAI_EMBEDDING_MODEL`. Credentials are loaded
    /// once at process start; the config is read-only afterwards.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            embedding_model: std::env::var("OPENAI_EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the chat model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    fn client(&self) -> Client<AsyncOpenAIConfig> {
        let mut config = AsyncOpenAIConfig::new().with_api_key(&self.api_key);
        if let Some(ref base_url) = self.base_url {
            config = config.with_api_base(base_url);
        }
        Client::with_config(config)
    }
}

/// Answer generator over the chat completions API.
///
/// Sends the rendered prompt as a single user message at temperature 0.0
/// and returns the first choice's content as a plain string. No retry,
/// no post-processing of the completion text.
pub struct OpenAIGenerator {
    client: Client<AsyncOpenAIConfig>,
    config: OpenAILlmConfig,
}

impl OpenAIGenerator {
    /// Create a generator using an API key and the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(OpenAILlmConfig::new(api_key))
    }

    /// Create a generator from environment variables
    pub fn from_env() -> Self {
        Self::with_config(OpenAILlmConfig::from_env())
    }

    /// Create a generator using the given configuration
    pub fn with_config(config: OpenAILlmConfig) -> Self {
        Self {
            client: config.client(),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &OpenAILlmConfig {
        &self.config
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    async fn generate(&self, prompt: &str) -> CoreResult<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| CoreError::Generation(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .temperature(ANSWER_TEMPERATURE)
            .messages(vec![message.into()])
            .build()
            .map_err(|e| CoreError::Generation(e.to_string()))?;

        tracing::debug!(model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| CoreError::Generation(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CoreError::Generation("completion contained no content".to_string()))
    }
}

/// Query embedder over the embeddings API.
pub struct OpenAIEmbedder {
    client: Client<AsyncOpenAIConfig>,
    config: OpenAILlmConfig,
}

impl OpenAIEmbedder {
    /// Create an embedder using an API key and the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(OpenAILlmConfig::new(api_key))
    }

    /// Create an embedder from environment variables
    pub fn from_env() -> Self {
        Self::with_config(OpenAILlmConfig::from_env())
    }

    /// Create an embedder using the given configuration
    pub fn with_config(config: OpenAILlmConfig) -> Self {
        Self {
            client: config.client(),
            config,
        }
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.config.embedding_model)
            .input(text)
            .build()
            .map_err(|e| CoreError::Embedding(e.to_string()))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| CoreError::Embedding(e.to_string()))?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| CoreError::Embedding("embedding response was empty".to_string()))
    }
}
