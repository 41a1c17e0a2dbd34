//! Qdrant-backed retriever
//!
//! Embeds the query text and runs a similarity search against a pre-built
//! Qdrant collection. The index itself is opaque to this crate; ingestion
//! and chunking happen elsewhere.

use crate::error::{CoreError, CoreResult};
use crate::llm::Embedder;
use crate::rag::pipeline::Retriever;
use crate::rag::types::Passage;
use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{QueryPointsBuilder, value::Kind};
use std::collections::HashMap;
use std::sync::Arc;

/// Payload keys under which passage fields are stored on each point.
const PAYLOAD_KEY_TEXT: &str = "text";
const PAYLOAD_KEY_SOURCE: &str = "source";
const PAYLOAD_KEY_PAGE: &str = "page";
const PAYLOAD_KEY_START_INDEX: &str = "start_index";

/// Configuration for connecting to a Qdrant instance.
#[derive(Debug, Clone)]
pub struct QdrantRetrieverConfig {
    /// Qdrant server URL (e.g., "http://localhost:6334")
    pub url: String,
    /// Optional API key for Qdrant Cloud or authenticated instances
    pub api_key: Option<String>,
    /// Name of the collection holding the passage index
    pub collection_name: String,
}

impl QdrantRetrieverConfig {
    pub fn new(url: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection_name: collection_name.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `QDRANT_URL` (default "http://localhost:6334"), optional
    /// `QDRANT_API_KEY`, and `QDRANT_COLLECTION` (default "crescent").
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".to_string()),
            api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection_name: std::env::var("QDRANT_COLLECTION")
                .unwrap_or_else(|_| "crescent".to_string()),
        }
    }
}

/// Retriever over a Qdrant collection plus an embedder for the query.
///
/// Each stored point carries the passage fields in its payload under the
/// `text`/`source`/`page`/`start_index` keys. Rank order of the Qdrant
/// response is preserved in the returned passages.
pub struct QdrantRetriever {
    client: Qdrant,
    embedder: Arc<dyn Embedder>,
    collection_name: String,
}

/// Extract a string value from a Qdrant payload Value.
fn extract_str(val: &qdrant_client::qdrant::Value) -> Option<&str> {
    match &val.kind {
        Some(Kind::StringValue(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Extract an unsigned integer from a Qdrant payload Value.
///
/// Accepts both native integer payloads and stringified integers, since
/// ingestion tooling differs in how it writes numeric metadata.
fn extract_u64(val: &qdrant_client::qdrant::Value) -> Option<u64> {
    match &val.kind {
        Some(Kind::IntegerValue(n)) => u64::try_from(*n).ok(),
        Some(Kind::StringValue(s)) => s.parse().ok(),
        _ => None,
    }
}

impl QdrantRetriever {
    /// Connect to Qdrant using the given configuration and embedder.
    pub fn new(config: QdrantRetrieverConfig, embedder: Arc<dyn Embedder>) -> CoreResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);
        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Qdrant connection failed: {e}")))?;

        Ok(Self {
            client,
            embedder,
            collection_name: config.collection_name,
        })
    }

    /// Convert a scored point's payload into a Passage.
    ///
    /// Points missing the `text` payload are dropped rather than surfaced
    /// as empty passages; the other fields fall back to zero values.
    fn point_to_passage(
        payload: &HashMap<String, qdrant_client::qdrant::Value>,
    ) -> Option<Passage> {
        let text = payload.get(PAYLOAD_KEY_TEXT).and_then(extract_str)?;
        let source = payload
            .get(PAYLOAD_KEY_SOURCE)
            .and_then(extract_str)
            .unwrap_or_default();
        let page = payload
            .get(PAYLOAD_KEY_PAGE)
            .and_then(extract_u64)
            .unwrap_or(0) as u32;
        let start_index = payload
            .get(PAYLOAD_KEY_START_INDEX)
            .and_then(extract_u64)
            .unwrap_or(0) as usize;

        Some(Passage::new(text, source, page, start_index))
    }
}

#[async_trait]
impl Retriever for QdrantRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> CoreResult<Vec<Passage>> {
        let embedding = self.embedder.embed(query).await?;

        let response = self
            .client
            .query(
                QueryPointsBuilder::new(&self.collection_name)
                    .query(embedding)
                    .limit(top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| CoreError::Retrieval(format!("Qdrant search failed: {e}")))?;

        tracing::debug!(
            collection = %self.collection_name,
            hits = response.result.len(),
            "qdrant query complete"
        );

        Ok(response
            .result
            .iter()
            .filter_map(|point| Self::point_to_passage(&point.payload))
            .collect())
    }
}
