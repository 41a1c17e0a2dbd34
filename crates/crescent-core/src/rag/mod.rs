//! RAG (Retrieval-Augmented Generation) pipeline.
//!
//! Defines the retrieval unit ([`Passage`]), the retriever seam, the
//! context formatter, and the pipeline that orchestrates
//! retrieve -> format -> prompt -> generate.

pub mod context;
pub mod pipeline;
pub mod retriever;
pub mod types;

pub use context::format_context;
pub use pipeline::{RagPipeline, Retriever};
pub use retriever::{QdrantRetriever, QdrantRetrieverConfig};
pub use types::{Answer, Passage};
