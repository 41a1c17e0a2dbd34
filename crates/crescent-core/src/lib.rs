//! Crescent Core - retrieval-augmented chat pipeline.
//!
//! Embeds a user question, retrieves the most relevant passages from a
//! pre-built vector index, asks a language model to answer with those
//! passages as context, and attaches a source citation. Presentation
//! (simulated typing) and session state live in the [`chat`] module.

// error module
pub mod error;

// RAG module - retrieval, context formatting, pipeline
pub mod rag;

// prompt module
pub mod prompt;

// attribution module - source citations
pub mod attribution;

// llm module - OpenAI-compatible generator and embedder
pub mod llm;

// chat module - session log, turn engine, typing presenter
pub mod chat;

pub use error::{CoreError, CoreResult};
pub use rag::{Answer, Passage, RagPipeline, Retriever, format_context};
