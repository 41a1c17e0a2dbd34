//! RAG pipeline contracts and orchestration.

use crate::error::{CoreError, CoreResult};
use crate::llm::Generator;
use crate::prompt::PromptTemplate;
use crate::rag::context::format_context;
use crate::rag::types::{Answer, Passage};
use async_trait::async_trait;
use std::sync::Arc;

/// Default number of passages requested per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Similarity-search seam: returns passages relevant to a query, ranked
/// best-first. The similarity metric and ranking are the implementation's
/// responsibility and opaque to the pipeline.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize) -> CoreResult<Vec<Passage>>;
}

/// Orchestrates one retrieval-augmented answer:
/// retrieve -> format context -> render prompt -> generate.
///
/// Collaborators are explicit handles constructed once at startup; there
/// are no ambient globals on this path. External-call failures propagate
/// to the caller unmodified, with no retry and no partial-result fallback.
#[derive(Clone)]
pub struct RagPipeline {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    template: PromptTemplate,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(retriever: Arc<dyn Retriever>, generator: Arc<dyn Generator>) -> Self {
        Self {
            retriever,
            generator,
            template: PromptTemplate,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a query with retrieved context.
    ///
    /// Zero retrieved passages is not an error: the pipeline proceeds with
    /// an empty context block and the template's fallback instruction lets
    /// the model answer from its own knowledge. The returned [`Answer`]
    /// carries the full ranked passage sequence so that the citation is
    /// always derived from the same retrieval call as the answer text.
    pub async fn answer(&self, query: &str) -> CoreResult<Answer> {
        if self.top_k == 0 {
            return Err(CoreError::InvalidInput(
                "top_k must be greater than 0".to_string(),
            ));
        }

        let passages = self.retriever.retrieve(query, self.top_k).await?;
        tracing::debug!(retrieved = passages.len(), "retrieval complete");

        let context = format_context(&passages);
        let prompt = self.template.render(&context, query);
        let text = self.generator.generate(&prompt).await?;

        Ok(Answer { text, passages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeRetriever {
        passages: Vec<Passage>,
        last_top_k: Arc<Mutex<Option<usize>>>,
    }

    impl FakeRetriever {
        fn new(passages: Vec<Passage>) -> Self {
            Self {
                passages,
                last_top_k: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl Retriever for FakeRetriever {
        async fn retrieve(&self, _query: &str, top_k: usize) -> CoreResult<Vec<Passage>> {
            let mut guard = self.last_top_k.lock().unwrap();
            *guard = Some(top_k);
            Ok(self.passages.iter().take(top_k).cloned().collect())
        }
    }

    struct FailingRetriever;

    #[async_trait]
    impl Retriever for FailingRetriever {
        async fn retrieve(&self, _query: &str, _top_k: usize) -> CoreResult<Vec<Passage>> {
            Err(CoreError::Retrieval("index unreachable".to_string()))
        }
    }

    /// Echoes the prompt back so tests can inspect what the generator saw.
    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> CoreResult<String> {
            Ok(format!("PROMPT<{prompt}>"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> CoreResult<String> {
            Err(CoreError::Generation("rate limited".to_string()))
        }
    }

    fn passage(text: &str) -> Passage {
        Passage::new(text, "doc.md", 1, 0)
    }

    #[tokio::test]
    async fn pipeline_happy_path() {
        let retriever = Arc::new(FakeRetriever::new(vec![passage("Refunds within 30 days.")]));
        let pipeline = RagPipeline::new(retriever, Arc::new(EchoGenerator));

        let answer = pipeline.answer("What is the refund policy?").await.unwrap();

        assert_eq!(answer.passages.len(), 1);
        assert!(answer.text.contains("Refunds within 30 days."));
        assert!(answer.text.contains("Question: What is the refund policy?"));
    }

    #[tokio::test]
    async fn pipeline_requests_default_top_k() {
        let retriever = Arc::new(FakeRetriever::new(vec![
            passage("a"),
            passage("b"),
            passage("c"),
            passage("d"),
        ]));
        let top_k_ref = Arc::clone(&retriever.last_top_k);

        let pipeline = RagPipeline::new(retriever, Arc::new(EchoGenerator));
        let answer = pipeline.answer("hello").await.unwrap();

        assert_eq!(*top_k_ref.lock().unwrap(), Some(DEFAULT_TOP_K));
        assert_eq!(answer.passages.len(), 3);
    }

    #[tokio::test]
    async fn pipeline_preserves_rank_order_in_answer() {
        let retriever = Arc::new(FakeRetriever::new(vec![passage("first"), passage("second")]));
        let pipeline = RagPipeline::new(retriever, Arc::new(EchoGenerator));

        let answer = pipeline.answer("q").await.unwrap();
        assert_eq!(answer.passages[0].text, "first");
        assert_eq!(answer.passages[1].text, "second");
        // Context block fed to the generator keeps the same order.
        assert!(answer.text.contains("first\n\nsecond"));
    }

    #[tokio::test]
    async fn pipeline_empty_retrieval_still_generates() {
        let retriever = Arc::new(FakeRetriever::new(vec![]));
        let pipeline = RagPipeline::new(retriever, Arc::new(EchoGenerator));

        let answer = pipeline.answer("hello").await.unwrap();
        assert!(answer.passages.is_empty());
        assert!(answer.text.contains("Question: hello"));
    }

    #[tokio::test]
    async fn pipeline_propagates_retrieval_errors() {
        let pipeline = RagPipeline::new(Arc::new(FailingRetriever), Arc::new(EchoGenerator));

        let err = pipeline.answer("hello").await.unwrap_err();
        match err {
            CoreError::Retrieval(msg) => assert!(msg.contains("index unreachable")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pipeline_propagates_generation_errors() {
        let retriever = Arc::new(FakeRetriever::new(vec![passage("a")]));
        let pipeline = RagPipeline::new(retriever, Arc::new(FailingGenerator));

        let err = pipeline.answer("hello").await.unwrap_err();
        assert!(matches!(err, CoreError::Generation(_)));
    }

    #[tokio::test]
    async fn pipeline_rejects_zero_top_k() {
        let retriever = Arc::new(FakeRetriever::new(vec![]));
        let pipeline = RagPipeline::new(retriever, Arc::new(EchoGenerator)).with_top_k(0);

        let err = pipeline.answer("hello").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
