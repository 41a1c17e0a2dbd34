//! Chat turn engine
//!
//! Wires one user input through the full flow: session append -> RAG
//! pipeline -> source citation -> typing presentation -> session append.
//! One turn at a time; the session log is only ever touched by the turn
//! currently executing.

use crate::attribution::attach_citation;
use crate::chat::session::{ChatTurn, SessionLog};
use crate::chat::typing::{TypingPresenter, TypingSurface};
use crate::error::CoreResult;
use crate::rag::pipeline::RagPipeline;

/// Turn-based chat engine over a RAG pipeline and a typing presenter.
pub struct ChatEngine {
    pipeline: RagPipeline,
    presenter: TypingPresenter,
}

impl ChatEngine {
    pub fn new(pipeline: RagPipeline) -> Self {
        Self {
            pipeline,
            presenter: TypingPresenter::new(),
        }
    }

    pub fn with_presenter(mut self, presenter: TypingPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    /// Process one user input and return the assistant content appended to
    /// the log.
    ///
    /// The assistant turn stores the presenter's final buffer, i.e. exactly
    /// what the user saw. On failure the error propagates to the host; the
    /// log then ends with the user turn and prior turns are unaffected.
    pub async fn handle_turn<S: TypingSurface + Send>(
        &self,
        session: &mut SessionLog,
        surface: &mut S,
        input: &str,
    ) -> CoreResult<String> {
        session.append(ChatTurn::user(input));

        let answer = self.pipeline.answer(input).await?;
        let cited = attach_citation(&answer.text, &answer.passages);
        let rendered = self.presenter.present(surface, &cited).await;

        session.append(ChatTurn::assistant(rendered.clone()));
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::session::Role;
    use crate::chat::typing::{CURSOR_MARKER, final_form};
    use crate::error::CoreError;
    use crate::llm::Generator;
    use crate::rag::pipeline::Retriever;
    use crate::rag::types::Passage;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedRetriever(Vec<Passage>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str, top_k: usize) -> CoreResult<Vec<Passage>> {
            Ok(self.0.iter().take(top_k).cloned().collect())
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl Generator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> CoreResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> CoreResult<String> {
            Err(CoreError::Generation("boom".to_string()))
        }
    }

    #[derive(Default)]
    struct NullSurface {
        frames: usize,
        final_text: Option<String>,
    }

    impl TypingSurface for NullSurface {
        fn render(&mut self, _frame: &str) {
            self.frames += 1;
        }

        fn finish(&mut self, text: &str) {
            self.final_text = Some(text.to_string());
        }
    }

    fn engine(retriever: Vec<Passage>, generator: impl Generator + 'static) -> ChatEngine {
        let pipeline = RagPipeline::new(Arc::new(FixedRetriever(retriever)), Arc::new(generator));
        ChatEngine::new(pipeline)
            .with_presenter(TypingPresenter::with_delay(Duration::ZERO))
    }

    #[tokio::test]
    async fn turn_appends_user_then_assistant() {
        let engine = engine(
            vec![Passage::new("Refunds within 30 days.", "policy/docs/refunds.md", 2, 500)],
            FixedGenerator("Refunds are honored for 30 days."),
        );
        let mut session = SessionLog::new();
        let mut surface = NullSurface::default();

        let rendered = engine
            .handle_turn(&mut session, &mut surface, "What is the refund policy?")
            .await
            .unwrap();

        assert_eq!(session.len(), 2);
        let turns: Vec<_> = session.turns().collect();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "What is the refund policy?");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, rendered);
    }

    #[tokio::test]
    async fn assistant_turn_carries_citation_of_top_passage() {
        let engine = engine(
            vec![
                Passage::new("Refunds within 30 days.", "policy/docs/refunds.md", 2, 500),
                Passage::new("Shipping takes a week.", "policy/docs/shipping.md", 1, 0),
            ],
            FixedGenerator("Refunds are honored for 30 days."),
        );
        let mut session = SessionLog::new();
        let mut surface = NullSurface::default();

        let rendered = engine
            .handle_turn(&mut session, &mut surface, "What is the refund policy?")
            .await
            .unwrap();

        let expected = final_form(
            "Refunds are honored for 30 days.\n\n\
             Source: [refunds.md](policy/docs/refunds.md)\n\
             Page: 2, span: 500--523",
        );
        assert_eq!(rendered, expected);
        assert!(!rendered.contains("shipping.md"));
        assert!(!rendered.contains(CURSOR_MARKER));
    }

    #[tokio::test]
    async fn empty_retrieval_turn_succeeds_without_citation() {
        let engine = engine(vec![], FixedGenerator("From general knowledge."));
        let mut session = SessionLog::new();
        let mut surface = NullSurface::default();

        let rendered = engine
            .handle_turn(&mut session, &mut surface, "anything")
            .await
            .unwrap();

        assert_eq!(rendered, final_form("From general knowledge."));
        assert!(!rendered.contains("Source:"));
    }

    #[tokio::test]
    async fn failed_turn_leaves_only_user_entry() {
        let engine = engine(
            vec![Passage::new("x", "doc.md", 1, 0)],
            FailingGenerator,
        );
        let mut session = SessionLog::new();
        session.append(ChatTurn::assistant("earlier greeting"));
        let mut surface = NullSurface::default();

        let err = engine
            .handle_turn(&mut session, &mut surface, "q")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Generation(_)));
        // Prior turns untouched, current turn produced no assistant message.
        assert_eq!(session.len(), 2);
        assert_eq!(session.last().unwrap().role, Role::User);
        assert!(surface.final_text.is_none());
    }
}
