//! Prompt template
//!
//! The single recognized prompt for the answer pipeline. The template is a
//! fixed configuration value with exactly two slots, `{context}` and
//! `{question}`; there is no runtime template registry and no other
//! parameterization.

/// The fixed answer template.
///
/// Carries the standing instruction that lets the model fall back on its
/// own knowledge when retrieval produced nothing relevant (including the
/// empty-retrieval case, where `{context}` renders as an empty block).
pub const ANSWER_TEMPLATE: &str = "\
Answer the question based on the following context.

{context}

Question: {question}

If there is no information in the context, think rationally and provide an answer based on your own knowledge.
";

/// Renders [`ANSWER_TEMPLATE`] with a context block and a question.
#[derive(Debug, Clone, Default)]
pub struct PromptTemplate;

impl PromptTemplate {
    /// Substitute `context` and `question` into the template.
    ///
    /// Pure: identical inputs always produce the identical prompt string,
    /// and both inputs appear verbatim in the output.
    pub fn render(&self, context: &str, question: &str) -> String {
        ANSWER_TEMPLATE
            .replacen("{context}", context, 1)
            .replacen("{question}", question, 1)
    }
}
