//! Source attribution
//!
//! Builds the human-readable citation appended to every answer: the source
//! document's basename as a markdown link, its page, and the character span
//! the passage occupies within the document.

use crate::rag::types::Passage;

/// Append a citation for the first-ranked passage to the answer text.
///
/// The passage slice must come from the same retrieval call that produced
/// `answer`, so that citation and generation context stay consistent. Only
/// `passages[0]` is cited. With an empty slice there is nothing to cite and
/// the answer is returned unchanged rather than failing the turn.
pub fn attach_citation(answer: &str, passages: &[Passage]) -> String {
    let Some(top) = passages.first() else {
        return answer.to_string();
    };

    let (start, end) = top.span();
    format!(
        "{answer}\n\nSource: [{name}]({path})\nPage: {page}, span: {start}--{end}",
        name = top.display_name(),
        path = top.source,
        page = top.page,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_uses_first_ranked_passage() {
        let passages = vec![
            Passage::new("Refunds within 30 days.", "policy/docs/refunds.md", 2, 500),
            Passage::new("Unrelated.", "other.md", 9, 10),
        ];

        let cited = attach_citation("Refunds are honored for 30 days.", &passages);
        assert_eq!(
            cited,
            "Refunds are honored for 30 days.\n\n\
             Source: [refunds.md](policy/docs/refunds.md)\n\
             Page: 2, span: 500--523"
        );
    }

    #[test]
    fn span_end_is_start_plus_text_length() {
        let passages = vec![Passage::new("a".repeat(340), "doc.md", 1, 120)];
        let cited = attach_citation("answer", &passages);
        assert!(cited.contains("span: 120--460"));
    }

    #[test]
    fn empty_retrieval_returns_answer_unchanged() {
        let cited = attach_citation("General knowledge answer.", &[]);
        assert_eq!(cited, "General knowledge answer.");
    }
}
