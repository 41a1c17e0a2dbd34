//! Context formatting
//!
//! Joins retrieved passages into the single text block handed to the
//! prompt template.

use crate::rag::types::Passage;

/// Join passage texts in rank order, separated by one blank line.
///
/// An empty slice yields an empty string; zero retrieved passages is not
/// an error at this layer.
pub fn format_context(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str) -> Passage {
        Passage::new(text, "doc.md", 1, 0)
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn single_passage_is_its_own_text() {
        let passages = vec![passage("Refunds within 30 days.")];
        assert_eq!(format_context(&passages), "Refunds within 30 days.");
    }

    #[test]
    fn passages_joined_by_blank_line_in_order() {
        let passages = vec![passage("first"), passage("second"), passage("third")];
        assert_eq!(format_context(&passages), "first\n\nsecond\n\nthird");
    }

    #[test]
    fn passages_are_not_deduplicated() {
        let passages = vec![passage("same"), passage("same")];
        assert_eq!(format_context(&passages), "same\n\nsame");
    }
}
