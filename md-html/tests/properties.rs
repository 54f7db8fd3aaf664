//! Property-based tests using proptest.
//!
//! These check that conversion never panics on arbitrary input and that the
//! tokenizer and segmenter behave predictably on plain text.

use md_html::{InlineSpan, classify, segment, tokenize};
use proptest::prelude::*;

proptest! {
    /// Any random string either converts or reports a structural error, but
    /// never panics.
    #[test]
    fn any_markdown_no_panic(input in "\\PC{0,500}") {
        match md_html::build(&input) {
            Ok(root) => {
                let _ = root.render();
            }
            Err(_e) => {
                // Structural errors are acceptable for random input
            }
        }
    }

    /// Text without any inline syntax comes back as one Normal span.
    #[test]
    fn plain_text_is_single_span(text in "[A-Za-z0-9 .,;:?'-]{0,80}") {
        prop_assert_eq!(tokenize(&text), vec![InlineSpan::normal(text.clone())]);
    }

    /// A balanced pair of delimiters around a word always yields that word
    /// in the matching style.
    #[test]
    fn balanced_bold_is_recognised(
        before in "[A-Za-z ]{0,20}",
        word in "[A-Za-z]{1,20}",
        after in "[A-Za-z ]{0,20}",
    ) {
        let spans = tokenize(&format!("{before}**{word}**{after}"));
        prop_assert!(spans.contains(&InlineSpan::bold(word.clone())));
    }

    /// Joining blocks with a blank line and segmenting again gives the same
    /// blocks back.
    #[test]
    fn resegmentation_is_stable(input in "[a-z #>*\\-\n]{0,200}") {
        let blocks = segment(&input);
        let joined = blocks.join("\n\n");
        prop_assert_eq!(segment(&joined), blocks);
    }

    /// Classifying the same block twice gives the same answer.
    #[test]
    fn classify_is_deterministic(block in "[a-z0-9 #>*\\-.`]{1,80}") {
        let block = block.trim();
        prop_assume!(!block.is_empty());
        prop_assert_eq!(classify(block), classify(block));
    }
}
