/// Structural errors that abort conversion of a whole document.
///
/// Unmatched inline delimiters are never reported here: the tokenizer keeps
/// such text literal instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Quote block line {line} does not start with '>': {text:?}")]
    MalformedQuote { line: usize, text: String },

    #[error("Unordered list line {line} does not start with '* ' or '- ': {text:?}")]
    MalformedUnorderedList { line: usize, text: String },

    #[error("Ordered list line {line} should start with '{expected}. ': {text:?}")]
    MalformedOrderedList {
        line: usize,
        expected: usize,
        text: String,
    },

    #[error("Heading block has no '#' marker followed by a space: {block:?}")]
    MalformedHeading { block: String },

    #[error("Code block is not enclosed in ``` fences: {block:?}")]
    MalformedCodeFence { block: String },

    #[error("Parent nodes must have a non-empty tag")]
    EmptyTag,
}

impl ConvertError {
    /// Line the error points at, when it concerns a single line.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::MalformedQuote { line, .. }
            | ConvertError::MalformedUnorderedList { line, .. }
            | ConvertError::MalformedOrderedList { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Move a block-relative line number `by` lines further down.
    pub(crate) fn shift_lines(self, by: usize) -> Self {
        match self {
            ConvertError::MalformedQuote { line, text } => ConvertError::MalformedQuote {
                line: line + by,
                text,
            },
            ConvertError::MalformedUnorderedList { line, text } => {
                ConvertError::MalformedUnorderedList {
                    line: line + by,
                    text,
                }
            }
            ConvertError::MalformedOrderedList {
                line,
                expected,
                text,
            } => ConvertError::MalformedOrderedList {
                line: line + by,
                expected,
                text,
            },
            other => other,
        }
    }
}
