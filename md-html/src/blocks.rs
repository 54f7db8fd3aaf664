//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines; every block is then assigned
//! exactly one [`BlockType`]. Quote and list blocks are validated line by
//! line: once the first line commits a block to one of those types, every
//! other line has to follow the same rule or classification fails.

use crate::error::ConvertError;
use crate::types::BlockType;

/// One classified block of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Trimmed block text.
    pub text: &'a str,
    pub kind: BlockType,
    /// 1-based line of the document on which the block starts.
    pub line: usize,
}

/// Split a document into trimmed, non-empty blocks.
///
/// A line holding nothing but spaces, tabs or a `\r` ends the current block,
/// so CRLF documents split the same way as LF ones.
pub fn segment(document: &str) -> Vec<&str> {
    segment_lines(document)
        .into_iter()
        .map(|(_, text)| text)
        .collect()
}

/// Segment and classify a document in one pass.
///
/// Errors report line numbers relative to the whole document.
pub fn parse_blocks(document: &str) -> Result<Vec<Block<'_>>, ConvertError> {
    segment_lines(document)
        .into_iter()
        .map(|(line, text)| {
            classify(text)
                .map(|kind| Block { text, kind, line })
                .map_err(|e| e.shift_lines(line - 1))
        })
        .collect()
}

/// Like [`segment`], also returning the 1-based document line each block
/// starts on.
fn segment_lines(document: &str) -> Vec<(usize, &str)> {
    let leading = document.len() - document.trim_start().len();
    let first_line = 1 + document[..leading].matches('\n').count();
    let doc = document.trim();

    let mut blocks = Vec::new();
    let mut start = 0;
    let mut start_line = first_line;
    let mut offset = 0;

    for (idx, line) in doc.split_inclusive('\n').enumerate() {
        let content = line.trim_end_matches('\n');
        if content.trim_matches([' ', '\t', '\r']).is_empty() {
            push_block(&mut blocks, &doc[start..offset], start_line);
            start = offset + line.len();
            start_line = first_line + idx + 1;
        }
        offset += line.len();
    }
    push_block(&mut blocks, &doc[start..], start_line);

    blocks
}

fn push_block<'a>(blocks: &mut Vec<(usize, &'a str)>, piece: &'a str, line: usize) {
    let skipped = piece.len() - piece.trim_start().len();
    let line = line + piece[..skipped].matches('\n').count();
    let piece = piece.trim();
    if !piece.is_empty() {
        blocks.push((line, piece));
    }
}

/// Assign a structural type to one trimmed block.
///
/// Rules are tried in order: heading, code fence, quote, unordered list,
/// ordered list; anything else is a paragraph.
pub fn classify(block: &str) -> Result<BlockType, ConvertError> {
    let first = block.lines().next().unwrap_or_default();

    let kind = if heading_level(first).is_some() {
        BlockType::Heading
    } else if is_fenced(block) {
        BlockType::Code
    } else if first.starts_with('>') {
        for (idx, line) in block.lines().enumerate() {
            if strip_quote_marker(line).is_none() {
                return Err(ConvertError::MalformedQuote {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
        BlockType::Quote
    } else if strip_unordered_marker(first).is_some() {
        for (idx, line) in block.lines().enumerate() {
            if strip_unordered_marker(line).is_none() {
                return Err(ConvertError::MalformedUnorderedList {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
        BlockType::Unordered
    } else if strip_ordered_marker(first, 1).is_some() {
        for (idx, line) in block.lines().enumerate() {
            let expected = idx + 1;
            if strip_ordered_marker(line, expected).is_none() {
                return Err(ConvertError::MalformedOrderedList {
                    line: idx + 1,
                    expected,
                    text: line.to_string(),
                });
            }
        }
        BlockType::Ordered
    } else {
        BlockType::Paragraph
    };

    log::debug!("classified {} block: {:?}", kind, first);
    Ok(kind)
}

/// Heading level of a line starting with 1 to 6 `#` followed by a space.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Opening and closing ``` fences; a lone fence does not count.
pub(crate) fn is_fenced(block: &str) -> bool {
    block.len() >= 6 && block.starts_with("```") && block.ends_with("```")
}

/// Text after the `>` of a quote line, or `None` if the marker is missing.
pub(crate) fn strip_quote_marker(line: &str) -> Option<&str> {
    line.trim().strip_prefix('>')
}

/// Item text after a `* ` or `- ` marker.
pub(crate) fn strip_unordered_marker(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .map(str::trim)
}

/// Item text after the `N. ` marker, where `N` must equal `number`.
pub(crate) fn strip_ordered_marker(line: &str, number: usize) -> Option<&str> {
    let rest = line.trim().strip_prefix(number.to_string().as_str())?;
    rest.strip_prefix(". ").map(str::trim)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
