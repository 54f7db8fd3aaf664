//! Block-to-node conversion.
//!
//! Every [`BlockType`] maps to exactly one handler; the table is an
//! exhaustive `match`, so a new block type cannot be left unhandled.

use crate::blocks::{
    heading_level, is_fenced, strip_ordered_marker, strip_quote_marker, strip_unordered_marker,
};
use crate::error::ConvertError;
use crate::inline::tokenize;
use crate::node::{Attributes, HtmlNode, LeafNode, ParentNode};
use crate::types::BlockType;

/// Knobs for block conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emit code block contents as one raw text leaf instead of running them
    /// through the inline tokenizer.
    pub opaque_code: bool,
    /// Treat a single word on the opening fence line as an info string and
    /// emit it as `class="language-<word>"` instead of as code.
    pub language_class: bool,
}

type Handler = fn(&str, &ConvertOptions) -> Result<ParentNode, ConvertError>;

fn handler(kind: BlockType) -> Handler {
    match kind {
        BlockType::Paragraph => paragraph_to_node,
        BlockType::Heading => heading_to_node,
        BlockType::Quote => quote_to_node,
        BlockType::Code => code_to_node,
        BlockType::Unordered => unordered_to_node,
        BlockType::Ordered => ordered_to_node,
    }
}

/// Convert one classified block with default options.
pub fn convert(block: &str, kind: BlockType) -> Result<ParentNode, ConvertError> {
    convert_with(block, kind, &ConvertOptions::default())
}

pub fn convert_with(
    block: &str,
    kind: BlockType,
    options: &ConvertOptions,
) -> Result<ParentNode, ConvertError> {
    handler(kind)(block, options)
}

/// Tokenize `text` and turn every span into a leaf node.
pub fn inline_children(text: &str) -> Vec<HtmlNode> {
    tokenize(text)
        .into_iter()
        .map(|span| HtmlNode::Leaf(span.into()))
        .collect()
}

fn paragraph_to_node(block: &str, _: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    ParentNode::new("p", inline_children(block))
}

fn heading_to_node(block: &str, _: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let level = heading_level(block).ok_or_else(|| ConvertError::MalformedHeading {
        block: block.to_string(),
    })?;
    // marker run plus the single space after it
    let text = block[level + 1..].trim();
    ParentNode::new(format!("h{level}"), inline_children(text))
}

fn quote_to_node(block: &str, _: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let lines = block
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            strip_quote_marker(line)
                .map(|rest| strip_indent(rest, 4))
                .ok_or_else(|| ConvertError::MalformedQuote {
                    line: idx + 1,
                    text: line.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ParentNode::new("blockquote", inline_children(&lines.join("\n")))
}

fn code_to_node(block: &str, options: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let inner = block
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .filter(|_| is_fenced(block))
        .ok_or_else(|| ConvertError::MalformedCodeFence {
            block: block.to_string(),
        })?;

    let (info, body) = if options.language_class {
        split_info_string(inner)
    } else {
        (None, inner.strip_prefix('\n').unwrap_or(inner))
    };
    let body = body.strip_suffix('\n').unwrap_or(body);

    let children = if options.opaque_code {
        vec![HtmlNode::Leaf(LeafNode::text(body))]
    } else {
        inline_children(body)
    };

    let node = ParentNode::new("code", children)?;
    Ok(match info {
        Some(lang) => {
            node.with_attributes(Attributes::new().with("class", format!("language-{lang}")))
        }
        None => node,
    })
}

/// Separate an info string such as `rust` on the opening fence line from the
/// code that follows. Only a single word counts as an info string; anything
/// else on that line is code.
fn split_info_string(inner: &str) -> (Option<&str>, &str) {
    match inner.split_once('\n') {
        Some((first, rest)) => {
            let word = first.trim();
            if word.is_empty() {
                (None, rest)
            } else if word.contains(char::is_whitespace) {
                (None, inner)
            } else {
                (Some(word), rest)
            }
        }
        None => (None, inner),
    }
}

fn unordered_to_node(block: &str, _: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let items = block
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            strip_unordered_marker(line).ok_or_else(|| ConvertError::MalformedUnorderedList {
                line: idx + 1,
                text: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    list_to_node("ul", &items)
}

fn ordered_to_node(block: &str, _: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let items = block
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            strip_ordered_marker(line, idx + 1).ok_or_else(|| {
                ConvertError::MalformedOrderedList {
                    line: idx + 1,
                    expected: idx + 1,
                    text: line.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    list_to_node("ol", &items)
}

fn list_to_node(tag: &str, items: &[&str]) -> Result<ParentNode, ConvertError> {
    let children = items
        .iter()
        .map(|item| ParentNode::new("li", inline_children(item)).map(HtmlNode::from))
        .collect::<Result<Vec<_>, _>>()?;
    ParentNode::new(tag, children)
}

/// Drop at most `max` leading spaces or tabs.
fn strip_indent(text: &str, max: usize) -> &str {
    let skip = text
        .bytes()
        .take(max)
        .take_while(|b| matches!(b, b' ' | b'\t'))
        .count();
    &text[skip..]
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
