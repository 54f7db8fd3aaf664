//! Document assembly: the single entry point tying the stages together.

use crate::blocks::parse_blocks;
use crate::convert::{ConvertOptions, convert_with};
use crate::error::ConvertError;
use crate::node::{HtmlNode, ParentNode};

/// Convert a whole Markdown document into a root `div` node with default
/// options.
pub fn build(document: &str) -> Result<ParentNode, ConvertError> {
    build_with(document, &ConvertOptions::default())
}

/// Segment, classify and convert every block, in order, under one `div`.
///
/// The first structural error aborts the whole document; no partial tree is
/// returned.
pub fn build_with(document: &str, options: &ConvertOptions) -> Result<ParentNode, ConvertError> {
    let normalised = document.replace("\r\n", "\n");
    let blocks = parse_blocks(&normalised)?;
    log::debug!("assembling {} blocks", blocks.len());

    let children = blocks
        .iter()
        .map(|block| convert_with(block.text, block.kind, options).map(HtmlNode::from))
        .collect::<Result<Vec<_>, _>>()?;

    ParentNode::new("div", children)
}

/// Render a Markdown document straight to an HTML string.
pub fn markdown_to_html(document: &str) -> Result<String, ConvertError> {
    Ok(build(document)?.render())
}
