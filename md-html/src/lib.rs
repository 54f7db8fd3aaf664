//! `md-html` converts Markdown into a tree of HTML nodes and renders it.
//!
//! The pipeline has four stages: the document is segmented into blocks at
//! blank lines, each block is classified (paragraph, heading, quote, code,
//! unordered or ordered list), each classified block is converted into a
//! parent node whose leaves come from the inline tokenizer, and all block
//! nodes are wrapped in a root `div`.
//!
//! # Quick start
//!
//! ```
//! let html = md_html::markdown_to_html("# Title\n\nSome *text*.").unwrap();
//! assert_eq!(html, "<div><h1>Title</h1><p>Some <i>text</i>.</p></div>");
//! ```
//!
//! Only a small Markdown subset is supported: no nested emphasis, tables,
//! footnotes or reference links, and text content is not HTML-escaped.

pub mod blocks;
pub mod convert;
pub mod document;
pub mod error;
pub mod inline;
pub mod node;
pub mod types;

pub use blocks::{Block, classify, parse_blocks, segment};
pub use convert::{ConvertOptions, convert, convert_with};
pub use document::{build, build_with, markdown_to_html};
pub use error::ConvertError;
pub use inline::tokenize;
pub use node::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use types::{BlockType, InlineKind, InlineSpan};
