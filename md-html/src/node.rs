//! Minimal HTML node model.
//!
//! Two node kinds share one render contract: a [`LeafNode`] holds literal
//! text and no children, a [`ParentNode`] holds an ordered list of children
//! and no text of its own.

use crate::error::ConvertError;
use crate::types::{InlineKind, InlineSpan};

/// Ordered HTML attribute list.
///
/// Attributes render in insertion order. Inserting a name that is already
/// present replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Render as ` key="value" key2="value2"`, or an empty string when there
    /// are no attributes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&quote_attr(value));
            out.push('"');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Keep a double quote inside a value from closing the attribute.
fn quote_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Any node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    pub fn render(&self) -> String {
        match self {
            HtmlNode::Leaf(leaf) => leaf.render(),
            HtmlNode::Parent(parent) => parent.render(),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

/// A node with text content and no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    value: String,
    attributes: Attributes,
}

impl LeafNode {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Raw text, emitted without any surrounding tag.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn render(&self) -> String {
        match &self.tag {
            None => self.value.clone(),
            Some(tag) => format!(
                "<{tag}{attrs}>{value}</{tag}>",
                attrs = self.attributes.render(),
                value = self.value,
            ),
        }
    }
}

impl From<InlineSpan> for LeafNode {
    fn from(span: InlineSpan) -> Self {
        let url = span.url().unwrap_or_default().to_string();
        match span.kind() {
            InlineKind::Normal => LeafNode::text(span.text()),
            InlineKind::Bold => LeafNode::new("b", span.text()),
            InlineKind::Italic => LeafNode::new("i", span.text()),
            InlineKind::Code => LeafNode::new("code", span.text()),
            InlineKind::Link => LeafNode::new("a", span.text()).with_attributes(
                Attributes::new()
                    .with("href", url)
                    .with("target", "_blank"),
            ),
            InlineKind::Image => LeafNode::new("img", "").with_attributes(
                Attributes::new()
                    .with("src", url)
                    .with("alt", span.text()),
            ),
        }
    }
}

/// A node wrapping an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    tag: String,
    children: Vec<HtmlNode>,
    attributes: Attributes,
}

impl ParentNode {
    /// Build a parent node. An empty `tag` is rejected with
    /// [`ConvertError::EmptyTag`].
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Result<Self, ConvertError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(ConvertError::EmptyTag);
        }
        Ok(Self {
            tag,
            children,
            attributes: Attributes::new(),
        })
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn render(&self) -> String {
        let mut out = format!("<{}{}>", self.tag, self.attributes.render());
        for child in &self.children {
            out.push_str(&child.render());
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
