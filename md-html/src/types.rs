use std::fmt;

use serde::Serialize;

/// Style of one run of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineKind {
    Normal,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl InlineKind {
    /// Whether spans of this kind carry a URL.
    pub fn has_url(self) -> bool {
        matches!(self, InlineKind::Link | InlineKind::Image)
    }
}

/// One contiguous run of inline text tagged with its style.
///
/// `url` is present exactly when the kind is `Link` or `Image`. For an image
/// `text` holds the alt text, for a link the label. The constructors are the
/// only way to build a span, so the pairing cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    text: String,
    kind: InlineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl InlineSpan {
    pub fn normal(text: impl Into<String>) -> Self {
        Self::styled(text, InlineKind::Normal)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, InlineKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, InlineKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(text, InlineKind::Code)
    }

    /// A span of a URL-less kind. Callers only pass delimiter kinds.
    pub(crate) fn styled(text: impl Into<String>, kind: InlineKind) -> Self {
        debug_assert!(!kind.has_url(), "{kind:?} spans need a url");
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            kind: InlineKind::Link,
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: InlineKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> InlineKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_normal(&self) -> bool {
        self.kind == InlineKind::Normal
    }
}

/// Structural type of a blank-line-delimited block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Paragraph,
    Heading,
    Quote,
    Code,
    Unordered,
    Ordered,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Unordered => "unordered",
            BlockType::Ordered => "ordered",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
