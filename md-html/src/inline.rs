//! Inline tokenizer.
//!
//! Turns the raw text of one block into an ordered list of [`InlineSpan`]s.
//! Styling is recognised in a fixed order of passes; every pass only
//! re-splits spans that are still `Normal`, so styles never nest.

use crate::types::{InlineKind, InlineSpan};

/// Delimiter passes, applied in order before image and link extraction.
const DELIMITERS: [(&str, InlineKind); 4] = [
    ("**", InlineKind::Bold),
    ("*", InlineKind::Italic),
    ("`", InlineKind::Code),
    ("_", InlineKind::Italic),
];

/// Split `text` into styled spans.
///
/// Never fails: text with no recognised syntax comes back as a single
/// `Normal` span, and an unmatched delimiter is kept as literal text.
pub fn tokenize(text: &str) -> Vec<InlineSpan> {
    let mut spans = vec![InlineSpan::normal(text)];
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, kind);
    }
    let spans = split_images(spans);
    let spans = split_links(spans);
    log::trace!("tokenized {} bytes into {} spans", text.len(), spans.len());
    spans
}

/// Split every `Normal` span on `delimiter`, marking the enclosed pieces as
/// `kind`.
///
/// An even number of pieces means some marker has no partner; such a span is
/// left untouched. Empty pieces (adjacent or edge delimiters) are dropped.
pub fn split_delimiter(
    spans: Vec<InlineSpan>,
    delimiter: &str,
    kind: InlineKind,
) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_normal() || !span.text().contains(delimiter) {
            out.push(span);
            continue;
        }

        if span.text().split(delimiter).count() % 2 == 0 {
            log::trace!("unmatched {delimiter:?} in {:?}, kept literal", span.text());
            out.push(span);
            continue;
        }

        for (i, piece) in span.text().split(delimiter).enumerate() {
            if piece.is_empty() {
                continue;
            }
            if i % 2 == 1 {
                out.push(InlineSpan::styled(piece, kind));
            } else {
                out.push(InlineSpan::normal(piece));
            }
        }
    }

    out
}

/// Extract `![alt](url)` from every `Normal` span.
pub fn split_images(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_bracketed(spans, Syntax::Image)
}

/// Extract `[label](url)` from every `Normal` span. A bracket preceded by `!`
/// is image syntax and never matches here.
pub fn split_links(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_bracketed(spans, Syntax::Link)
}

/// All `(alt, url)` pairs of image syntax in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    extract(text, Syntax::Image)
}

/// All `(label, url)` pairs of link syntax in `text`, left to right.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    extract(text, Syntax::Link)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Image,
    Link,
}

/// One `[label](url)` occurrence, with byte offsets into the scanned text.
/// `start` includes the leading `!` of an image.
#[derive(Debug)]
struct Bracketed<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

fn extract(text: &str, syntax: Syntax) -> Vec<(&str, &str)> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(m) = find_bracketed(text, cursor, syntax) {
        found.push((m.label, m.url));
        cursor = m.end;
    }
    found
}

fn split_bracketed(spans: Vec<InlineSpan>, syntax: Syntax) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_normal() {
            out.push(span);
            continue;
        }

        let text = span.text();
        let mut cursor = 0;
        let mut matched = false;

        while let Some(m) = find_bracketed(text, cursor, syntax) {
            matched = true;
            if m.start > cursor {
                out.push(InlineSpan::normal(&text[cursor..m.start]));
            }
            out.push(match syntax {
                Syntax::Image => InlineSpan::image(m.label, m.url),
                Syntax::Link => InlineSpan::link(m.label, m.url),
            });
            cursor = m.end;
        }

        if !matched {
            out.push(span);
        } else if cursor < text.len() {
            out.push(InlineSpan::normal(&text[cursor..]));
        }
    }

    out
}

/// Find the first occurrence of `syntax` at or after byte offset `from`.
///
/// The label may not contain `[` or `]` and the URL may not contain `(` or
/// `)`; a candidate that breaks either rule is skipped and scanning resumes
/// at the next `[`.
fn find_bracketed(text: &str, from: usize, syntax: Syntax) -> Option<Bracketed<'_>> {
    let bytes = text.as_bytes();
    let mut pos = from;

    while let Some(offset) = text[pos..].find('[') {
        let open = pos + offset;
        pos = open + 1;

        let after_bang = open > from && bytes[open - 1] == b'!';
        let wanted = match syntax {
            Syntax::Image => after_bang,
            Syntax::Link => !(open > 0 && bytes[open - 1] == b'!'),
        };
        if !wanted {
            continue;
        }

        let Some((label, url, end)) = bracket_body(text, open) else {
            continue;
        };
        let start = match syntax {
            Syntax::Image => open - 1,
            Syntax::Link => open,
        };
        return Some(Bracketed {
            start,
            end,
            label,
            url,
        });
    }

    None
}

/// Parse `[label](url)` starting at the `[` at byte `open`. Returns the label,
/// the URL and the byte offset just past the closing `)`.
fn bracket_body(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();

    let label_start = open + 1;
    let close = label_start + text[label_start..].find(['[', ']'])?;
    if bytes[close] != b']' {
        return None;
    }
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }

    let url_start = close + 2;
    let paren = url_start + text[url_start..].find(['(', ')'])?;
    if bytes[paren] != b')' {
        return None;
    }

    Some((&text[label_start..close], &text[url_start..paren], paren + 1))
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styled(text: &str, kind: InlineKind) -> InlineSpan {
        InlineSpan::styled(text, kind)
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(
            tokenize("This is **bold** and *italic*"),
            vec![
                InlineSpan::normal("This is "),
                styled("bold", InlineKind::Bold),
                InlineSpan::normal(" and "),
                styled("italic", InlineKind::Italic),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(
            tokenize("Nothing special here."),
            vec![InlineSpan::normal("Nothing special here.")]
        );
    }

    #[test]
    fn empty_text_is_one_empty_span() {
        assert_eq!(tokenize(""), vec![InlineSpan::normal("")]);
    }

    #[test]
    fn code_and_underscore_italic() {
        assert_eq!(
            tokenize("Run `cargo doc` for _docs_"),
            vec![
                InlineSpan::normal("Run "),
                styled("cargo doc", InlineKind::Code),
                InlineSpan::normal(" for "),
                styled("docs", InlineKind::Italic),
            ]
        );
    }

    #[test]
    fn unmatched_delimiter_stays_literal() {
        assert_eq!(
            tokenize("2 * 3 = 6"),
            vec![InlineSpan::normal("2 * 3 = 6")]
        );
        assert_eq!(
            tokenize("a **b"),
            vec![InlineSpan::normal("a **b")]
        );
    }

    #[test]
    fn leading_and_trailing_delimiters_drop_empty_pieces() {
        assert_eq!(
            tokenize("**all bold**"),
            vec![styled("all bold", InlineKind::Bold)]
        );
    }

    #[test]
    fn styled_spans_are_not_resplit() {
        assert_eq!(
            tokenize("`a*b*c`"),
            vec![
                InlineSpan::normal("`a"),
                styled("b", InlineKind::Italic),
                InlineSpan::normal("c`"),
            ]
        );
        assert_eq!(
            tokenize("**x `y` z**"),
            vec![styled("x `y` z", InlineKind::Bold)]
        );
    }

    #[test]
    fn single_image_has_no_link() {
        assert_eq!(
            tokenize("![alt](http://x)"),
            vec![InlineSpan::image("alt", "http://x")]
        );
    }

    #[test]
    fn multiple_images() {
        assert_eq!(
            tokenize(
                "This is text with a ![rick roll](https://i.imgur.com/aKaOqIh.gif) and ![obi wan](https://i.imgur.com/fJRm4Vk.jpeg)"
            ),
            vec![
                InlineSpan::normal("This is text with a "),
                InlineSpan::image("rick roll", "https://i.imgur.com/aKaOqIh.gif"),
                InlineSpan::normal(" and "),
                InlineSpan::image("obi wan", "https://i.imgur.com/fJRm4Vk.jpeg"),
            ]
        );
    }

    #[test]
    fn links_with_trailing_text() {
        assert_eq!(
            tokenize("Go [to boot dev](https://www.boot.dev) or [to youtube](https://www.youtube.com) now"),
            vec![
                InlineSpan::normal("Go "),
                InlineSpan::link("to boot dev", "https://www.boot.dev"),
                InlineSpan::normal(" or "),
                InlineSpan::link("to youtube", "https://www.youtube.com"),
                InlineSpan::normal(" now"),
            ]
        );
    }

    #[test]
    fn repeated_identical_links_are_each_extracted() {
        assert_eq!(
            tokenize("[a](u) and [a](u)"),
            vec![
                InlineSpan::link("a", "u"),
                InlineSpan::normal(" and "),
                InlineSpan::link("a", "u"),
            ]
        );
    }

    #[test]
    fn image_and_link_together() {
        assert_eq!(
            tokenize("![pic](p.png) see [docs](d.html)"),
            vec![
                InlineSpan::image("pic", "p.png"),
                InlineSpan::normal(" see "),
                InlineSpan::link("docs", "d.html"),
            ]
        );
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(
            tokenize(
                "This is **text** with an *italic* word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)"
            ),
            vec![
                InlineSpan::normal("This is "),
                styled("text", InlineKind::Bold),
                InlineSpan::normal(" with an "),
                styled("italic", InlineKind::Italic),
                InlineSpan::normal(" word and a "),
                styled("code block", InlineKind::Code),
                InlineSpan::normal(" and an "),
                InlineSpan::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                InlineSpan::normal(" and a "),
                InlineSpan::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn broken_bracket_syntax_is_text() {
        assert_eq!(
            tokenize("[not a link] (nope) and [x](y"),
            vec![InlineSpan::normal("[not a link] (nope) and [x](y")]
        );
    }

    #[test]
    fn nested_bracket_restarts_at_inner_bracket() {
        assert_eq!(
            tokenize("[outer [inner](u)"),
            vec![
                InlineSpan::normal("[outer "),
                InlineSpan::link("inner", "u"),
            ]
        );
    }

    #[test]
    fn split_delimiter_skips_non_normal() {
        let spans = vec![
            styled("a`b`c", InlineKind::Bold),
            InlineSpan::normal("x `y` z"),
        ];
        assert_eq!(
            split_delimiter(spans, "`", InlineKind::Code),
            vec![
                styled("a`b`c", InlineKind::Bold),
                InlineSpan::normal("x "),
                styled("y", InlineKind::Code),
                InlineSpan::normal(" z"),
            ]
        );
    }

    #[test]
    fn extract_images_and_links() {
        let text = "![a](1.png) [b](2.html) ![c](3.png)";
        assert_eq!(extract_images(text), vec![("a", "1.png"), ("c", "3.png")]);
        assert_eq!(extract_links(text), vec![("b", "2.html")]);
    }

    #[test]
    fn non_ascii_text_around_links() {
        assert_eq!(
            tokenize("café [menü](ü.html) ✓"),
            vec![
                InlineSpan::normal("café "),
                InlineSpan::link("menü", "ü.html"),
                InlineSpan::normal(" ✓"),
            ]
        );
    }
}
