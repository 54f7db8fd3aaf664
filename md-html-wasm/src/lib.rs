//! WASM bindings for `md-html`.
//!
//! Exposes the converter to JavaScript via wasm-bindgen. Structural errors
//! come back as rejected values carrying the error message.

use wasm_bindgen::prelude::*;

/// Convert a Markdown document into an HTML fragment wrapped in a `div`.
#[wasm_bindgen]
pub fn render_html(input: &str) -> Result<String, JsValue> {
    md_html::markdown_to_html(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tokenize one run of inline text.
///
/// Returns an array of `{ text, kind, url? }` objects.
#[wasm_bindgen]
pub fn tokenize(text: &str) -> Result<JsValue, JsValue> {
    let spans = md_html::tokenize(text);
    serde_wasm_bindgen::to_value(&spans).map_err(JsValue::from)
}

/// Classify one block and return its type name (`"paragraph"`, `"heading"`,
/// `"quote"`, `"code"`, `"unordered"` or `"ordered"`).
#[wasm_bindgen]
pub fn classify(block: &str) -> Result<String, JsValue> {
    md_html::classify(block.trim())
        .map(|kind| kind.as_str().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
