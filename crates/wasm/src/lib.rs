use serde::Serialize;
use typographer_core::{Config, Token, resolve_typography};
use typographer_render::{RenderOptions, render_markdown};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

fn parse_config(config: JsValue) -> Config {
    if config.is_undefined() || config.is_null() {
        return Config::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

/// A resolved token as handed to JavaScript. Offsets are UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// Start of the source pattern.
    pub location: usize,
    /// Source pattern length.
    pub length: usize,
    /// Text that replaces the pattern.
    pub replacement: String,
    /// Token kind name.
    pub kind: &'static str,
    /// A wrapper opens before this token.
    pub span_start: bool,
    /// The innermost wrapper closes after this token.
    pub span_end: bool,
    /// Class of the wrapper opened here.
    pub span_class: Option<&'static str>,
    /// Class wrapping the glyph itself.
    pub span_class_for_char: Option<&'static str>,
    /// Index of the paired opener.
    pub opener: Option<usize>,
    /// Index of the paired closer.
    pub closer: Option<usize>,
    /// Characters added (or removed, when negative) by the replacement.
    pub length_offset: isize,
}

impl TokenRecord {
    fn from_token(token: &Token, text: &str) -> Self {
        Self {
            location: token.utf16_location(text),
            length: token.length,
            replacement: token.replacement.clone(),
            kind: token.kind.name(),
            span_start: token.style.span_start.is_some(),
            span_end: token.style.span_end,
            span_class: token.style.span_start.map(|class| class.as_str()),
            span_class_for_char: token.style.glyph.map(|class| class.as_str()),
            opener: token.opener(),
            closer: token.closer(),
            length_offset: token.length_offset(),
        }
    }
}

/// Resolves `text` into JavaScript-facing token records.
pub fn token_records(text: &str, config: &Config) -> Result<Vec<TokenRecord>, typographer_core::Error> {
    let tokens = resolve_typography(text, config)?;
    Ok(tokens.iter().map(|token| TokenRecord::from_token(token, text)).collect())
}

/// Resolves the replacement tokens for one block of plain text.
#[wasm_bindgen]
pub fn resolve(text: &str, config: JsValue) -> Result<JsValue, JsError> {
    let config = parse_config(config);
    let records = token_records(text, &config).map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&records)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Applies the replacements to plain text, without styling.
#[wasm_bindgen]
pub fn typographize(text: &str, config: JsValue) -> Result<String, JsError> {
    let config = parse_config(config);
    typographer_core::typographize(text, &config).map_err(|e| JsError::new(&e.to_string()))
}

/// Renders markdown to HTML with typographic punctuation.
#[wasm_bindgen]
pub fn render(markdown: &str, config: JsValue) -> Result<String, JsError> {
    let options = RenderOptions::with_config(parse_config(config));
    let rendered = render_markdown(markdown, &options).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(rendered.html)
}
