#![cfg(target_arch = "wasm32")]

use serde::Deserialize;
use typographer_wasm::{render, resolve, typographize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TokenRecord {
    location: usize,
    kind: String,
    span_class: Option<String>,
    length_offset: i32,
}

#[wasm_bindgen_test]
fn resolve_returns_records() {
    let result = resolve("Wait... \"yes\"", JsValue::UNDEFINED).expect("resolve should succeed");
    let records: Vec<TokenRecord> =
        serde_wasm_bindgen::from_value(result).expect("deserialize records");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].kind, "ellipsis");
    assert_eq!(records[0].length_offset, -2);
    assert_eq!(records[1].location, 8);
    assert_eq!(records[1].span_class.as_deref(), Some("doubleQuote"));
}

#[wasm_bindgen_test]
fn null_config_uses_defaults() {
    let out = typographize("don't -- stop", JsValue::NULL).expect("typographize should succeed");
    assert_eq!(out, "don\u{2019}t \u{2013} stop");
}

#[wasm_bindgen_test]
fn render_wraps_paragraphs() {
    let html = render("a -- b", JsValue::UNDEFINED).expect("render should succeed");
    assert_eq!(html, "<p>a \u{2013} b</p>");
}
