//! Thin helpers for repetitive DOM operations, so pages don't sprinkle
//! `get_element_by_id` + `dyn_into` chains everywhere.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Value of an `<input>` by id, empty string when missing.
pub fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Fetch or create a `<div id=..>` directly under `<body>`. Pages use this
/// for their mount points so re-renders reuse the same container.
pub fn ensure_container(document: &Document, id: &str) -> Option<Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Some(el);
    }
    let el = document.create_element("div").ok()?;
    el.set_id(id);
    document.body()?.append_child(&el).ok()?;
    Some(el)
}
