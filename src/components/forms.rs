//! Shared form building blocks: labelled inputs with an error slot under
//! each, so pages render validation results inline instead of alerting.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils;

/// A labelled `<input>` with an error line underneath. The error element id
/// is always `{input_id}-error` so [`set_field_error`] can find it later.
pub fn text_field(
    document: &Document,
    input_id: &str,
    label: &str,
    input_type: &str,
    error: Option<&String>,
) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("form-field");

    let lbl = document.create_element("label")?;
    lbl.set_attribute("for", input_id)?;
    lbl.set_text_content(Some(label));
    wrap.append_child(&lbl)?;

    let input = document.create_element("input")?;
    input.set_id(input_id);
    input.set_class_name("form-input");
    input.set_attribute("type", input_type)?;
    wrap.append_child(&input)?;

    let err = document.create_element("div")?;
    err.set_id(&format!("{}-error", input_id));
    err.set_class_name("field-error");
    if let Some(message) = error {
        err.set_text_content(Some(message));
    }
    wrap.append_child(&err)?;

    Ok(wrap)
}

/// Write (or clear) the error line under an input created by [`text_field`].
pub fn set_field_error(document: &Document, input_id: &str, message: Option<&str>) {
    dom_utils::set_text(
        document,
        &format!("{}-error", input_id),
        message.unwrap_or(""),
    );
}

/// Form-level banner (non-field errors from the backend).
pub fn banner(document: &Document, message: &str) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name("form-banner");
    el.set_text_content(Some(message));
    Ok(el)
}
