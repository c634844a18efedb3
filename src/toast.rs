//! Toast notifications. A `#toast-root` container is created once per page;
//! toasts are prepended there and removed again after a few seconds.

use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn show(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(root) = ensure_root(&document) else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        return;
    };

    toast.set_class_name(match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    });
    toast.set_text_content(Some(message));

    // Newest on top.
    let _ = root.prepend_with_node_1(&toast);

    let handle = toast.clone();
    Timeout::new(DISMISS_AFTER_MS, move || {
        if let Some(parent) = handle.parent_node() {
            let _ = parent.remove_child(&handle);
        }
    })
    .forget();

    ensure_styles(&document);
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id("toast-styles").is_some() {
        return;
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
@keyframes toast-in{to{opacity:1}}
";

    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    if let Some(head) = document.head() {
        let _ = head.append_child(&style);
    }
}
