//! Route-to-page rendering. Each render rebuilds the navbar and the page
//! root for the current route; pages attach their own event listeners, which
//! feed back into the dispatch loop.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::components::navbar;
use crate::dom_utils;
use crate::pages;
use crate::router::Route;
use crate::state::{AppState, APP_STATE};

/// Re-render for the current state. Called at the end of every dispatch.
pub fn refresh_current_view() -> Result<(), JsValue> {
    let Some(document) = dom_utils::document() else {
        return Ok(());
    };
    APP_STATE.with(|cell| {
        let state = cell.borrow();
        render_route(&state, &document)
    })
}

fn render_route(state: &AppState, document: &Document) -> Result<(), JsValue> {
    navbar::render(state, document)?;

    let root = dom_utils::ensure_container(document, "page-root")
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    root.set_class_name("page-root");

    // A dispatch can land mid-keystroke (an async completion re-rendering
    // the page), so carry in-progress form input across the rebuild.
    let typed = snapshot_inputs(&root);
    root.set_inner_html("");

    document.set_title(&format!("{} · Agent Console", title_for(state.route)));

    match state.route {
        Route::Home => pages::marketing::render_home(state, document, &root)?,
        Route::Pricing => pages::marketing::render_pricing(document, &root)?,
        Route::Contact => pages::marketing::render_contact(document, &root)?,
        Route::Login => pages::login::render(state, document, &root)?,
        Route::Register => pages::register::render(state, document, &root)?,
        Route::Dashboard => pages::dashboard::render(state, document, &root)?,
        Route::Agents => pages::agents::render(state, document, &root)?,
        Route::Workflows => pages::workflows::render(state, document, &root)?,
        Route::Monitoring => pages::monitoring::render(state, document, &root)?,
        Route::Settings => pages::settings::render(state, document, &root)?,
        Route::NotFound => pages::not_found::render(document, &root)?,
    }

    restore_inputs(document, &typed);
    Ok(())
}

/// Collect `(id, value)` for every non-empty input under `root`.
fn snapshot_inputs(root: &Element) -> Vec<(String, String)> {
    let mut typed = Vec::new();
    let Ok(nodes) = root.query_selector_all("input") else {
        return typed;
    };
    for index in 0..nodes.length() {
        let Some(input) = nodes
            .get(index)
            .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let id = input.id();
        let value = input.value();
        if !id.is_empty() && !value.is_empty() {
            typed.push((id, value));
        }
    }
    typed
}

/// Put saved values back into the freshly-built inputs. Only empty fields
/// are filled, so a page that renders its own value wins.
fn restore_inputs(document: &Document, typed: &[(String, String)]) {
    for (id, value) in typed {
        let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        if input.value().is_empty() {
            input.set_value(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn half_typed_input_survives_a_rebuild() {
        let document = dom_utils::document().unwrap();
        let root = dom_utils::ensure_container(&document, "page-root").unwrap();
        root.set_inner_html("");

        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_id("agent-name");
        input.set_value("half-typed na");
        root.append_child(&input).unwrap();

        let typed = snapshot_inputs(&root);
        root.set_inner_html("");

        // The page render recreates the field empty.
        let fresh: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        fresh.set_id("agent-name");
        root.append_child(&fresh).unwrap();
        restore_inputs(&document, &typed);

        assert_eq!(fresh.value(), "half-typed na");
        root.set_inner_html("");
    }

    #[wasm_bindgen_test]
    fn restore_never_overwrites_a_rendered_value() {
        let document = dom_utils::document().unwrap();
        let root = dom_utils::ensure_container(&document, "page-root").unwrap();
        root.set_inner_html("");

        let fresh: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        fresh.set_id("profile-email");
        fresh.set_value("rendered@example.com");
        root.append_child(&fresh).unwrap();

        restore_inputs(
            &document,
            &[("profile-email".to_string(), "stale@example.com".to_string())],
        );

        assert_eq!(fresh.value(), "rendered@example.com");
        root.set_inner_html("");
    }
}

fn title_for(route: Route) -> &'static str {
    match route {
        Route::Home => "Home",
        Route::Login => "Log in",
        Route::Register => "Sign up",
        Route::Pricing => "Pricing",
        Route::Contact => "Contact",
        Route::Dashboard => "Dashboard",
        Route::Agents => "Agents",
        Route::Workflows => "Workflows",
        Route::Monitoring => "Monitoring",
        Route::Settings => "Settings",
        Route::NotFound => "Not found",
    }
}
