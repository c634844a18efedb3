//! Top navigation bar. Rebuilt on every render so the link set always
//! matches the session state.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::router::Route;
use crate::state::{dispatch_global_message, AppState};

pub fn render(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let navbar = dom_utils::ensure_container(document, "navbar-root")
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    navbar.set_class_name("navbar");
    navbar.set_inner_html("");

    let brand = nav_link(document, "Agent Console", Route::Home)?;
    brand.set_class_name("navbar-brand");
    navbar.append_child(&brand)?;

    let links = document.create_element("div")?;
    links.set_class_name("navbar-links");

    let entries: &[(&str, Route)] = if state.session.authenticated {
        &[
            ("Dashboard", Route::Dashboard),
            ("Agents", Route::Agents),
            ("Workflows", Route::Workflows),
            ("Monitoring", Route::Monitoring),
            ("Settings", Route::Settings),
        ]
    } else {
        &[
            ("Home", Route::Home),
            ("Pricing", Route::Pricing),
            ("Contact", Route::Contact),
            ("Log in", Route::Login),
            ("Sign up", Route::Register),
        ]
    };
    for (label, route) in entries {
        let link = nav_link(document, label, *route)?;
        if state.route == *route {
            link.class_list().add_1("active")?;
        }
        links.append_child(&link)?;
    }
    navbar.append_child(&links)?;

    if let Some(user) = &state.session.user {
        let user_box = document.create_element("div")?;
        user_box.set_class_name("navbar-user");

        let name = document.create_element("span")?;
        name.set_class_name("navbar-username");
        name.set_text_content(Some(user.display_name()));
        user_box.append_child(&name)?;

        let logout = document.create_element("button")?;
        logout.set_class_name("navbar-logout");
        logout.set_text_content(Some("Log out"));
        let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
            dispatch_global_message(Message::RequestLogout);
        }) as Box<dyn FnMut(_)>);
        logout.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        user_box.append_child(&logout)?;

        navbar.append_child(&user_box)?;
    }

    Ok(())
}

/// An anchor that routes through the dispatch loop instead of a full page
/// load. The real href stays on the element so middle-click still works.
fn nav_link(document: &Document, label: &str, route: Route) -> Result<Element, JsValue> {
    let link = document.create_element("a")?;
    link.set_class_name("nav-link");
    link.set_attribute("href", route.path())?;
    link.set_text_content(Some(label));

    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        dispatch_global_message(Message::Navigate(route));
    }) as Box<dyn FnMut(_)>);
    link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(link)
}
