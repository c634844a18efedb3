//! Public pages: landing, pricing, contact. Static content with routed
//! call-to-action links.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::router::Route;
use crate::state::{dispatch_global_message, AppState};

pub fn render_home(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let hero = document.create_element("div")?;
    hero.set_class_name("hero");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Run your agents from one console"));
    hero.append_child(&title)?;

    let tagline = document.create_element("p")?;
    tagline.set_class_name("hero-tagline");
    tagline.set_text_content(Some(
        "Create agents, wire them into workflows, and watch them work.",
    ));
    hero.append_child(&tagline)?;

    let cta = if state.session.authenticated {
        cta_button(document, "Open dashboard", Route::Dashboard)?
    } else {
        cta_button(document, "Get started", Route::Register)?
    };
    hero.append_child(&cta)?;

    root.append_child(&hero)?;
    Ok(())
}

pub fn render_pricing(document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h1")?;
    title.set_text_content(Some("Pricing"));
    root.append_child(&title)?;

    let tiers = document.create_element("div")?;
    tiers.set_class_name("pricing-tiers");
    for (name, price, blurb) in [
        ("Free", "$0", "Up to 3 agents, community support"),
        ("Team", "$29/mo", "Unlimited agents, workflow scheduling"),
        ("Enterprise", "Contact us", "SSO, audit logs, dedicated support"),
    ] {
        let tier = document.create_element("div")?;
        tier.set_class_name("pricing-tier");

        let heading = document.create_element("h2")?;
        heading.set_text_content(Some(name));
        tier.append_child(&heading)?;

        let amount = document.create_element("div")?;
        amount.set_class_name("pricing-amount");
        amount.set_text_content(Some(price));
        tier.append_child(&amount)?;

        let detail = document.create_element("p")?;
        detail.set_text_content(Some(blurb));
        tier.append_child(&detail)?;

        tiers.append_child(&tier)?;
    }
    root.append_child(&tiers)?;
    Ok(())
}

pub fn render_contact(document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h1")?;
    title.set_text_content(Some("Contact"));
    root.append_child(&title)?;

    let body = document.create_element("p")?;
    body.set_text_content(Some(
        "Questions or feedback? Write to support@agentconsole.example and we'll get back within a business day.",
    ));
    root.append_child(&body)?;
    Ok(())
}

fn cta_button(document: &Document, label: &str, route: Route) -> Result<Element, JsValue> {
    let btn = document.create_element("button")?;
    btn.set_class_name("btn btn-primary btn-large");
    btn.set_text_content(Some(label));
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::Navigate(route));
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(btn)
}
