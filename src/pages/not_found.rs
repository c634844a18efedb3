use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::router::Route;
use crate::state::dispatch_global_message;

pub fn render(document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h1")?;
    title.set_text_content(Some("Page not found"));
    root.append_child(&title)?;

    let body = document.create_element("p")?;
    body.set_text_content(Some("The page you asked for does not exist."));
    root.append_child(&body)?;

    let home = document.create_element("button")?;
    home.set_class_name("btn btn-secondary");
    home.set_text_content(Some("Back to home"));
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::Navigate(Route::Home));
    }) as Box<dyn FnMut(_)>);
    home.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    root.append_child(&home)?;

    Ok(())
}
