//! Login form. Client-side validation runs before any request; backend
//! failures come back through the session state as a banner plus per-field
//! errors and are rendered inline on the next pass.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::components::forms;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::LoginRequest;
use crate::state::{dispatch_global_message, AppState};
use crate::validation::{email, required, validate_form, FieldRules};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("auth-card");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Log in"));
    card.append_child(&title)?;

    if let Some(message) = &state.session.banner {
        card.append_child(&forms::banner(document, message)?.into())?;
    }

    card.append_child(&forms::text_field(
        document,
        "login-email",
        "Email",
        "email",
        state.session.field_errors.get("email"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "login-password",
        "Password",
        "password",
        state.session.field_errors.get("password"),
    )?.into())?;

    let submit = document.create_element("button")?;
    submit.set_class_name("btn btn-primary");
    if state.session.loading {
        submit.set_text_content(Some("Signing in…"));
        submit.set_attribute("disabled", "disabled")?;
    } else {
        submit.set_text_content(Some("Log in"));
    }

    let on_submit = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let Some(document) = dom_utils::document() else {
            return;
        };
        let email_value = dom_utils::input_value(&document, "login-email");
        let password_value = dom_utils::input_value(&document, "login-password");

        let check = validate_form(&[
            FieldRules {
                name: "login-email",
                value: &email_value,
                rules: vec![Box::new(required), Box::new(email)],
            },
            FieldRules {
                name: "login-password",
                value: &password_value,
                rules: vec![Box::new(required)],
            },
        ]);
        for id in ["login-email", "login-password"] {
            forms::set_field_error(&document, id, check.errors.get(id).map(String::as_str));
        }
        if check.is_valid {
            dispatch_global_message(Message::SubmitLogin(LoginRequest {
                email: email_value,
                password: password_value,
            }));
        }
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    card.append_child(&submit)?;

    let hint = document.create_element("p")?;
    hint.set_class_name("auth-hint");
    hint.set_text_content(Some("No account yet? Sign up from the navigation bar."));
    card.append_child(&hint)?;

    root.append_child(&card)?;
    Ok(())
}
