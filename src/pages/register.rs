//! Registration form. Mirrors the login page's validation flow, with the
//! password-confirmation rule bound at submit time.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::components::forms;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::RegisterRequest;
use crate::state::{dispatch_global_message, AppState};
use crate::validation::{email, equals, min_length, required, validate_form, FieldRules};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("auth-card");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Create your account"));
    card.append_child(&title)?;

    if let Some(message) = &state.session.banner {
        card.append_child(&forms::banner(document, message)?.into())?;
    }

    let errors = &state.session.field_errors;
    card.append_child(&forms::text_field(
        document,
        "register-email",
        "Email",
        "email",
        errors.get("email"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "register-username",
        "Username (optional)",
        "text",
        errors.get("username"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "register-first-name",
        "First name",
        "text",
        errors.get("first_name"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "register-last-name",
        "Last name",
        "text",
        errors.get("last_name"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "register-password",
        "Password",
        "password",
        errors.get("password"),
    )?.into())?;
    card.append_child(&forms::text_field(
        document,
        "register-confirm",
        "Confirm password",
        "password",
        errors.get("confirm_password"),
    )?.into())?;

    let submit = document.create_element("button")?;
    submit.set_class_name("btn btn-primary");
    if state.session.loading {
        submit.set_text_content(Some("Creating account…"));
        submit.set_attribute("disabled", "disabled")?;
    } else {
        submit.set_text_content(Some("Sign up"));
    }

    let on_submit = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let Some(document) = dom_utils::document() else {
            return;
        };
        let email_value = dom_utils::input_value(&document, "register-email");
        let username = dom_utils::input_value(&document, "register-username");
        let first_name = dom_utils::input_value(&document, "register-first-name");
        let last_name = dom_utils::input_value(&document, "register-last-name");
        let password = dom_utils::input_value(&document, "register-password");
        let confirm = dom_utils::input_value(&document, "register-confirm");

        let check = validate_form(&[
            FieldRules {
                name: "register-email",
                value: &email_value,
                rules: vec![Box::new(required), Box::new(email)],
            },
            FieldRules {
                name: "register-first-name",
                value: &first_name,
                rules: vec![Box::new(required)],
            },
            FieldRules {
                name: "register-last-name",
                value: &last_name,
                rules: vec![Box::new(required)],
            },
            FieldRules {
                name: "register-password",
                value: &password,
                rules: vec![Box::new(required), min_length(8)],
            },
            FieldRules {
                name: "register-confirm",
                value: &confirm,
                rules: vec![equals(&password, "Passwords do not match")],
            },
        ]);
        for id in [
            "register-email",
            "register-first-name",
            "register-last-name",
            "register-password",
            "register-confirm",
        ] {
            forms::set_field_error(&document, id, check.errors.get(id).map(String::as_str));
        }
        if check.is_valid {
            dispatch_global_message(Message::SubmitRegister(Box::new(RegisterRequest {
                email: email_value,
                username: (!username.trim().is_empty()).then_some(username),
                first_name,
                last_name,
                password,
                confirm_password: confirm,
            })));
        }
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    card.append_child(&submit)?;

    root.append_child(&card)?;
    Ok(())
}
