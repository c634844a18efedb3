//! Settings: theme selection, account details, and password change.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::components::forms;
use crate::dom_utils;
use crate::messages::Message;
use crate::state::{dispatch_global_message, AppState};
use crate::theme::ThemeMode;
use crate::validation::{equals, min_length, required, validate_form, FieldRules};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h1")?;
    title.set_text_content(Some("Settings"));
    root.append_child(&title)?;

    root.append_child(&theme_section(state, document)?.into())?;
    root.append_child(&account_section(state, document)?.into())?;
    root.append_child(&password_section(document)?.into())?;
    Ok(())
}

fn theme_section(state: &AppState, document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("div")?;
    section.set_class_name("settings-section");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("Appearance"));
    section.append_child(&heading)?;

    let group = document.create_element("div")?;
    group.set_class_name("theme-picker");
    for (label, mode) in [
        ("Light", ThemeMode::Light),
        ("Dark", ThemeMode::Dark),
        ("System", ThemeMode::System),
    ] {
        let btn = document.create_element("button")?;
        btn.set_class_name(if state.theme.mode == mode {
            "btn btn-toggle active"
        } else {
            "btn btn-toggle"
        });
        btn.set_text_content(Some(label));
        let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
            dispatch_global_message(Message::SetThemeMode(mode));
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        group.append_child(&btn)?;
    }
    section.append_child(&group)?;

    Ok(section)
}

fn account_section(state: &AppState, document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("div")?;
    section.set_class_name("settings-section");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("Account"));
    section.append_child(&heading)?;

    let Some(user) = &state.session.user else {
        let note = document.create_element("p")?;
        note.set_text_content(Some("Not signed in."));
        section.append_child(&note)?;
        return Ok(section);
    };

    let list = document.create_element("dl")?;
    list.set_class_name("account-details");
    let mut rows: Vec<(&str, String)> = vec![
        ("Email", user.email.clone()),
        ("Name", user.display_name().to_string()),
    ];
    if !user.username.is_empty() {
        rows.push(("Username", user.username.clone()));
    }
    if !user.profile.company.is_empty() {
        rows.push(("Company", user.profile.company.clone()));
    }
    if !user.profile.timezone.is_empty() {
        rows.push(("Timezone", user.profile.timezone.clone()));
    }
    rows.push((
        "Email verified",
        if user.is_email_verified { "Yes" } else { "No" }.to_string(),
    ));

    for (label, value) in rows {
        let dt = document.create_element("dt")?;
        dt.set_text_content(Some(label));
        list.append_child(&dt)?;
        let dd = document.create_element("dd")?;
        dd.set_text_content(Some(&value));
        list.append_child(&dd)?;
    }
    section.append_child(&list)?;

    Ok(section)
}

fn password_section(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("div")?;
    section.set_class_name("settings-section");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("Change password"));
    section.append_child(&heading)?;

    section.append_child(&forms::text_field(
        document,
        "password-old",
        "Current password",
        "password",
        None,
    )?.into())?;
    section.append_child(&forms::text_field(
        document,
        "password-new",
        "New password",
        "password",
        None,
    )?.into())?;
    section.append_child(&forms::text_field(
        document,
        "password-confirm",
        "Confirm new password",
        "password",
        None,
    )?.into())?;

    let submit = document.create_element("button")?;
    submit.set_class_name("btn btn-primary");
    submit.set_text_content(Some("Change password"));
    let on_submit = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let Some(document) = dom_utils::document() else {
            return;
        };
        let old_password = dom_utils::input_value(&document, "password-old");
        let new_password = dom_utils::input_value(&document, "password-new");
        let confirm = dom_utils::input_value(&document, "password-confirm");

        let check = validate_form(&[
            FieldRules {
                name: "password-old",
                value: &old_password,
                rules: vec![Box::new(required)],
            },
            FieldRules {
                name: "password-new",
                value: &new_password,
                rules: vec![Box::new(required), min_length(8)],
            },
            FieldRules {
                name: "password-confirm",
                value: &confirm,
                rules: vec![equals(&new_password, "Passwords do not match")],
            },
        ]);
        for id in ["password-old", "password-new", "password-confirm"] {
            forms::set_field_error(&document, id, check.errors.get(id).map(String::as_str));
        }
        if check.is_valid {
            dispatch_global_message(Message::SubmitPasswordChange {
                old_password,
                new_password,
            });
        }
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    section.append_child(&submit)?;

    Ok(section)
}
