//! Workflows page: create form plus a table with run/pause/delete actions.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::components::forms;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::{Workflow, WorkflowCreate, WorkflowStatus};
use crate::state::{dispatch_global_message, AppState};
use crate::utils::{format_count, format_percent};
use crate::validation::{required, validate_form, FieldRules};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("page-header");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Workflows"));
    header.append_child(&title)?;
    header.append_child(&refresh_button(document)?.into())?;
    root.append_child(&header)?;

    if let Some(error) = &state.workflows.error {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        root.append_child(&note)?;
    }

    root.append_child(&create_form(document)?.into())?;

    if state.workflows.loading && state.workflows.is_empty() {
        let loading = document.create_element("p")?;
        loading.set_class_name("loading-note");
        loading.set_text_content(Some("Loading workflows…"));
        root.append_child(&loading)?;
        return Ok(());
    }

    if state.workflows.is_empty() {
        let empty = document.create_element("p")?;
        empty.set_class_name("empty-note");
        empty.set_text_content(Some("No workflows yet. Create one above."));
        root.append_child(&empty)?;
        return Ok(());
    }

    root.append_child(&workflows_table(state, document)?.into())?;
    Ok(())
}

fn refresh_button(document: &Document) -> Result<Element, JsValue> {
    let btn = document.create_element("button")?;
    btn.set_class_name("btn btn-secondary");
    btn.set_text_content(Some("Refresh"));
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::RefreshWorkflows);
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(btn)
}

fn create_form(document: &Document) -> Result<Element, JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("create-form");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("New workflow"));
    form.append_child(&heading)?;

    form.append_child(&forms::text_field(
        document,
        "workflow-name",
        "Name",
        "text",
        None,
    )?.into())?;
    form.append_child(&forms::text_field(
        document,
        "workflow-description",
        "Description",
        "text",
        None,
    )?.into())?;
    form.append_child(&forms::text_field(
        document,
        "workflow-tags",
        "Tags (comma separated)",
        "text",
        None,
    )?.into())?;

    let submit = document.create_element("button")?;
    submit.set_class_name("btn btn-primary");
    submit.set_text_content(Some("Create workflow"));
    let on_submit = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let Some(document) = dom_utils::document() else {
            return;
        };
        let name = dom_utils::input_value(&document, "workflow-name");
        let description = dom_utils::input_value(&document, "workflow-description");
        let tags_raw = dom_utils::input_value(&document, "workflow-tags");

        let check = validate_form(&[FieldRules {
            name: "workflow-name",
            value: &name,
            rules: vec![Box::new(required)],
        }]);
        forms::set_field_error(
            &document,
            "workflow-name",
            check.errors.get("workflow-name").map(String::as_str),
        );
        if check.is_valid {
            let tags = tags_raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            dispatch_global_message(Message::SubmitWorkflowCreate(Box::new(WorkflowCreate {
                name,
                description,
                tags,
            })));
        }
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    form.append_child(&submit)?;

    Ok(form)
}

fn workflows_table(state: &AppState, document: &Document) -> Result<Element, JsValue> {
    let table = document.create_element("table")?;
    table.set_class_name("data-table");

    let head = document.create_element("tr")?;
    for col in ["Name", "Status", "Runs", "Success rate", "Tags", "Actions"] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for workflow in state.workflows.items() {
        table.append_child(&workflow_row(document, workflow)?.into())?;
    }
    Ok(table)
}

fn workflow_row(document: &Document, workflow: &Workflow) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;

    let name = document.create_element("td")?;
    name.set_text_content(Some(&workflow.name));
    row.append_child(&name)?;

    let status = document.create_element("td")?;
    let badge = document.create_element("span")?;
    badge.set_class_name("status-badge");
    badge.set_text_content(Some(workflow.status.label()));
    status.append_child(&badge)?;
    row.append_child(&status)?;

    let runs = document.create_element("td")?;
    runs.set_text_content(Some(&format!(
        "{} / {}",
        format_count(workflow.successful_runs),
        format_count(workflow.total_runs)
    )));
    row.append_child(&runs)?;

    let rate = document.create_element("td")?;
    rate.set_text_content(Some(&format_percent(workflow.success_rate)));
    row.append_child(&rate)?;

    let tags = document.create_element("td")?;
    tags.set_text_content(Some(&workflow.tags.join(", ")));
    row.append_child(&tags)?;

    let actions = document.create_element("td")?;
    actions.set_class_name("row-actions");
    if workflow.status == WorkflowStatus::Running {
        actions.append_child(&action_button(document, "Pause", &workflow.id, |workflow_id| {
            Message::PauseWorkflow { workflow_id }
        })?.into())?;
    } else {
        actions.append_child(&action_button(document, "Run", &workflow.id, |workflow_id| {
            Message::RunWorkflow { workflow_id }
        })?.into())?;
    }
    actions.append_child(&action_button(document, "Delete", &workflow.id, |workflow_id| {
        Message::RequestWorkflowDeletion { workflow_id }
    })?.into())?;
    row.append_child(&actions)?;

    Ok(row)
}

fn action_button(
    document: &Document,
    label: &str,
    id: &str,
    to_message: fn(String) -> Message,
) -> Result<Element, JsValue> {
    let btn = document.create_element("button")?;
    btn.set_class_name("btn btn-small");
    btn.set_text_content(Some(label));
    let id = id.to_string();
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(to_message(id.clone()));
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(btn)
}
