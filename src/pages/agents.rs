//! Agents page: create form, a table with start/stop/logs/delete actions,
//! and a per-agent log panel.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::components::forms;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::{Agent, AgentConfig, AgentCreate, AgentStatus};
use crate::state::{dispatch_global_message, AppState};
use crate::utils::{format_count, format_timestamp};
use crate::validation::{required, validate_form, FieldRules};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("page-header");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Agents"));
    header.append_child(&title)?;
    header.append_child(&refresh_button(document)?.into())?;
    root.append_child(&header)?;

    if let Some(error) = &state.agents.error {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        root.append_child(&note)?;
    }

    root.append_child(&create_form(document)?.into())?;

    if state.agents.loading && state.agents.is_empty() {
        let loading = document.create_element("p")?;
        loading.set_class_name("loading-note");
        loading.set_text_content(Some("Loading agents…"));
        root.append_child(&loading)?;
        return Ok(());
    }

    if state.agents.is_empty() {
        let empty = document.create_element("p")?;
        empty.set_class_name("empty-note");
        empty.set_text_content(Some("No agents yet. Create one above."));
        root.append_child(&empty)?;
        return Ok(());
    }

    root.append_child(&agents_table(state, document)?.into())?;

    if let Some(agent_id) = &state.agent_logs.owner {
        root.append_child(&logs_panel(state, document, agent_id)?.into())?;
    }
    Ok(())
}

fn refresh_button(document: &Document) -> Result<Element, JsValue> {
    let btn = document.create_element("button")?;
    btn.set_class_name("btn btn-secondary");
    btn.set_text_content(Some("Refresh"));
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::RefreshAgents);
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(btn)
}

fn create_form(document: &Document) -> Result<Element, JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("create-form");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("New agent"));
    form.append_child(&heading)?;

    form.append_child(&forms::text_field(document, "agent-name", "Name", "text", None)?.into())?;
    form.append_child(&forms::text_field(
        document,
        "agent-description",
        "Description",
        "text",
        None,
    )?.into())?;
    form.append_child(&forms::text_field(
        document,
        "agent-type",
        "Type",
        "text",
        None,
    )?.into())?;
    form.append_child(&forms::text_field(
        document,
        "agent-model",
        "Model",
        "text",
        None,
    )?.into())?;

    let submit = document.create_element("button")?;
    submit.set_class_name("btn btn-primary");
    submit.set_text_content(Some("Create agent"));
    let on_submit = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.prevent_default();
        let Some(document) = dom_utils::document() else {
            return;
        };
        let name = dom_utils::input_value(&document, "agent-name");
        let description = dom_utils::input_value(&document, "agent-description");
        let agent_type = dom_utils::input_value(&document, "agent-type");
        let model = dom_utils::input_value(&document, "agent-model");

        let check = validate_form(&[
            FieldRules {
                name: "agent-name",
                value: &name,
                rules: vec![Box::new(required)],
            },
            FieldRules {
                name: "agent-model",
                value: &model,
                rules: vec![Box::new(required)],
            },
        ]);
        for id in ["agent-name", "agent-model"] {
            forms::set_field_error(&document, id, check.errors.get(id).map(String::as_str));
        }
        if check.is_valid {
            dispatch_global_message(Message::SubmitAgentCreate(Box::new(AgentCreate {
                name,
                description,
                agent_type,
                model,
                config: AgentConfig::default(),
            })));
        }
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    form.append_child(&submit)?;

    Ok(form)
}

fn agents_table(state: &AppState, document: &Document) -> Result<Element, JsValue> {
    let table = document.create_element("table")?;
    table.set_class_name("data-table");

    let head = document.create_element("tr")?;
    for col in ["Name", "Type", "Model", "Status", "Runs", "Last active", "Actions"] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for agent in state.agents.items() {
        table.append_child(&agent_row(document, agent)?.into())?;
    }
    Ok(table)
}

fn agent_row(document: &Document, agent: &Agent) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;

    for text in [&agent.name, &agent.agent_type, &agent.model] {
        let td = document.create_element("td")?;
        td.set_text_content(Some(text));
        row.append_child(&td)?;
    }

    let status = document.create_element("td")?;
    let badge = document.create_element("span")?;
    badge.set_class_name(&format!("status-badge {}", agent.status.css_class()));
    badge.set_text_content(Some(agent.status.label()));
    status.append_child(&badge)?;
    row.append_child(&status)?;

    let runs = document.create_element("td")?;
    runs.set_text_content(Some(&format!(
        "{} / {}",
        format_count(agent.successful_executions),
        format_count(agent.total_executions)
    )));
    row.append_child(&runs)?;

    let last_active = document.create_element("td")?;
    last_active.set_text_content(Some(&format_timestamp(agent.last_active_at.as_deref())));
    row.append_child(&last_active)?;

    let actions = document.create_element("td")?;
    actions.set_class_name("row-actions");
    if agent.status == AgentStatus::Active {
        actions.append_child(&action_button(document, "Stop", &agent.id, |agent_id| {
            Message::StopAgent { agent_id }
        })?.into())?;
    } else {
        actions.append_child(&action_button(document, "Start", &agent.id, |agent_id| {
            Message::StartAgent { agent_id }
        })?.into())?;
    }
    actions.append_child(&action_button(document, "Logs", &agent.id, |agent_id| {
        Message::ViewAgentLogs { agent_id }
    })?.into())?;
    actions.append_child(&action_button(document, "Delete", &agent.id, |agent_id| {
        Message::RequestAgentDeletion { agent_id }
    })?.into())?;
    row.append_child(&actions)?;

    Ok(row)
}

/// Log tail for the agent whose "Logs" button was clicked last.
fn logs_panel(state: &AppState, document: &Document, agent_id: &str) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name("agent-logs-panel");

    let header = document.create_element("div")?;
    header.set_class_name("page-header");

    let heading = document.create_element("h2")?;
    let name = state
        .agents
        .get(agent_id)
        .map(|agent| agent.name.as_str())
        .unwrap_or(agent_id);
    heading.set_text_content(Some(&format!("Logs · {}", name)));
    header.append_child(&heading)?;

    let close = document.create_element("button")?;
    close.set_class_name("btn btn-small");
    close.set_text_content(Some("Close"));
    let on_close = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::CloseAgentLogs);
    }) as Box<dyn FnMut(_)>);
    close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
    on_close.forget();
    header.append_child(&close)?;
    panel.append_child(&header)?;

    if let Some(error) = &state.agent_logs.store.error {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        panel.append_child(&note)?;
    }

    if state.agent_logs.store.is_empty() {
        let empty = document.create_element("p")?;
        empty.set_class_name("empty-note");
        empty.set_text_content(Some(if state.agent_logs.store.loading {
            "Loading logs…"
        } else {
            "No log entries for this agent."
        }));
        panel.append_child(&empty)?;
        return Ok(panel);
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table logs-table");
    let head = document.create_element("tr")?;
    for col in ["Time", "Level", "Message"] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for record in state.agent_logs.store.items() {
        let row = document.create_element("tr")?;
        row.set_class_name(&format!("log-row log-{}", record.level.to_lowercase()));

        let time = document.create_element("td")?;
        time.set_text_content(Some(&format_timestamp(record.created_at.as_deref())));
        row.append_child(&time)?;

        let level = document.create_element("td")?;
        level.set_text_content(Some(&record.level.to_uppercase()));
        row.append_child(&level)?;

        let message = document.create_element("td")?;
        message.set_text_content(Some(&record.message));
        row.append_child(&message)?;

        table.append_child(&row)?;
    }
    panel.append_child(&table)?;

    Ok(panel)
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
