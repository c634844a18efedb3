//! Dashboard: headline counters over the agent and workflow stores, plus a
//! short recent-agents list. All numbers come from state; the page itself
//! fetches nothing.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::models::AgentStatus;
use crate::state::AppState;
use crate::utils::{format_count, format_percent};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h1")?;
    let greeting = match &state.session.user {
        Some(user) => format!("Welcome back, {}", user.display_name()),
        None => "Dashboard".to_string(),
    };
    title.set_text_content(Some(&greeting));
    root.append_child(&title)?;

    let cards = document.create_element("div")?;
    cards.set_class_name("stat-cards");

    let active_agents = state
        .agents
        .items()
        .iter()
        .filter(|a| a.status == AgentStatus::Active)
        .count() as u64;

    let total_runs: u64 = state.workflows.items().iter().map(|w| w.total_runs).sum();
    let successful_runs: u64 = state
        .workflows
        .items()
        .iter()
        .map(|w| w.successful_runs)
        .sum();
    let success_rate = if total_runs > 0 {
        successful_runs as f64 / total_runs as f64 * 100.0
    } else {
        0.0
    };

    cards.append_child(&stat_card(
        document,
        "Agents",
        &format_count(state.agents.len() as u64),
    )?.into())?;
    cards.append_child(&stat_card(
        document,
        "Active agents",
        &format_count(active_agents),
    )?.into())?;
    cards.append_child(&stat_card(
        document,
        "Workflows",
        &format_count(state.workflows.len() as u64),
    )?.into())?;
    cards.append_child(&stat_card(
        document,
        "Workflow success",
        &format_percent(success_rate),
    )?.into())?;
    root.append_child(&cards)?;

    if state.agents.loading || state.workflows.loading {
        let loading = document.create_element("p")?;
        loading.set_class_name("loading-note");
        loading.set_text_content(Some("Refreshing…"));
        root.append_child(&loading)?;
    }
    for error in [&state.agents.error, &state.workflows.error].into_iter().flatten() {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        root.append_child(&note)?;
    }

    if !state.agents.is_empty() {
        let heading = document.create_element("h2")?;
        heading.set_text_content(Some("Agents at a glance"));
        root.append_child(&heading)?;

        let list = document.create_element("ul")?;
        list.set_class_name("recent-list");
        for agent in state.agents.items().iter().take(5) {
            let item = document.create_element("li")?;
            item.set_text_content(Some(&format!(
                "{} — {}",
                agent.name,
                agent.status.label()
            )));
            list.append_child(&item)?;
        }
        root.append_child(&list)?;
    }

    Ok(())
}

fn stat_card(document: &Document, label: &str, value: &str) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("stat-card");

    let value_el = document.create_element("div")?;
    value_el.set_class_name("stat-value");
    value_el.set_text_content(Some(value));
    card.append_child(&value_el)?;

    let label_el = document.create_element("div")?;
    label_el.set_class_name("stat-label");
    label_el.set_text_content(Some(label));
    card.append_child(&label_el)?;

    Ok(card)
}
