//! Monitoring page: overview counters, backend health, and the recent log
//! tail. Read-only.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::constants::DEFAULT_LOG_LIMIT;
use crate::messages::Message;
use crate::state::{dispatch_global_message, AppState};
use crate::utils::{capitalise_first, format_count, format_timestamp};

pub fn render(state: &AppState, document: &Document, root: &Element) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("page-header");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Monitoring"));
    header.append_child(&title)?;

    let refresh = document.create_element("button")?;
    refresh.set_class_name("btn btn-secondary");
    refresh.set_text_content(Some("Refresh"));
    let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
        dispatch_global_message(Message::RefreshMonitoring);
        dispatch_global_message(Message::RefreshLogs {
            limit: DEFAULT_LOG_LIMIT,
        });
    }) as Box<dyn FnMut(_)>);
    refresh.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    header.append_child(&refresh)?;
    root.append_child(&header)?;

    if let Some(error) = &state.monitoring.error {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        root.append_child(&note)?;
    }

    let cards = document.create_element("div")?;
    cards.set_class_name("stat-cards");
    if let Some(overview) = &state.monitoring.overview {
        cards.append_child(&stat_card(
            document,
            "Agents",
            &format_count(overview.agents_count),
        )?.into())?;
        cards.append_child(&stat_card(
            document,
            "Workflows",
            &format_count(overview.workflows_count),
        )?.into())?;
        cards.append_child(&stat_card(document, "Database", &overview.db_status)?.into())?;
    }
    if let Some(health) = &state.monitoring.health {
        cards.append_child(&stat_card(
            document,
            "Health",
            &capitalise_first(&health.status),
        )?.into())?;
    }
    if let Some(stats) = &state.monitoring.stats {
        cards.append_child(&stat_card(document, "DB vendor", &stats.db_vendor)?.into())?;
    }
    root.append_child(&cards)?;

    if state.monitoring.loading {
        let loading = document.create_element("p")?;
        loading.set_class_name("loading-note");
        loading.set_text_content(Some("Refreshing…"));
        root.append_child(&loading)?;
    }

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some("Recent logs"));
    root.append_child(&heading)?;

    if let Some(error) = &state.logs.error {
        let note = document.create_element("div")?;
        note.set_class_name("load-error");
        note.set_text_content(Some(error));
        root.append_child(&note)?;
    }

    if state.logs.is_empty() {
        let empty = document.create_element("p")?;
        empty.set_class_name("empty-note");
        empty.set_text_content(Some(if state.logs.loading {
            "Loading logs…"
        } else {
            "No log entries."
        }));
        root.append_child(&empty)?;
        return Ok(());
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table logs-table");
    let head = document.create_element("tr")?;
    for col in ["Time", "Level", "Source", "Message"] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for record in state.logs.items() {
        let row = document.create_element("tr")?;
        row.set_class_name(&format!("log-row log-{}", record.level.to_lowercase()));

        let time = document.create_element("td")?;
        time.set_text_content(Some(&format_timestamp(record.created_at.as_deref())));
        row.append_child(&time)?;

        let level = document.create_element("td")?;
        level.set_text_content(Some(&record.level.to_uppercase()));
        row.append_child(&level)?;

        let source = document.create_element("td")?;
        source.set_text_content(Some(&record.source));
        row.append_child(&source)?;

        let message = document.create_element("td")?;
        message.set_text_content(Some(&record.message));
        row.append_child(&message)?;

        table.append_child(&row)?;
    }
    root.append_child(&table)?;

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
