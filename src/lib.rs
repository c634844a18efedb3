//! Browser admin console for agents and workflows.
//!
//! Everything flows through one loop: browser events become [`messages::Message`]s,
//! [`update::update`] turns them into state changes plus commands, and
//! [`command_executors`] runs the commands (REST calls, navigation, DOM work)
//! whose outcomes come back as messages again.

pub mod command_executors;
pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod messages;
pub mod models;
pub mod network;
pub mod pages;
pub mod reducers;
pub mod router;
pub mod state;
pub mod storage;
pub mod theme;
pub mod toast;
pub mod update;
pub mod utils;
pub mod validation;
pub mod views;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("agent console starting");

    router::init()?;

    // First dispatch lazily builds the app state (clients, persisted theme)
    // and renders whatever the address bar points at; the bootstrap then
    // validates any stored token and re-routes once the session is known.
    state::dispatch_global_message(messages::Message::RouteChanged(router::current_route()));
    state::dispatch_global_message(messages::Message::BootstrapSession);

    Ok(())
}
