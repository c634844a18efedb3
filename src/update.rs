//! Central reducer. Routing and theme messages are handled here; everything
//! else is delegated to the per-domain reducers.

use crate::constants::DEFAULT_LOG_LIMIT;
use crate::messages::{Command, Message};
use crate::reducers;
use crate::router::{self, Route};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::Navigate(requested) => {
            let target = router::guard(requested, state.session.authenticated);
            if let Err(e) = router::push_history(target) {
                log::warn!("pushState failed: {:?}", e);
            }
            enter_route(state, target, &mut commands);
        }

        Message::RouteChanged(requested) => {
            let target = router::guard(requested, state.session.authenticated);
            if target != requested {
                // The address bar points at a page the visitor may not see.
                // Rewrite the entry in place: pushing here would leave the
                // guarded URL underneath, so Back could never get past it.
                if let Err(e) = router::replace_history(target) {
                    log::warn!("replaceState failed: {:?}", e);
                }
            }
            enter_route(state, target, &mut commands);
        }

        Message::SetThemeMode(mode) => state.theme.set_mode(mode),
        Message::OsPreferenceChanged { prefers_dark } => {
            state.theme.os_preference_changed(prefers_dark)
        }

        msg @ (Message::BootstrapSession
        | Message::CurrentUserLoaded(_)
        | Message::BootstrapFailed
        | Message::SessionExpired
        | Message::SubmitLogin(_)
        | Message::LoginSucceeded(_)
        | Message::LoginFailed(_)
        | Message::SubmitRegister(_)
        | Message::RegisterSucceeded(_)
        | Message::RegisterFailed(_)
        | Message::RequestLogout
        | Message::LogoutCompleted
        | Message::SubmitPasswordChange { .. }
        | Message::PasswordChanged
        | Message::PasswordChangeFailed { .. }) => {
            reducers::session::update(state, msg, &mut commands)
        }

        msg @ (Message::RefreshAgents
        | Message::AgentsLoaded { .. }
        | Message::SubmitAgentCreate(_)
        | Message::AgentCreated(_)
        | Message::SubmitAgentUpdate { .. }
        | Message::AgentUpdated(_)
        | Message::RequestAgentDeletion { .. }
        | Message::AgentDeleted { .. }
        | Message::StartAgent { .. }
        | Message::StopAgent { .. }
        | Message::AgentActionFailed { .. }
        | Message::ViewAgentLogs { .. }
        | Message::AgentLogsLoaded { .. }
        | Message::CloseAgentLogs) => {
            reducers::agents::update(state, msg, &mut commands)
        }

        msg @ (Message::RefreshWorkflows
        | Message::WorkflowsLoaded { .. }
        | Message::SubmitWorkflowCreate(_)
        | Message::WorkflowCreated(_)
        | Message::SubmitWorkflowUpdate { .. }
        | Message::WorkflowUpdated(_)
        | Message::RequestWorkflowDeletion { .. }
        | Message::WorkflowDeleted { .. }
        | Message::RunWorkflow { .. }
        | Message::PauseWorkflow { .. }
        | Message::WorkflowActionFailed { .. }) => {
            reducers::workflows::update(state, msg, &mut commands)
        }

        msg @ (Message::RefreshMonitoring
        | Message::MonitoringLoaded { .. }
        | Message::RefreshLogs { .. }
        | Message::LogsLoaded { .. }) => {
            reducers::monitoring::update(state, msg, &mut commands)
        }
    }

    commands
}

/// Record the new route and kick off the fetches its page needs. Fetches are
/// skipped while unauthenticated so the login redirect doesn't fire doomed
/// requests.
fn enter_route(state: &mut AppState, route: Route, commands: &mut Vec<Command>) {
    state.route = route;
    if !state.session.authenticated {
        return;
    }
    match route {
        Route::Dashboard => {
            commands.push(Command::send(Message::RefreshAgents));
            commands.push(Command::send(Message::RefreshWorkflows));
        }
        Route::Agents => commands.push(Command::send(Message::RefreshAgents)),
        Route::Workflows => commands.push(Command::send(Message::RefreshWorkflows)),
        Route::Monitoring => {
            commands.push(Command::send(Message::RefreshMonitoring));
            commands.push(Command::send(Message::RefreshLogs {
                limit: DEFAULT_LOG_LIMIT,
            }));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{ApiConfig, ApiHandles};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    // A guard redirect arriving via popstate/initial load must rewrite the
    // current history entry, not stack a new one: otherwise Back lands on the
    // guarded URL, gets redirected again, and can never leave.
    #[wasm_bindgen_test]
    fn guard_redirect_rewrites_history_in_place() {
        let window = web_sys::window().unwrap();
        let history = window.history().unwrap();

        router::push_history(Route::Dashboard).unwrap();
        let depth = history.length().unwrap();

        let mut state = AppState::new(ApiHandles::new(ApiConfig::default()));
        update(&mut state, Message::RouteChanged(Route::Dashboard));

        assert_eq!(state.route, Route::Login);
        assert_eq!(history.length().unwrap(), depth);
        assert_eq!(window.location().pathname().unwrap(), "/login");
    }
}
