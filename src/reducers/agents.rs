//! Agent list and lifecycle actions. Fetch failures stay on the store's
//! error flag; mutation failures surface as toasts.

use crate::messages::{Command, Message};
use crate::state::AppState;
use crate::toast;

pub fn update(state: &mut AppState, msg: Message, commands: &mut Vec<Command>) {
    match msg {
        Message::RefreshAgents => {
            let epoch = state.agents.begin_load();
            commands.push(Command::FetchAgents { epoch });
        }

        Message::AgentsLoaded { epoch, result } => {
            state.agents.finish_load(epoch, result);
        }

        Message::SubmitAgentCreate(payload) => {
            commands.push(Command::CreateAgent(payload));
        }

        Message::AgentCreated(agent) => {
            state.agents.add(*agent);
            commands.push(Command::update_ui(|| toast::success("Agent created")));
        }

        Message::SubmitAgentUpdate { agent_id, update } => {
            commands.push(Command::UpdateAgent {
                agent_id,
                payload: update,
            });
        }

        // Full refreshed record from an update or a start/stop transition.
        Message::AgentUpdated(agent) => {
            let refreshed = *agent;
            if state.agents.get(&refreshed.id).is_some() {
                let id = refreshed.id.clone();
                state.agents.update(&id, |existing| *existing = refreshed);
            } else {
                state.agents.add(refreshed);
            }
        }

        Message::RequestAgentDeletion { agent_id } => {
            commands.push(Command::DeleteAgent { agent_id });
        }

        Message::AgentDeleted { agent_id } => {
            state.agents.remove(&agent_id);
            if state.agent_logs.owner.as_deref() == Some(agent_id.as_str()) {
                state.agent_logs.close();
            }
            commands.push(Command::update_ui(|| toast::success("Agent deleted")));
        }

        Message::StartAgent { agent_id } => {
            commands.push(Command::StartAgent { agent_id });
        }

        Message::StopAgent { agent_id } => {
            commands.push(Command::StopAgent { agent_id });
        }

        Message::AgentActionFailed { message } => {
            commands.push(Command::update_ui(move || toast::error(&message)));
        }

        Message::ViewAgentLogs { agent_id } => {
            // Opening a different agent's panel drops the previous entries
            // right away so they never show under the new heading.
            if state.agent_logs.owner.as_deref() != Some(agent_id.as_str()) {
                state.agent_logs.store.set_all(Vec::new());
            }
            state.agent_logs.owner = Some(agent_id.clone());
            let epoch = state.agent_logs.store.begin_load();
            commands.push(Command::FetchAgentLogs { agent_id, epoch });
        }

        Message::AgentLogsLoaded { epoch, result } => {
            state.agent_logs.store.finish_load(epoch, result);
        }

        Message::CloseAgentLogs => {
            state.agent_logs.close();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogRecord;
    use crate::network::{ApiConfig, ApiHandles};
    use crate::update::update as run_update;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_state() -> AppState {
        AppState::new(ApiHandles::new(ApiConfig::default()))
    }

    fn record(id: &str, message: &str) -> LogRecord {
        LogRecord {
            id: id.into(),
            level: "info".into(),
            source: "agent".into(),
            message: message.into(),
            created_at: None,
        }
    }

    #[wasm_bindgen_test]
    fn viewing_logs_opens_the_panel_and_fetches() {
        let mut state = test_state();

        let commands = run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-1".into(),
            },
        );

        assert_eq!(state.agent_logs.owner.as_deref(), Some("a-1"));
        assert!(state.agent_logs.store.loading);
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::FetchAgentLogs { agent_id, .. } if agent_id == "a-1")));
    }

    #[wasm_bindgen_test]
    fn loaded_entries_land_in_the_panel_store() {
        let mut state = test_state();
        let commands = run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-1".into(),
            },
        );
        let epoch = commands
            .iter()
            .find_map(|c| match c {
                Command::FetchAgentLogs { epoch, .. } => Some(*epoch),
                _ => None,
            })
            .unwrap();

        run_update(
            &mut state,
            Message::AgentLogsLoaded {
                epoch,
                result: Ok(vec![record("l-1", "started"), record("l-2", "finished")]),
            },
        );

        assert!(!state.agent_logs.store.loading);
        assert_eq!(state.agent_logs.store.len(), 2);
    }

    #[wasm_bindgen_test]
    fn switching_agents_drops_the_previous_entries() {
        let mut state = test_state();
        run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-1".into(),
            },
        );
        let epoch = state.agent_logs.store.begin_load();
        state
            .agent_logs
            .store
            .finish_load(epoch, Ok(vec![record("l-1", "old entry")]));

        run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-2".into(),
            },
        );

        assert_eq!(state.agent_logs.owner.as_deref(), Some("a-2"));
        assert!(state.agent_logs.store.is_empty());
    }

    #[wasm_bindgen_test]
    fn deleting_the_viewed_agent_closes_the_panel() {
        let mut state = test_state();
        run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-1".into(),
            },
        );

        run_update(
            &mut state,
            Message::AgentDeleted {
                agent_id: "a-1".into(),
            },
        );

        assert_eq!(state.agent_logs.owner, None);
        assert!(state.agent_logs.store.is_empty());
    }

    #[wasm_bindgen_test]
    fn closing_the_panel_clears_it() {
        let mut state = test_state();
        run_update(
            &mut state,
            Message::ViewAgentLogs {
                agent_id: "a-1".into(),
            },
        );

        run_update(&mut state, Message::CloseAgentLogs);

        assert_eq!(state.agent_logs.owner, None);
        assert!(state.agent_logs.store.is_empty());
    }
}
