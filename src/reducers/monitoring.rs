//! Monitoring snapshot and log tail. Everything here is read-only; failures
//! land on the error flags and the page keeps its last data.

use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message, commands: &mut Vec<Command>) {
    match msg {
        Message::RefreshMonitoring => {
            let epoch = state.monitoring.begin_load();
            commands.push(Command::FetchMonitoring { epoch });
        }

        Message::MonitoringLoaded { epoch, result } => {
            state.monitoring.finish_load(epoch, result);
        }

        Message::RefreshLogs { limit } => {
            let epoch = state.logs.begin_load();
            commands.push(Command::FetchLogs { epoch, limit });
        }

        Message::LogsLoaded { epoch, result } => {
            state.logs.finish_load(epoch, result);
        }

        _ => {}
    }
}
