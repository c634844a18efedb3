//! Workflow list and run/pause actions. Mirrors the agent reducer's error
//! policy: silent store errors for fetches, toasts for mutations.

use crate::messages::{Command, Message};
use crate::state::AppState;
use crate::toast;

pub fn update(state: &mut AppState, msg: Message, commands: &mut Vec<Command>) {
    match msg {
        Message::RefreshWorkflows => {
            let epoch = state.workflows.begin_load();
            commands.push(Command::FetchWorkflows { epoch });
        }

        Message::WorkflowsLoaded { epoch, result } => {
            state.workflows.finish_load(epoch, result);
        }

        Message::SubmitWorkflowCreate(payload) => {
            commands.push(Command::CreateWorkflow(payload));
        }

        Message::WorkflowCreated(workflow) => {
            state.workflows.add(*workflow);
            commands.push(Command::update_ui(|| toast::success("Workflow created")));
        }

        Message::SubmitWorkflowUpdate { workflow_id, update } => {
            commands.push(Command::UpdateWorkflow {
                workflow_id,
                payload: update,
            });
        }

        Message::WorkflowUpdated(workflow) => {
            let refreshed = *workflow;
            if state.workflows.get(&refreshed.id).is_some() {
                let id = refreshed.id.clone();
                state.workflows.update(&id, |existing| *existing = refreshed);
            } else {
                state.workflows.add(refreshed);
            }
        }

        Message::RequestWorkflowDeletion { workflow_id } => {
            commands.push(Command::DeleteWorkflow { workflow_id });
        }

        Message::WorkflowDeleted { workflow_id } => {
            state.workflows.remove(&workflow_id);
            commands.push(Command::update_ui(|| toast::success("Workflow deleted")));
        }

        Message::RunWorkflow { workflow_id } => {
            commands.push(Command::RunWorkflow { workflow_id });
        }

        Message::PauseWorkflow { workflow_id } => {
            commands.push(Command::PauseWorkflow { workflow_id });
        }

        Message::WorkflowActionFailed { message } => {
            commands.push(Command::update_ui(move || toast::error(&message)));
        }

        _ => {}
    }
}
