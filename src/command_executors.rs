//! Command execution. Each async command clones the client handle it needs
//! out of the state, then spawns a future that feeds its outcome back into
//! the dispatch loop as a message. No future ever holds a state borrow.

use wasm_bindgen_futures::spawn_local;

use crate::messages::{Command, Message};
use crate::network::{ApiError, ApiHandles};
use crate::router;
use crate::state::{dispatch_global_message, APP_STATE};

fn api() -> ApiHandles {
    APP_STATE.with(|cell| cell.borrow().api.clone())
}

/// Convert a mutation failure into its toast message. 401s are swallowed
/// here: the shared interceptor already forced a sign-out for those.
fn mutation_failure(err: ApiError, fallback: &str) -> Option<Message> {
    if matches!(err, ApiError::Unauthorized) {
        return None;
    }
    Some(Message::AgentActionFailed {
        message: err.user_message(fallback),
    })
}

fn workflow_failure(err: ApiError, fallback: &str) -> Option<Message> {
    if matches!(err, ApiError::Unauthorized) {
        return None;
    }
    Some(Message::WorkflowActionFailed {
        message: err.user_message(fallback),
    })
}

pub fn execute(command: Command) {
    match command {
        Command::NoOp => {}

        Command::SendMessage(msg) => dispatch_global_message(msg),

        Command::UpdateUI(f) => f(),

        Command::NavigateTo(route) => {
            if let Err(e) = router::push_history(route) {
                log::warn!("pushState failed: {:?}", e);
            }
            dispatch_global_message(Message::RouteChanged(route));
        }

        // -- session -------------------------------------------------------
        Command::FetchCurrentUser => {
            let auth = api().auth;
            spawn_local(async move {
                match auth.current_user().await {
                    Ok(user) => {
                        dispatch_global_message(Message::CurrentUserLoaded(Box::new(user)))
                    }
                    Err(err) => {
                        log::warn!("stored token did not validate: {}", err);
                        dispatch_global_message(Message::BootstrapFailed);
                    }
                }
            });
        }

        Command::Login(payload) => {
            let auth = api().auth;
            spawn_local(async move {
                match auth.login(&payload).await {
                    Ok(response) => {
                        dispatch_global_message(Message::LoginSucceeded(Box::new(response)))
                    }
                    Err(err) => dispatch_global_message(Message::LoginFailed(err)),
                }
            });
        }

        Command::Register(payload) => {
            let auth = api().auth;
            spawn_local(async move {
                match auth.register(&payload).await {
                    Ok(response) => {
                        dispatch_global_message(Message::RegisterSucceeded(Box::new(response)))
                    }
                    Err(err) => dispatch_global_message(Message::RegisterFailed(err)),
                }
            });
        }

        Command::Logout { token } => {
            let auth = api().auth;
            spawn_local(async move {
                // Best-effort; the local session is already gone.
                if let Err(err) = auth.logout(&token).await {
                    log::debug!("server-side logout failed: {}", err);
                }
                dispatch_global_message(Message::LogoutCompleted);
            });
        }

        Command::ChangePassword {
            old_password,
            new_password,
        } => {
            let auth = api().auth;
            spawn_local(async move {
                match auth.change_password(&old_password, &new_password).await {
                    Ok(()) => dispatch_global_message(Message::PasswordChanged),
                    Err(err) => {
                        if !matches!(err, ApiError::Unauthorized) {
                            dispatch_global_message(Message::PasswordChangeFailed {
                                message: err.user_message("Failed to change password"),
                            });
                        }
                    }
                }
            });
        }

        // -- agents --------------------------------------------------------
        Command::FetchAgents { epoch } => {
            let agents = api().agents;
            spawn_local(async move {
                let result = agents
                    .list()
                    .await
                    .map_err(|e| e.user_message("Failed to fetch agents"));
                dispatch_global_message(Message::AgentsLoaded { epoch, result });
            });
        }

        Command::CreateAgent(payload) => {
            let agents = api().agents;
            spawn_local(async move {
                match agents.create(&payload).await {
                    Ok(agent) => dispatch_global_message(Message::AgentCreated(Box::new(agent))),
                    Err(err) => {
                        if let Some(msg) = mutation_failure(err, "Failed to create agent") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::UpdateAgent { agent_id, payload } => {
            let agents = api().agents;
            spawn_local(async move {
                match agents.update(&agent_id, &payload).await {
                    Ok(agent) => dispatch_global_message(Message::AgentUpdated(Box::new(agent))),
                    Err(err) => {
                        if let Some(msg) = mutation_failure(err, "Failed to update agent") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::DeleteAgent { agent_id } => {
            let agents = api().agents;
            spawn_local(async move {
                match agents.delete(&agent_id).await {
                    Ok(()) => dispatch_global_message(Message::AgentDeleted { agent_id }),
                    Err(err) => {
                        if let Some(msg) = mutation_failure(err, "Failed to delete agent") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::StartAgent { agent_id } => {
            let agents = api().agents;
            spawn_local(async move {
                match agents.start(&agent_id).await {
                    Ok(agent) => dispatch_global_message(Message::AgentUpdated(Box::new(agent))),
                    Err(err) => {
                        if let Some(msg) = mutation_failure(err, "Failed to start agent") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::StopAgent { agent_id } => {
            let agents = api().agents;
            spawn_local(async move {
                match agents.stop(&agent_id).await {
                    Ok(agent) => dispatch_global_message(Message::AgentUpdated(Box::new(agent))),
                    Err(err) => {
                        if let Some(msg) = mutation_failure(err, "Failed to stop agent") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::FetchAgentLogs { agent_id, epoch } => {
            let agents = api().agents;
            spawn_local(async move {
                let result = agents
                    .logs(&agent_id, crate::constants::DEFAULT_LOG_LIMIT)
                    .await
                    .map_err(|e| e.user_message("Failed to fetch agent logs"));
                dispatch_global_message(Message::AgentLogsLoaded { epoch, result });
            });
        }

        // -- workflows -----------------------------------------------------
        Command::FetchWorkflows { epoch } => {
            let workflows = api().workflows;
            spawn_local(async move {
                let result = workflows
                    .list()
                    .await
                    .map_err(|e| e.user_message("Failed to fetch workflows"));
                dispatch_global_message(Message::WorkflowsLoaded { epoch, result });
            });
        }

        Command::CreateWorkflow(payload) => {
            let workflows = api().workflows;
            spawn_local(async move {
                match workflows.create(&payload).await {
                    Ok(workflow) => {
                        dispatch_global_message(Message::WorkflowCreated(Box::new(workflow)))
                    }
                    Err(err) => {
                        if let Some(msg) = workflow_failure(err, "Failed to create workflow") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::UpdateWorkflow {
            workflow_id,
            payload,
        } => {
            let workflows = api().workflows;
            spawn_local(async move {
                match workflows.update(&workflow_id, &payload).await {
                    Ok(workflow) => {
                        dispatch_global_message(Message::WorkflowUpdated(Box::new(workflow)))
                    }
                    Err(err) => {
                        if let Some(msg) = workflow_failure(err, "Failed to update workflow") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::DeleteWorkflow { workflow_id } => {
            let workflows = api().workflows;
            spawn_local(async move {
                match workflows.delete(&workflow_id).await {
                    Ok(()) => dispatch_global_message(Message::WorkflowDeleted { workflow_id }),
                    Err(err) => {
                        if let Some(msg) = workflow_failure(err, "Failed to delete workflow") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::RunWorkflow { workflow_id } => {
            let workflows = api().workflows;
            spawn_local(async move {
                match workflows.run(&workflow_id).await {
                    Ok(workflow) => {
                        dispatch_global_message(Message::WorkflowUpdated(Box::new(workflow)))
                    }
                    Err(err) => {
                        if let Some(msg) = workflow_failure(err, "Failed to run workflow") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        Command::PauseWorkflow { workflow_id } => {
            let workflows = api().workflows;
            spawn_local(async move {
                match workflows.pause(&workflow_id).await {
                    Ok(workflow) => {
                        dispatch_global_message(Message::WorkflowUpdated(Box::new(workflow)))
                    }
                    Err(err) => {
                        if let Some(msg) = workflow_failure(err, "Failed to pause workflow") {
                            dispatch_global_message(msg);
                        }
                    }
                }
            });
        }

        // -- monitoring ----------------------------------------------------
        Command::FetchMonitoring { epoch } => {
            let monitoring = api().monitoring;
            spawn_local(async move {
                let result = async {
                    let overview = monitoring.overview().await?;
                    let stats = monitoring.stats().await?;
                    let health = monitoring.health().await?;
                    Ok::<_, ApiError>((overview, stats, health))
                }
                .await
                .map_err(|e| e.user_message("Failed to fetch monitoring data"));
                dispatch_global_message(Message::MonitoringLoaded { epoch, result });
            });
        }

        Command::FetchLogs { epoch, limit } => {
            let monitoring = api().monitoring;
            spawn_local(async move {
                let result = monitoring
                    .logs(limit)
                    .await
                    .map_err(|e| e.user_message("Failed to fetch logs"));
                dispatch_global_message(Message::LogsLoaded { epoch, result });
            });
        }
    }
}
