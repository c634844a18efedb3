//! Message and command types for the dispatch loop.
//!
//! A [`Message`] describes something that happened (user input, a response
//! arriving, a browser event). The reducers turn messages into state changes
//! plus [`Command`]s; commands are the only place side effects run.

use crate::models::{
    Agent, AgentCreate, AgentUpdate, AuthError, AuthResponse, CurrentUser, HealthStatus,
    LogRecord, LoginRequest, MonitoringOverview, RegisterRequest, SystemStats, Workflow,
    WorkflowCreate, WorkflowUpdate,
};
use crate::router::Route;
use crate::theme::ThemeMode;

pub enum Message {
    // -- routing ----------------------------------------------------------
    /// User-initiated navigation; pushes a history entry.
    Navigate(Route),
    /// The URL changed underneath us (popstate / initial load).
    RouteChanged(Route),

    // -- session ----------------------------------------------------------
    /// Startup with a stored token: validate it against `/auth/me/`.
    BootstrapSession,
    CurrentUserLoaded(Box<CurrentUser>),
    /// The stored token did not validate at startup.
    BootstrapFailed,
    /// Any request got a 401; token storage is already cleared.
    SessionExpired,
    SubmitLogin(LoginRequest),
    LoginSucceeded(Box<AuthResponse>),
    LoginFailed(AuthError),
    SubmitRegister(Box<RegisterRequest>),
    RegisterSucceeded(Box<AuthResponse>),
    RegisterFailed(AuthError),
    RequestLogout,
    LogoutCompleted,
    SubmitPasswordChange {
        old_password: String,
        new_password: String,
    },
    PasswordChanged,
    PasswordChangeFailed { message: String },

    // -- theme ------------------------------------------------------------
    SetThemeMode(ThemeMode),
    OsPreferenceChanged { prefers_dark: bool },

    // -- agents -----------------------------------------------------------
    RefreshAgents,
    AgentsLoaded {
        epoch: u64,
        result: Result<Vec<Agent>, String>,
    },
    SubmitAgentCreate(Box<AgentCreate>),
    AgentCreated(Box<Agent>),
    SubmitAgentUpdate {
        agent_id: String,
        update: Box<AgentUpdate>,
    },
    /// Result of an update or a start/stop transition.
    AgentUpdated(Box<Agent>),
    RequestAgentDeletion { agent_id: String },
    AgentDeleted { agent_id: String },
    StartAgent { agent_id: String },
    StopAgent { agent_id: String },
    /// Any agent mutation failed; `message` is already user-facing.
    AgentActionFailed { message: String },
    /// Open the log panel for one agent and fetch its recent entries.
    ViewAgentLogs { agent_id: String },
    AgentLogsLoaded {
        epoch: u64,
        result: Result<Vec<LogRecord>, String>,
    },
    CloseAgentLogs,

    // -- workflows --------------------------------------------------------
    RefreshWorkflows,
    WorkflowsLoaded {
        epoch: u64,
        result: Result<Vec<Workflow>, String>,
    },
    SubmitWorkflowCreate(Box<WorkflowCreate>),
    WorkflowCreated(Box<Workflow>),
    SubmitWorkflowUpdate {
        workflow_id: String,
        update: Box<WorkflowUpdate>,
    },
    WorkflowUpdated(Box<Workflow>),
    RequestWorkflowDeletion { workflow_id: String },
    WorkflowDeleted { workflow_id: String },
    RunWorkflow { workflow_id: String },
    PauseWorkflow { workflow_id: String },
    WorkflowActionFailed { message: String },

    // -- monitoring -------------------------------------------------------
    RefreshMonitoring,
    MonitoringLoaded {
        epoch: u64,
        result: Result<(MonitoringOverview, SystemStats, HealthStatus), String>,
    },
    RefreshLogs { limit: u32 },
    LogsLoaded {
        epoch: u64,
        result: Result<Vec<LogRecord>, String>,
    },
}

/// Side effects scheduled by the reducers and executed after the state
/// borrow is released.
pub enum Command {
    /// Feed another message straight back into the loop.
    SendMessage(Message),
    /// Arbitrary DOM work that must run outside the reducer.
    UpdateUI(Box<dyn FnOnce()>),
    /// Push a history entry, then route.
    NavigateTo(Route),

    FetchCurrentUser,
    Login(LoginRequest),
    Register(Box<RegisterRequest>),
    /// Carries the token snapshot taken before local storage was cleared.
    Logout { token: String },
    ChangePassword {
        old_password: String,
        new_password: String,
    },

    FetchAgents { epoch: u64 },
    CreateAgent(Box<AgentCreate>),
    UpdateAgent {
        agent_id: String,
        payload: Box<AgentUpdate>,
    },
    DeleteAgent { agent_id: String },
    StartAgent { agent_id: String },
    StopAgent { agent_id: String },
    FetchAgentLogs { agent_id: String, epoch: u64 },

    FetchWorkflows { epoch: u64 },
    CreateWorkflow(Box<WorkflowCreate>),
    UpdateWorkflow {
        workflow_id: String,
        payload: Box<WorkflowUpdate>,
    },
    DeleteWorkflow { workflow_id: String },
    RunWorkflow { workflow_id: String },
    PauseWorkflow { workflow_id: String },

    FetchMonitoring { epoch: u64 },
    FetchLogs { epoch: u64, limit: u32 },

    NoOp,
}

impl Command {
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }

    pub fn update_ui<F: FnOnce() + 'static>(f: F) -> Self {
        Command::UpdateUI(Box::new(f))
    }
}
