//! Typed records mirroring the backend schema.
//!
//! Every REST response is decoded into one of these structs at the network
//! edge, so a malformed body fails fast as a decode error instead of leaking
//! missing fields into the UI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Training,
    Error,
    Paused,
}

impl AgentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatus::Active => "Active",
            AgentStatus::Inactive => "Inactive",
            AgentStatus::Training => "Training",
            AgentStatus::Error => "Error",
            AgentStatus::Paused => "Paused",
        }
    }

    /// CSS class suffix for status badges.
    pub fn css_class(&self) -> &'static str {
        match self {
            AgentStatus::Active => "status-active",
            AgentStatus::Inactive => "status-inactive",
            AgentStatus::Training => "status-training",
            AgentStatus::Error => "status-error",
            AgentStatus::Paused => "status-paused",
        }
    }
}

/// Generation settings attached to an agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(default)]
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
            system_prompt: String::new(),
        }
    }
}

/// An agent as stored by the backend. The client only ever holds a transient
/// cached copy; the backend owns the record's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agent_type: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub config: AgentConfig,
    pub status: AgentStatus,
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: u64,
    #[serde(default)]
    pub failed_executions: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_active_at: Option<String>,
}

/// Payload for creating a new agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentCreate {
    pub name: String,
    pub description: String,
    pub agent_type: String,
    pub model: String,
    pub config: AgentConfig,
}

/// Partial update; `None` fields are left untouched by the backend and by
/// [`AgentUpdate::apply`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<AgentConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
}

impl AgentUpdate {
    /// Merge this partial into an existing record. The `id` and counters are
    /// backend-owned and never change here.
    pub fn apply(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(description) = &self.description {
            agent.description = description.clone();
        }
        if let Some(agent_type) = &self.agent_type {
            agent.agent_type = agent_type.clone();
        }
        if let Some(model) = &self.model {
            agent.model = model.clone();
        }
        if let Some(config) = &self.config {
            agent.config = config.clone();
        }
        if let Some(status) = self.status {
            agent.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Running,
    Paused,
    Error,
    Completed,
    Scheduled,
}

impl WorkflowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStatus::Running => "Running",
            WorkflowStatus::Paused => "Paused",
            WorkflowStatus::Error => "Error",
            WorkflowStatus::Completed => "Completed",
            WorkflowStatus::Scheduled => "Scheduled",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub total_runs: u64,
    #[serde(default)]
    pub successful_runs: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowCreate {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkflowUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkflowStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl WorkflowUpdate {
    pub fn apply(&self, workflow: &mut Workflow) {
        if let Some(name) = &self.name {
            workflow.name = name.clone();
        }
        if let Some(description) = &self.description {
            workflow.description = description.clone();
        }
        if let Some(status) = self.status {
            workflow.status = status;
        }
        if let Some(tags) = &self.tags {
            workflow.tags = tags.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Session / user
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub timezone: String,
}

/// The authenticated user. Held only in memory; the persisted artefact is the
/// opaque bearer token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
    pub created_at: Option<String>,
    #[serde(default)]
    pub profile: UserProfile,
}

impl CurrentUser {
    /// Name to show in the navbar: full name when present, email otherwise.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful login/register body: `{token, user, message}`.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: CurrentUser,
    #[serde(default)]
    pub message: String,
}

/// Normalized auth failure: a banner message plus per-field errors suitable
/// for inline rendering. Never raised as an exception to call sites.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Monitoring (display-only records)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MonitoringOverview {
    pub agents_count: u64,
    pub workflows_count: u64,
    #[serde(default)]
    pub db_status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SystemStats {
    pub agents: u64,
    pub workflows: u64,
    #[serde(default)]
    pub db_vendor: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub level: String,
    #[serde(default)]
    pub source: String,
    pub message: String,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent() -> Agent {
        Agent {
            id: "a-1".into(),
            name: "researcher".into(),
            description: "digs through feeds".into(),
            agent_type: "analysis".into(),
            model: "gpt-4o".into(),
            config: AgentConfig::default(),
            status: AgentStatus::Inactive,
            total_executions: 10,
            successful_executions: 9,
            failed_executions: 1,
            created_at: Some("2024-01-01T00:00:00Z".into()),
            updated_at: None,
            last_active_at: None,
        }
    }

    #[test]
    fn agent_update_merges_only_given_fields() {
        let mut agent = sample_agent();
        let update = AgentUpdate {
            name: Some("renamed".into()),
            status: Some(AgentStatus::Active),
            ..Default::default()
        };
        update.apply(&mut agent);

        assert_eq!(agent.id, "a-1");
        assert_eq!(agent.name, "renamed");
        assert_eq!(agent.status, AgentStatus::Active);
        // Unspecified fields untouched.
        assert_eq!(agent.description, "digs through feeds");
        assert_eq!(agent.total_executions, 10);
    }

    #[test]
    fn agent_update_serializes_sparse() {
        let update = AgentUpdate {
            model: Some("gpt-4o-mini".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"model":"gpt-4o-mini"}"#);
    }

    #[test]
    fn agent_status_round_trips_lowercase() {
        let agent: Agent = serde_json::from_str(
            r#"{"id":"x","name":"n","status":"training"}"#,
        )
        .unwrap();
        assert_eq!(agent.status, AgentStatus::Training);
        let json = serde_json::to_string(&agent).unwrap();
        assert!(json.contains(r#""status":"training""#));
    }

    #[test]
    fn malformed_agent_fails_to_decode() {
        // Unknown status variant must not silently pass through.
        let res = serde_json::from_str::<Agent>(
            r#"{"id":"x","name":"n","status":"exploded"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: CurrentUser = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.io","avatar":null,"created_at":null}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "a@b.io");
    }
}
