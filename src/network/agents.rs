//! REST client for the `/agents/` resource. One HTTP call per operation;
//! bodies are decoded into typed records at this edge.

use std::rc::Rc;

use super::http::{decode, ApiError, HttpClient};
use crate::models::{Agent, AgentCreate, AgentUpdate, LogRecord};

#[derive(Clone)]
pub struct AgentsClient {
    http: Rc<HttpClient>,
}

impl AgentsClient {
    pub fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Agent>, ApiError> {
        let body = self.http.get("/agents/").await?;
        decode(&body)
    }

    pub async fn get(&self, id: &str) -> Result<Agent, ApiError> {
        let body = self.http.get(&format!("/agents/{}/", id)).await?;
        decode(&body)
    }

    pub async fn create(&self, payload: &AgentCreate) -> Result<Agent, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self.http.post("/agents/", Some(json)).await?;
        decode(&body)
    }

    pub async fn update(&self, id: &str, payload: &AgentUpdate) -> Result<Agent, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self.http.put(&format!("/agents/{}/", id), json).await?;
        decode(&body)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&format!("/agents/{}/", id)).await?;
        Ok(())
    }

    /// Transition the agent to active. Returns the refreshed record.
    pub async fn start(&self, id: &str) -> Result<Agent, ApiError> {
        let body = self.http.post(&format!("/agents/{}/start/", id), None).await?;
        decode(&body)
    }

    /// Transition the agent to paused. Returns the refreshed record.
    pub async fn stop(&self, id: &str) -> Result<Agent, ApiError> {
        let body = self.http.post(&format!("/agents/{}/stop/", id), None).await?;
        decode(&body)
    }

    pub async fn logs(&self, id: &str, limit: u32) -> Result<Vec<LogRecord>, ApiError> {
        let body = self
            .http
            .get(&format!("/agents/{}/logs/?limit={}", id, limit))
            .await?;
        decode(&body)
    }
}
