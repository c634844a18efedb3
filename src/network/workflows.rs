//! REST client for the `/workflows/` resource.

use std::rc::Rc;

use super::http::{decode, ApiError, HttpClient};
use crate::models::{Workflow, WorkflowCreate, WorkflowUpdate};

#[derive(Clone)]
pub struct WorkflowsClient {
    http: Rc<HttpClient>,
}

impl WorkflowsClient {
    pub fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Workflow>, ApiError> {
        let body = self.http.get("/workflows/").await?;
        decode(&body)
    }

    pub async fn get(&self, id: &str) -> Result<Workflow, ApiError> {
        let body = self.http.get(&format!("/workflows/{}/", id)).await?;
        decode(&body)
    }

    pub async fn create(&self, payload: &WorkflowCreate) -> Result<Workflow, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self.http.post("/workflows/", Some(json)).await?;
        decode(&body)
    }

    pub async fn update(&self, id: &str, payload: &WorkflowUpdate) -> Result<Workflow, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self.http.put(&format!("/workflows/{}/", id), json).await?;
        decode(&body)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&format!("/workflows/{}/", id)).await?;
        Ok(())
    }

    /// Kick off a run. Returns the refreshed record.
    pub async fn run(&self, id: &str) -> Result<Workflow, ApiError> {
        let body = self.http.post(&format!("/workflows/{}/run/", id), None).await?;
        decode(&body)
    }

    /// Pause a running workflow. Returns the refreshed record.
    pub async fn pause(&self, id: &str) -> Result<Workflow, ApiError> {
        let body = self.http.post(&format!("/workflows/{}/pause/", id), None).await?;
        decode(&body)
    }
}
