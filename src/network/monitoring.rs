//! REST client for the `/monitoring/*` endpoints. All records are
//! display-only; nothing here is mutated client-side.

use std::rc::Rc;

use super::http::{decode, ApiError, HttpClient};
use crate::models::{HealthStatus, LogRecord, MonitoringOverview, SystemStats};

#[derive(Clone)]
pub struct MonitoringClient {
    http: Rc<HttpClient>,
}

impl MonitoringClient {
    pub fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn overview(&self) -> Result<MonitoringOverview, ApiError> {
        let body = self.http.get("/monitoring/").await?;
        decode(&body)
    }

    pub async fn stats(&self) -> Result<SystemStats, ApiError> {
        let body = self.http.get("/monitoring/stats/").await?;
        decode(&body)
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let body = self.http.get("/monitoring/health/").await?;
        decode(&body)
    }

    pub async fn logs(&self, limit: u32) -> Result<Vec<LogRecord>, ApiError> {
        let body = self.http.get(&format!("/monitoring/logs/?limit={}", limit)).await?;
        decode(&body)
    }
}
