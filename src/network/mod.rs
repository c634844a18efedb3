pub mod agents;
pub mod auth;
pub mod config;
pub mod http;
pub mod monitoring;
pub mod workflows;

pub use agents::AgentsClient;
pub use auth::AuthClient;
pub use config::ApiConfig;
pub use http::{ApiError, HttpClient};
pub use monitoring::MonitoringClient;
pub use workflows::WorkflowsClient;

use std::rc::Rc;

/// The injected set of resource clients, built once at startup from
/// [`ApiConfig`] and stored in the application state. Cheap to clone —
/// everything shares one [`HttpClient`].
#[derive(Clone)]
pub struct ApiHandles {
    pub agents: AgentsClient,
    pub workflows: WorkflowsClient,
    pub monitoring: MonitoringClient,
    pub auth: AuthClient,
}

impl ApiHandles {
    pub fn new(config: ApiConfig) -> Self {
        let http = Rc::new(HttpClient::new(config));
        Self {
            agents: AgentsClient::new(Rc::clone(&http)),
            workflows: WorkflowsClient::new(Rc::clone(&http)),
            monitoring: MonitoringClient::new(Rc::clone(&http)),
            auth: AuthClient::new(http),
        }
    }
}
