pub mod agents;
pub mod monitoring;
pub mod session;
pub mod workflows;
