pub mod agents;
pub mod dashboard;
pub mod login;
pub mod marketing;
pub mod monitoring;
pub mod not_found;
pub mod register;
pub mod settings;
pub mod workflows;
