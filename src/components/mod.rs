pub mod forms;
pub mod navbar;
