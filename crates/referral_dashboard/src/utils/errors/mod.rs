pub mod app_error;
pub mod dashboard_error;
pub mod error_payload;
