//! HTTP request handlers for the token service.

pub mod health_handler;
pub mod metrics_handler;
pub mod token_handler;

pub use health_handler::{health_check, service_info};
pub use metrics_handler::metrics_handler;
pub use token_handler::{handle_issue_token, method_not_allowed};
