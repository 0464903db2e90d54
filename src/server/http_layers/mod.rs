mod random_slowdown;
mod requests_logging;

#[allow(unused_imports)] // Wired in behind the slowdown feature
pub use random_slowdown::slowdown_request;
pub use requests_logging::{log_requests, RequestsLoggingLevel};
