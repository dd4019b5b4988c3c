pub mod auth;
pub mod employees;
pub mod handlers;
pub mod initialization;
pub mod middleware;
pub mod tracing;
