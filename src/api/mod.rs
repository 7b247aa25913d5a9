//! HTTP API for the login gateway

pub mod auth_handlers;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
