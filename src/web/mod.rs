//! Web API module for Filedeck.
//!
//! This module exposes the explorer over HTTP: a JSON API under `/api`,
//! raw file content under `/files`, a health check and the OpenAPI docs.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::create_router;
pub use server::WebServer;
