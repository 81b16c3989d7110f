//! # momentos-api
//!
//! HTTP API layer for Momentos built on Axum.
//!
//! Provides the REST endpoints under `/api`, the media file service,
//! middleware (CORS, request logging), extractors for the session user,
//! pagination and mixed JSON/multipart forms, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
