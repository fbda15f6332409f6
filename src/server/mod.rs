//! Axum-based HTTP server implementation for studyforge.
//!
//! This module exposes the explanation cache and the content pipeline to the
//! web front end, and serves health and Prometheus endpoints.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints.
//! - `middleware`: Request ID tracking and request metrics.
//! - `routes`: Shared state and the router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
