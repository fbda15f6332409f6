//! Utility functions and helpers for studyforge.
//!
//! This module provides cross-cutting concerns like structured logging,
//! secret scrubbing, and retry logic with backoff for generation calls.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and log sanitization.
//! - `retry`: Retry mechanisms that respect upstream `Retry-After` hints.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
