// studyforge - Explanation cache and content segmentation service
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod generation;
pub mod metrics;
pub mod server;
pub mod services;
pub mod utils;
