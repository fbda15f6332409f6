// Text-generation client module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod models;

pub use client::HttpGenerator;
pub use models::GenerationRequest;

use crate::error::Result;
use async_trait::async_trait;

/// A service that turns a prompt into text.
///
/// The HTTP implementation talks to an OpenAI-compatible API; tests and
/// offline tools plug in their own.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;

    /// Short description for health reporting.
    fn describe(&self) -> String {
        "custom generator".to_string()
    }
}
