// HTTP text-generation client with retry
// Author: kelexine (https://github.com/kelexine)

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorResponse};
use super::{GenerationRequest, TextGenerator};
use crate::config::GenerationConfig;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::utils::logging::sanitize;
use crate::utils::retry::{parse_retry_after, with_retry, UpstreamFailure};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for an OpenAI-compatible chat completions API.
///
/// Sends one prompt per call, retrying rate limits and transient upstream
/// failures with backoff.
pub struct HttpGenerator {
    http_client: Client,
    config: GenerationConfig,
    sanitize_logs: bool,
}

impl HttpGenerator {
    /// Build the HTTP client. No request is made until the first `generate`.
    pub fn new(config: &GenerationConfig, sanitize_logs: bool) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created generation HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            config: config.clone(),
            sanitize_logs,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base_url.trim_end_matches('/'))
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(response_text)
            .ok()?
            .error
            .and_then(|error| error.message.or(error.error_type))
    }

    fn scrub(&self, text: &str) -> String {
        if self.sanitize_logs {
            sanitize(text)
        } else {
            text.to_string()
        }
    }

    async fn send_once(&self, url: &str, body: &[u8]) -> std::result::Result<String, UpstreamFailure> {
        let mut request = self
            .http_client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamFailure::new(500, format!("HTTP error: {}", e)))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_retry_after);
        let response_text = response.text().await.map_err(|e| {
            UpstreamFailure::new(502, format!("Failed to read response body (HTTP {}): {}", status, e))
        })?;

        if !status.is_success() {
            let message =
                Self::extract_error_message(&response_text).unwrap_or(response_text);
            return Err(UpstreamFailure::new(status.as_u16(), message).with_retry_after(retry_after));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| UpstreamFailure::new(502, format!("Invalid response: {}", e)))?;

        parsed
            .into_text()
            .ok_or_else(|| UpstreamFailure::new(502, "Response contained no text"))
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let url = self.endpoint();

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = serde_json::to_vec(&ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
        })?;

        debug!(
            "Calling chat completions for task={} model={} prompt_chars={}",
            request.task,
            self.config.model,
            request.prompt.len()
        );

        let started = Instant::now();
        let url_ref = url.as_str();
        let body_ref = body.as_slice();
        let result = with_retry(&request.task, self.config.max_retries, || async move {
            self.send_once(url_ref, body_ref).await
        })
        .await;
        let elapsed = started.elapsed().as_secs_f64();

        metrics::record_generation(&request.task, result.is_ok(), elapsed);

        result.map_err(|failure| {
            let body = self.scrub(&failure.body);
            error!(
                "Generation failed for task={} status={}: {}",
                request.task, failure.status, body
            );
            match failure.status {
                429 => AppError::TooManyRequests(body),
                503 | 504 => AppError::ServiceUnavailable(format!("Upstream unavailable: {}", body)),
                401 | 403 => AppError::Generation(format!("Upstream rejected credentials: {}", body)),
                status => AppError::Generation(format!("HTTP {}: {}", status, body)),
            }
        })
    }

    fn describe(&self) -> String {
        format!("{} via {}", self.config.model, self.config.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        assert_eq!(
            HttpGenerator::extract_error_message(body).as_deref(),
            Some("Rate limit reached")
        );
        assert_eq!(HttpGenerator::extract_error_message("not json"), None);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GenerationConfig {
            api_base_url: "http://localhost:9000/v1/".to_string(),
            ..GenerationConfig::default()
        };
        let generator = HttpGenerator::new(&config, true).unwrap();
        assert_eq!(generator.endpoint(), "http://localhost:9000/v1/chat/completions");
    }
}
