// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! AI server integration
//!
//! This module provides an implementation of the `ApiClient` trait for the AI
//! server that backs NPC chat and material generation. Payloads are forwarded
//! verbatim as JSON and the response body is relayed back to the game client
//! unchanged; the backend adds authentication and timeouts only.

use std::time::Duration;

use api_client::{ApiClient, ApiError, HealthStatus};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Configuration for the AI server client
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL for the AI server
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Request timeout in seconds (generation can be slow)
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            api_key: "test-api-key".to_string(),
            timeout_seconds: 60,
            health_check_timeout_seconds: 5,
        }
    }
}

/// AI server client implementation
#[derive(Debug)]
pub struct AiClient {
    client: Client,
    config: AiConfig,
}

/// Errors specific to the AI server client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("AI server error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl From<AiError> for ApiError {
    fn from(value: AiError) -> Self {
        match value {
            AiError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            AiError::ApiError { status, message } => ApiError::Custom {
                error: anyhow::Error::msg(format!("{status}: {message}")),
            },
            AiError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 3,
            },
            AiError::Unauthorized => ApiError::Authentication {
                message: value.to_string(),
            },
            AiError::Config(message) => ApiError::Configuration { message },
            AiError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

impl AiClient {
    /// Create a new AI server client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or configuration is invalid
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::Config("API key cannot be empty".to_string()));
        }

        if config.base_url.trim().is_empty() {
            return Err(AiError::Config("Base URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("game-api/0.1.0")
            .build()
            .map_err(AiError::Http)?;

        Ok(Self { client, config })
    }

    /// Forward an NPC chat payload and relay the response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the server rejects it
    pub async fn npc_chat(&self, payload: &serde_json::Value) -> Result<serde_json::Value, AiError> {
        self.forward("npc/chat", payload).await
    }

    /// Forward a material generation payload and relay the response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the server rejects it
    pub async fn generate_material(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, AiError> {
        self.forward("material/generate", payload).await
    }

    /// POST a payload to the given path and parse the JSON response verbatim
    async fn forward(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, AiError> {
        let url = format!("{}/{}", self.config.base_url, path);
        debug!(url, "forwarding payload to AI server");

        let request = self
            .client
            .post(&url)
            .json(payload)
            .header("X-API-Key", &self.config.api_key)
            .header("accept", "application/json");

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| AiError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(AiError::Http)?;

        match response.status() {
            StatusCode::OK => {
                let body: serde_json::Value = response.json().await.map_err(AiError::Http)?;
                Ok(body)
            }
            StatusCode::UNAUTHORIZED => Err(AiError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(AiError::RateLimited),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("AI server error: {} - {}", status.as_u16(), error_text);
                Err(AiError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }
}

impl ApiClient for AiClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/health", self.config.base_url);

        debug!(url, "performing health check on AI server");

        let request = self
            .client
            .get(&url)
            .header("X-API-Key", &self.config.api_key)
            .header("accept", "application/json");

        let start_time = std::time::Instant::now();
        let response = timeout(
            Duration::from_secs(self.config.health_check_timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| AiError::Timeout {
            seconds: start_time.elapsed().as_secs(),
        })?
        .map_err(AiError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            StatusCode::OK => {
                info!("AI server health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::UNAUTHORIZED => {
                warn!("AI server health check failed: unauthorized");
                Ok(HealthStatus::Down {
                    reason: "Authentication failed".to_string(),
                })
            }
            status => {
                warn!("AI server health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "ai"
    }
}
