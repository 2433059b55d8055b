// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain server integration
//!
//! This module provides an implementation of the `ApiClient` trait for the
//! blockchain server that custodies the game's NFTs. The backend never signs
//! transactions itself; mint, burn, lock, and transfer are forwarded to this
//! service and the returned token ids are persisted onto ownership rows.

use std::time::Duration;

use alloy_primitives::Address;
use api_client::{ApiClient, ApiError, HealthStatus, MintReceipt, TokenMetadata, WalletToken};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::time::timeout;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{debug, info, warn};

/// Configuration for the blockchain server client
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Base URL for the blockchain server
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
    /// Maximum number of retry attempts for idempotent reads
    pub max_retries: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8545".to_string(),
            api_key: "test-api-key".to_string(),
            timeout_seconds: 30,
            health_check_timeout_seconds: 5,
            max_retries: 3,
        }
    }
}

/// Blockchain server client implementation
#[derive(Debug)]
pub struct ChainClient {
    client: Client,
    config: ChainConfig,
}

/// Errors specific to the blockchain server client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ChainError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response
    #[error("chain server error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Requested token does not exist on-chain
    #[error("token not found: {token_id}")]
    TokenNotFound { token_id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl From<ChainError> for ApiError {
    fn from(value: ChainError) -> Self {
        match value {
            ChainError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            ChainError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            ChainError::ApiError { status, message } => ApiError::Custom {
                error: anyhow::Error::msg(format!("{status}: {message}")),
            },
            ChainError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 3,
            },
            ChainError::Unauthorized => ApiError::Authentication {
                message: value.to_string(),
            },
            ChainError::TokenNotFound { .. } => ApiError::InvalidResponse {
                message: value.to_string(),
            },
            ChainError::Config(message) => ApiError::Configuration { message },
            ChainError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

/// Response structure for the wallet tokens endpoint
#[derive(Debug, Deserialize)]
pub struct WalletTokensResponse {
    /// Tokens owned by the queried wallet
    pub result: Vec<WalletToken>,
}

/// Response structure for burn/lock/transfer acknowledgements
#[derive(Debug, Deserialize)]
pub struct TxAck {
    /// Transaction hash of the submitted operation
    pub tx_hash: String,
}

impl ChainClient {
    /// Create a new blockchain server client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or configuration is invalid
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        if config.api_key.trim().is_empty() {
            return Err(ChainError::Config("API key cannot be empty".to_string()));
        }

        if config.base_url.trim().is_empty() {
            return Err(ChainError::Config("Base URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("game-api/0.1.0")
            .build()
            .map_err(ChainError::Http)?;

        Ok(Self { client, config })
    }

    /// Mint an NFT for a wallet with the given metadata snapshot
    ///
    /// Mint is not idempotent and is never retried; a timeout or transport
    /// error surfaces to the caller with no token id persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the server rejects it
    pub async fn mint_token(
        &self,
        wallet: Address,
        metadata: &TokenMetadata,
    ) -> Result<MintReceipt, ChainError> {
        if wallet == Address::ZERO {
            return Err(ChainError::Config(
                "cannot mint to the zero address".to_string(),
            ));
        }

        let url = format!("{}/nft/mint", self.config.base_url);
        debug!(url, %wallet, item = %metadata.display_name(), "minting NFT");

        let body = json!({
            "wallet": wallet,
            "metadata": metadata,
        });

        let response = self.send_json(&url, &body).await?;
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let receipt: MintReceipt = response.json().await.map_err(ChainError::Http)?;
                info!(token_id = %receipt.token_id, tx_hash = %receipt.tx_hash, "mint confirmed");
                Ok(receipt)
            }
            status => Err(Self::error_from_status(status, response).await),
        }
    }

    /// Burn a minted token
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if the server does not know the token id
    pub async fn burn_token(&self, token_id: &str) -> Result<TxAck, ChainError> {
        let url = format!("{}/nft/burn", self.config.base_url);
        debug!(url, token_id, "burning NFT");

        let body = json!({ "token_id": token_id });
        let response = self.send_json(&url, &body).await?;
        match response.status() {
            StatusCode::OK => {
                let ack: TxAck = response.json().await.map_err(ChainError::Http)?;
                info!(token_id, tx_hash = %ack.tx_hash, "burn confirmed");
                Ok(ack)
            }
            StatusCode::NOT_FOUND => Err(ChainError::TokenNotFound {
                token_id: token_id.to_string(),
            }),
            status => Err(Self::error_from_status(status, response).await),
        }
    }

    /// Lock or unlock a token against transfers
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if the server does not know the token id
    pub async fn lock_token(&self, token_id: &str, locked: bool) -> Result<TxAck, ChainError> {
        let url = format!("{}/nft/lock", self.config.base_url);
        debug!(url, token_id, locked, "updating NFT lock state");

        let body = json!({ "token_id": token_id, "locked": locked });
        let response = self.send_json(&url, &body).await?;
        match response.status() {
            StatusCode::OK => {
                let ack: TxAck = response.json().await.map_err(ChainError::Http)?;
                Ok(ack)
            }
            StatusCode::NOT_FOUND => Err(ChainError::TokenNotFound {
                token_id: token_id.to_string(),
            }),
            status => Err(Self::error_from_status(status, response).await),
        }
    }

    /// Transfer a token to another wallet
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if the server does not know the token id
    pub async fn transfer_token(
        &self,
        token_id: &str,
        to_wallet: Address,
    ) -> Result<TxAck, ChainError> {
        if to_wallet == Address::ZERO {
            return Err(ChainError::Config(
                "cannot transfer to the zero address".to_string(),
            ));
        }

        let url = format!("{}/nft/transfer", self.config.base_url);
        debug!(url, token_id, %to_wallet, "transferring NFT");

        let body = json!({ "token_id": token_id, "to": to_wallet });
        let response = self.send_json(&url, &body).await?;
        match response.status() {
            StatusCode::OK => {
                let ack: TxAck = response.json().await.map_err(ChainError::Http)?;
                info!(token_id, tx_hash = %ack.tx_hash, "transfer confirmed");
                Ok(ack)
            }
            StatusCode::NOT_FOUND => Err(ChainError::TokenNotFound {
                token_id: token_id.to_string(),
            }),
            status => Err(Self::error_from_status(status, response).await),
        }
    }

    /// List the token ids owned by a wallet
    ///
    /// This read is idempotent and retried with exponential backoff up to
    /// `max_retries` attempts before the error surfaces.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the response cannot be parsed
    pub async fn wallet_tokens(&self, wallet: Address) -> Result<Vec<WalletToken>, ChainError> {
        let url = format!("{}/wallet/{}/tokens", self.config.base_url, wallet);
        debug!(url, %wallet, "fetching wallet tokens");

        let strategy = ExponentialBackoff::from_millis(100)
            .factor(2)
            .take(self.config.max_retries as usize);

        Retry::spawn(strategy, || self.fetch_wallet_tokens_once(&url)).await
    }

    async fn fetch_wallet_tokens_once(&self, url: &str) -> Result<Vec<WalletToken>, ChainError> {
        let request = self
            .client
            .get(url)
            .header("X-API-Key", &self.config.api_key)
            .header("accept", "application/json");

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| ChainError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(ChainError::Http)?;

        match response.status() {
            StatusCode::OK => {
                let tokens: WalletTokensResponse =
                    response.json().await.map_err(ChainError::Http)?;
                Ok(tokens.result)
            }
            StatusCode::NOT_FOUND => {
                debug!("wallet has no tokens");
                Ok(vec![])
            }
            status => Err(Self::error_from_status(status, response).await),
        }
    }

    /// Send an authenticated JSON POST, enforcing the configured timeout
    async fn send_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ChainError> {
        let request = self
            .client
            .post(url)
            .json(body)
            .header("X-API-Key", &self.config.api_key)
            .header("accept", "application/json");

        timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| ChainError::Timeout {
            seconds: self.config.timeout_seconds,
        })?
        .map_err(ChainError::Http)
    }

    async fn error_from_status(status: StatusCode, response: reqwest::Response) -> ChainError {
        match status {
            StatusCode::UNAUTHORIZED => ChainError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => ChainError::RateLimited,
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("chain server error: {} - {}", status.as_u16(), error_text);
                ChainError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                }
            }
        }
    }
}

impl ApiClient for ChainClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/health", self.config.base_url);

        debug!(url, "performing health check on chain server");

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
        .map_err(|_| ChainError::Timeout {
            seconds: start_time.elapsed().as_secs(),
        })?
        .map_err(ChainError::Http)?;

        let response_time = start_time.elapsed();

        match response.status() {
            StatusCode::OK => {
                info!("chain server health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::UNAUTHORIZED => {
                warn!("chain server health check failed: unauthorized");
                Ok(HealthStatus::Down {
                    reason: "Authentication failed".to_string(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("chain server health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("chain server health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}
