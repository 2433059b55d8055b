// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Service registry for the upstream chain and AI clients
//!
//! The registry owns the optional upstream clients and exposes them to the
//! request handlers. Unlike a fallback registry, the two services are not
//! interchangeable: NFT operations require the chain client and AI operations
//! require the AI client, so a missing client is a hard error for its routes
//! while the rest of the API keeps serving.

use std::collections::HashMap;

use api_client::{ApiClient, HealthStatus};
use tracing::warn;

use crate::{AiClient, ChainClient};

/// Registry holding the configured upstream service clients
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    chain_client: Option<ChainClient>,
    ai_client: Option<AiClient>,
}

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum RegistryError {
    /// The blockchain server client is not configured
    #[error("blockchain server is not configured")]
    ChainUnavailable,

    /// The AI server client is not configured
    #[error("AI server is not configured")]
    AiUnavailable,
}

impl ServiceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the specified clients
    pub fn with_clients(chain_client: Option<ChainClient>, ai_client: Option<AiClient>) -> Self {
        Self {
            chain_client,
            ai_client,
        }
    }

    /// Get the blockchain server client
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ChainUnavailable` if the client is not configured
    pub fn chain(&self) -> Result<&ChainClient, RegistryError> {
        self.chain_client.as_ref().ok_or_else(|| {
            warn!("NFT operation requested but chain client is not configured");
            RegistryError::ChainUnavailable
        })
    }

    /// Get the AI server client
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AiUnavailable` if the client is not configured
    pub fn ai(&self) -> Result<&AiClient, RegistryError> {
        self.ai_client.as_ref().ok_or_else(|| {
            warn!("AI operation requested but AI client is not configured");
            RegistryError::AiUnavailable
        })
    }

    /// Get the overall health status of all registered clients
    ///
    /// Health checks are performed concurrently for better performance.
    pub async fn get_overall_health(&self) -> HashMap<String, HealthStatus> {
        let mut health_status = HashMap::new();

        let chain_future = async {
            match &self.chain_client {
                Some(client) => match client.health_check().await {
                    Ok(status) => Some((client.name().to_string(), status)),
                    Err(e) => Some((
                        client.name().to_string(),
                        HealthStatus::Down {
                            reason: format!("Health check failed: {e}"),
                        },
                    )),
                },
                None => None,
            }
        };

        let ai_future = async {
            match &self.ai_client {
                Some(client) => match client.health_check().await {
                    Ok(status) => Some((client.name().to_string(), status)),
                    Err(e) => Some((
                        client.name().to_string(),
                        HealthStatus::Down {
                            reason: format!("Health check failed: {e}"),
                        },
                    )),
                },
                None => None,
            }
        };

        let (chain_result, ai_result) = tokio::join!(chain_future, ai_future);

        if let Some((name, status)) = chain_result {
            health_status.insert(name, status);
        }

        if let Some((name, status)) = ai_result {
            health_status.insert(name, status);
        }

        health_status
    }

    /// Get the number of registered clients
    pub fn client_count(&self) -> usize {
        usize::from(self.chain_client.is_some()) + usize::from(self.ai_client.is_some())
    }

    /// Get the names of all registered clients
    pub fn client_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.chain_client.is_some() {
            names.push("chain");
        }
        if self.ai_client.is_some() {
            names.push("ai");
        }
        names
    }
}
