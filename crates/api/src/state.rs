// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared server state passed to request handlers.

use std::{collections::HashMap, sync::Arc};

use api_client::HealthStatus;
use auth::TokenCodec;
use external_apis::ServiceRegistry;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::ServerConfig;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Registry of upstream service clients
    pub registry: Arc<ServiceRegistry>,
    /// JWT encoder/decoder for session tokens
    pub tokens: Arc<TokenCodec>,
    /// Token used to signal graceful shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Runs a health check over the database and every registered upstream
    /// client.
    pub async fn health_check(&self) -> HealthCheck {
        let mut services = HashMap::new();

        let database = match self.db.ping().await {
            Ok(()) => ServiceHealth::up(),
            Err(e) => ServiceHealth::down(e.to_string()),
        };
        services.insert("database".to_string(), database);

        for (name, status) in self.registry.get_overall_health().await {
            services.insert(name, ServiceHealth::from(status));
        }

        let healthy = services.values().all(|s| s.status == "up");
        HealthCheck {
            status: if healthy { "healthy" } else { "degraded" },
            services,
        }
    }
}

/// Aggregated health report returned by the `/health` endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    /// Overall status, `healthy` only when every service is up
    pub status: &'static str,
    /// Per-service health, keyed by service name
    pub services: HashMap<String, ServiceHealth>,
}

/// Health of a single dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    /// One of `up`, `degraded`, or `down`
    pub status: &'static str,
    /// Failure detail when not up
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub reason: Option<Box<str>>,
}

impl ServiceHealth {
    fn up() -> Self {
        Self {
            status: "up",
            reason: None,
        }
    }

    fn down(reason: String) -> Self {
        Self {
            status: "down",
            reason: Some(reason.into_boxed_str()),
        }
    }
}

impl From<HealthStatus> for ServiceHealth {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Up => Self::up(),
            HealthStatus::Degraded { reason } => Self {
                status: "degraded",
                reason: Some(reason.into_boxed_str()),
            },
            HealthStatus::Down { reason } => Self::down(reason),
        }
    }
}
