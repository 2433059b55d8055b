// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health status vocabulary shared by every upstream client
//!
//! Both the blockchain and AI clients report their state in these terms so
//! the aggregated `/health` endpoint can fold them without caring which
//! service is behind the client.

use serde::{Deserialize, Serialize};

/// Health of one upstream service as seen from its client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Reachable and answering normally
    Up,
    /// Answering, but not with a clean 200
    Degraded {
        /// What the probe saw
        reason: String,
    },
    /// Unreachable or rejecting us outright
    Down {
        /// What the probe saw
        reason: String,
    },
}

impl HealthStatus {
    /// Whether requests can still be routed to the service
    pub fn is_available(&self) -> bool {
        matches!(self, HealthStatus::Up | HealthStatus::Degraded { .. })
    }

    /// Whether the service is completely unusable
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Human-readable summary for health responses and logs
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "Service is healthy",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}
