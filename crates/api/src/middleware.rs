// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Middleware module for HTTP request processing
//!
//! This module provides rate limiting and bearer-token authentication
//! middleware for the game API server.

use std::{
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, State},
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use storage::UserRepository;
use tracing::{Instrument, Level, debug, span, warn};

use crate::{config::RateLimitingConfig, error::ServerError, state::ServerState};

// Rate limiting constants
const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const MAX_RATE_LIMIT_ENTRIES: usize = 10_000;

/// Authenticated caller identity, inserted as a request extension by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Primary key of the authenticated user row
    pub id: i64,
    /// Username recorded in the token claims
    pub username: String,
}

/// Bearer-token authentication middleware
///
/// Verifies the `Authorization: Bearer <token>` header against the server's
/// token codec and confirms the subject still exists in the database. On
/// success the [`CurrentUser`] identity is attached to the request so
/// handlers can read it without re-verifying.
pub async fn auth_middleware(
    State(state): State<ServerState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ServerError> {
    let token = bearer_token(&req).ok_or_else(|| ServerError::Unauthorized {
        message: "missing bearer token".to_string(),
    })?;

    let claims = state.tokens.verify(token)?;

    let user_id = claims.user_id().ok_or_else(|| ServerError::Unauthorized {
        message: "invalid token subject".to_string(),
    })?;

    // Tokens issued before an account was removed must stop working
    let user = UserRepository::new(&state.db)
        .get(user_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ServerError::Unauthorized {
                    message: "unknown user".to_string(),
                }
            } else {
                ServerError::from(e)
            }
        })?;

    let span = span!(
        Level::INFO,
        "authenticated_request",
        user_id = user.id,
        username = %user.username
    );

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(req).instrument(span).await)
}

fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Rate limiting middleware state
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitingConfig,
    // Lock-free concurrent rate limiting using DashMap
    requests: Arc<DashMap<IpAddr, RequestCounter>>,
}

#[derive(Debug, Clone)]
struct RequestCounter {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitingConfig) -> Self {
        Self {
            config,
            requests: Arc::new(DashMap::new()),
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Check if a request from the given IP should be rate limited
    pub fn is_rate_limited(&self, ip: IpAddr) -> bool {
        if !self.config.enabled {
            return false;
        }

        let now = Instant::now();
        let window_duration = Duration::from_secs(RATE_LIMIT_WINDOW_SECONDS);

        // Periodically clean up expired entries to prevent memory leaks
        if self.requests.len() > MAX_RATE_LIMIT_ENTRIES {
            self.cleanup_expired_entries(now, window_duration);
        }

        let counter = self
            .requests
            .entry(ip)
            .and_modify(|counter| {
                if now.duration_since(counter.window_start) > window_duration {
                    counter.count = 1;
                    counter.window_start = now;
                } else {
                    counter.count += 1;
                }
            })
            .or_insert_with(|| RequestCounter {
                count: 1,
                window_start: now,
            });

        let current_count = counter.count;

        if current_count > self.config.requests_per_minute {
            debug!("rate limiting IP: {} ({} requests)", ip, current_count);
            true
        } else {
            false
        }
    }

    /// Clean up expired entries using efficient retain operation
    fn cleanup_expired_entries(&self, now: Instant, window_duration: Duration) {
        let entries_before = self.requests.len();

        self.requests
            .retain(|_, counter| now.duration_since(counter.window_start) <= window_duration);

        let entries_after = self.requests.len();
        let cleaned_up = entries_before.saturating_sub(entries_after);

        if cleaned_up > 0 {
            debug!("cleaned up {} expired rate limiter entries", cleaned_up);
        }

        // If still too many entries, remove the oldest ones
        if entries_after > MAX_RATE_LIMIT_ENTRIES {
            warn!(
                "rate limiter still has {} entries after cleanup, removing oldest",
                entries_after
            );

            let mut oldest_entries: Vec<_> = self
                .requests
                .iter()
                .map(|entry| (*entry.key(), entry.value().window_start))
                .collect();

            oldest_entries.sort_by_key(|(_, window_start)| *window_start);

            let entries_to_remove = entries_after - MAX_RATE_LIMIT_ENTRIES / 2;
            for (ip, _) in oldest_entries.into_iter().take(entries_to_remove) {
                self.requests.remove(&ip);
            }
        }
    }
}

/// Rate limiting middleware function
pub async fn rate_limiting_middleware(
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    State(rate_limiter): State<RateLimiter>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let client_ip = addr.ip();

    if rate_limiter.is_rate_limited(client_ip) {
        warn!("Rate limit exceeded for IP: {}", client_ip);
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_creation() {
        let config = RateLimitingConfig {
            enabled: true,
            requests_per_minute: 10,
        };
        let limiter = RateLimiter::new(config);
        assert!(limiter.is_enabled());
    }

    #[test]
    fn rate_limiter_disabled() {
        let config = RateLimitingConfig {
            enabled: false,
            requests_per_minute: 1,
        };
        let limiter = RateLimiter::new(config);

        let ip = "127.0.0.1".parse().unwrap();
        // Should never be rate limited when disabled
        for _ in 0..10 {
            assert!(!limiter.is_rate_limited(ip));
        }
    }

    #[test]
    fn rate_limiter_exceeds_limits() {
        let config = RateLimitingConfig {
            enabled: true,
            requests_per_minute: 3,
        };
        let limiter = RateLimiter::new(config);

        let ip = "127.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(!limiter.is_rate_limited(ip));
        }

        assert!(limiter.is_rate_limited(ip));
        assert!(limiter.is_rate_limited(ip));
    }

    #[test]
    fn rate_limiter_different_ips() {
        let config = RateLimitingConfig {
            enabled: true,
            requests_per_minute: 2,
        };
        let limiter = RateLimiter::new(config);

        let ip1 = "127.0.0.1".parse().unwrap();
        let ip2 = "192.168.1.1".parse().unwrap();

        // Each IP has its own window
        assert!(!limiter.is_rate_limited(ip1));
        assert!(!limiter.is_rate_limited(ip2));
        assert!(!limiter.is_rate_limited(ip1));
        assert!(!limiter.is_rate_limited(ip2));

        assert!(limiter.is_rate_limited(ip1));
        assert!(limiter.is_rate_limited(ip2));
    }

    #[test]
    fn bearer_token_parsing() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&req), None);

        let req = Request::builder().body(()).unwrap();
        assert_eq!(bearer_token(&req), None);
    }
}
