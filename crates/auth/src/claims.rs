// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! JWT payload structure

use serde::{Deserialize, Serialize};

/// Claims carried by every bearer token issued at login
///
/// `sub` holds the user's database id as a string per RFC 7519; the numeric
/// accessor parses it back for repository lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's database id
    pub sub: String,
    /// Username at issuance time, for logging and display only
    pub username: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    /// The user id carried in `sub`, if it parses
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            username: "aria".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.user_id(), Some(42));
    }

    #[test]
    fn user_id_rejects_non_numeric_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            username: "aria".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn claims_serde_round_trip() {
        let claims = Claims {
            sub: "7".to_string(),
            username: "aria".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, claims);
    }
}
