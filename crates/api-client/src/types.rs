// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Common data types exchanged with the blockchain server

use std::collections::HashMap;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use shared_types::ItemKind;

/// Metadata payload sent to the blockchain server when minting an item as an NFT
///
/// Built from the item definition plus the ownership row's enhancement state,
/// so the on-chain token carries a snapshot of the item at mint time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Item display name
    pub name: String,
    /// Item category
    pub kind: ItemKind,
    /// Base attack stat
    pub attack: i32,
    /// Base defense stat
    pub defense: i32,
    /// Rarity tier of the item definition
    pub rarity: i32,
    /// Enhancement level of the minted ownership row
    pub enhancement_level: i32,
    /// Additional enhancement attributes (sockets, rerolled stats)
    pub attributes: HashMap<String, serde_json::Value>,
}

/// Receipt returned by the blockchain server after a successful mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Token id assigned on-chain, persisted onto the ownership row
    pub token_id: String,
    /// Transaction hash of the mint
    pub tx_hash: String,
}

/// A token owned by a wallet, as reported by the blockchain server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletToken {
    /// Token id
    pub token_id: String,
    /// Owning wallet address
    pub owner: Address,
    /// Whether the token is currently locked against transfers
    #[serde(default)]
    pub locked: bool,
}

impl TokenMetadata {
    /// Display name including the enhancement level when present
    pub fn display_name(&self) -> String {
        if self.enhancement_level > 0 {
            format!("+{} {}", self.enhancement_level, self.name)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(level: i32) -> TokenMetadata {
        TokenMetadata {
            name: "Iron Sword".to_string(),
            kind: ItemKind::Weapon,
            attack: 12,
            defense: 0,
            rarity: 1,
            enhancement_level: level,
            attributes: HashMap::new(),
        }
    }

    #[test]
    fn display_name_with_enhancement() {
        assert_eq!(metadata(0).display_name(), "Iron Sword");
        assert_eq!(metadata(7).display_name(), "+7 Iron Sword");
    }

    #[test]
    fn wallet_token_locked_defaults_false() {
        let token: WalletToken =
            serde_json::from_str(r#"{"token_id":"42","owner":"0x1234567890123456789012345678901234567890"}"#)
                .unwrap();
        assert!(!token.locked);
        assert_eq!(token.token_id, "42");
    }
}
