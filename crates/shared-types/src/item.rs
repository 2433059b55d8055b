// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Item classification types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Category of a game item definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Equippable weapon
    Weapon,
    /// Equippable armor piece
    Armor,
    /// Equippable accessory (rings, amulets)
    Accessory,
    /// Stackable consumable (potions, scrolls)
    Consumable,
    /// Crafting material
    Material,
}

/// Error returned when parsing an unknown item kind string
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown item kind: {0}")]
pub struct ParseItemKindError(pub String);

impl ItemKind {
    /// Whether items of this kind occupy an equip slot
    pub fn is_equippable(&self) -> bool {
        matches!(self, Self::Weapon | Self::Armor | Self::Accessory)
    }

    /// Whether items of this kind are tracked by stacked quantity
    pub fn is_stackable(&self) -> bool {
        matches!(self, Self::Consumable | Self::Material)
    }

    /// Stable string form used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Accessory => "accessory",
            Self::Consumable => "consumable",
            Self::Material => "material",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            "accessory" => Ok(Self::Accessory),
            "consumable" => Ok(Self::Consumable),
            "material" => Ok(Self::Material),
            other => Err(ParseItemKindError(other.to_string())),
        }
    }
}
