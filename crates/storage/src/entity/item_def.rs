// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Item definition rows, the catalog every owned item instance points at.

use sea_orm::entity::prelude::*;

/// A catalog entry describing one kind of item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "item_def")]
pub struct Model {
    /// Surrogate primary key.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Item kind as text, parsed into [`shared_types::item::ItemKind`].
    pub kind: String,
    /// Base attack stat.
    pub attack: i32,
    /// Base defense stat.
    pub defense: i32,
    /// Rarity tier, 1 and up.
    pub rarity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::equip_item::Entity")]
    EquipItem,
    #[sea_orm(has_many = "super::consumable_item::Entity")]
    ConsumableItem,
}

impl Related<super::equip_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipItem.def()
    }
}

impl Related<super::consumable_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConsumableItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
