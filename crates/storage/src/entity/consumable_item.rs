// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Stackable consumable rows, keyed by player and catalog entry.

use sea_orm::entity::prelude::*;

/// A consumable stack held by a player.
///
/// Composite primary key: one row per `(user, item_def)` pair. The quantity
/// is adjusted in place and never allowed to go negative.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "consumable_item")]
pub struct Model {
    /// Owning player.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    /// Catalog entry of the consumable.
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_def_id: i64,
    /// Stack size, always non-negative.
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::item_def::Entity",
        from = "Column::ItemDefId",
        to = "super::item_def::Column::Id"
    )]
    ItemDef,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::item_def::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemDef.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
