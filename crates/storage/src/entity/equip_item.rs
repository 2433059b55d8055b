// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Owned equipment instance rows.

use sea_orm::entity::prelude::*;

/// One equipment item instance owned by a player.
///
/// `nft_token_id` is set when the item is minted on chain and cleared when it
/// is burned. A partial unique index guarantees a token maps to at most one
/// row; while the column is set the row cannot be deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "equip_item")]
pub struct Model {
    /// Surrogate primary key.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player.
    pub user_id: i64,
    /// Catalog entry this instance was stamped from.
    pub item_def_id: i64,
    /// Enhancement level, 0 and up.
    pub enhancement_level: i32,
    /// Free-form enhancement attributes, a JSON object.
    pub enhancement_data: Json,
    /// On-chain token ID if minted, otherwise NULL.
    pub nft_token_id: Option<String>,
    /// Creation time.
    pub created_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::sell_order::Entity")]
    SellOrder,
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

impl Related<super::sell_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SellOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
