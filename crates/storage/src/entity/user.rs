// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Player account rows.

use sea_orm::entity::prelude::*;

/// A registered player account.
///
/// The wallet address is captured at registration and used as the mint and
/// ownership target for every on-chain operation the player performs.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Surrogate primary key.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the service.
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Checksummed EVM wallet address.
    pub wallet_address: String,
    /// Registration time.
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::equip_item::Entity")]
    EquipItem,
    #[sea_orm(has_many = "super::consumable_item::Entity")]
    ConsumableItem,
    #[sea_orm(has_one = "super::game_profile::Entity")]
    GameProfile,
    #[sea_orm(has_many = "super::sell_order::Entity")]
    SellOrder,
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

impl Related<super::game_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameProfile.def()
    }
}

impl Related<super::sell_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SellOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
