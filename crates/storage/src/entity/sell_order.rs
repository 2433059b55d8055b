// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market sell order rows.

use sea_orm::entity::prelude::*;

/// A listed sell order for an equipment item.
///
/// `signature`, `nonce`, and `deadline` are recorded verbatim for settlement
/// on chain; this service stores them but never verifies them. Status is
/// stored as text and parsed into [`shared_types::order::OrderStatus`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sell_order")]
pub struct Model {
    /// Surrogate primary key.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Player who listed the order.
    pub seller_id: i64,
    /// Equipment item being sold.
    pub equip_item_id: i64,
    /// Asking price in the listed currency's smallest unit.
    pub price: i64,
    /// Currency as text, `gold` or `token`.
    pub currency: String,
    /// Order status as text.
    pub status: String,
    /// Seller's settlement signature, opaque to this service.
    pub signature: String,
    /// Settlement nonce, opaque to this service.
    pub nonce: i64,
    /// Unix-seconds deadline after which the order expires.
    pub deadline: i64,
    /// Listing time.
    pub created_at: DateTimeUtc,
    /// Last status change time.
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SellerId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::equip_item::Entity",
        from = "Column::EquipItemId",
        to = "super::equip_item::Column::Id"
    )]
    EquipItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::equip_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
