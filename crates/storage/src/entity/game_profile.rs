// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Game profile rows carrying progression state.

use sea_orm::entity::prelude::*;

/// Per-player progression state.
///
/// `version` is an optimistic-lock counter. Every successful update bumps it
/// by one; a write carrying a stale version is rejected so concurrent game
/// clients cannot silently overwrite each other.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_profile")]
pub struct Model {
    /// Surrogate primary key.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning player, one profile each.
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Character level.
    pub level: i32,
    /// Accumulated experience points.
    pub experience: i64,
    /// Soft-currency balance.
    pub gold: i64,
    /// Equipped item layout, a JSON object mapping slot to equip item ID.
    pub equipped: Json,
    /// Unlocked skills, a JSON array.
    pub skills: Json,
    /// Optimistic-lock version counter.
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
