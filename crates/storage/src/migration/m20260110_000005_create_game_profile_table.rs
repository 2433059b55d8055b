// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameProfile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer_uniq(GameProfile::UserId))
                    .col(integer(GameProfile::Level))
                    .col(big_integer(GameProfile::Experience))
                    .col(big_integer(GameProfile::Gold))
                    .col(json(GameProfile::Equipped))
                    .col(json(GameProfile::Skills))
                    .col(integer(GameProfile::Version))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_profile_user_id")
                            .from(GameProfile::Table, GameProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameProfile {
    Table,
    Id,
    UserId,
    Level,
    Experience,
    Gold,
    Equipped,
    Skills,
    Version,
}
