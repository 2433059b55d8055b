// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemDef::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItemDef::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(ItemDef::Name))
                    .col(string(ItemDef::Kind))
                    .col(integer(ItemDef::Attack))
                    .col(integer(ItemDef::Defense))
                    .col(integer(ItemDef::Rarity))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemDef::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ItemDef {
    Table,
    Id,
    Name,
    Kind,
    Attack,
    Defense,
    Rarity,
}
