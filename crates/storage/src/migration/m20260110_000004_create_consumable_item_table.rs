// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_user_table::User, m20260110_000002_create_item_def_table::ItemDef,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsumableItem::Table)
                    .if_not_exists()
                    .col(big_integer(ConsumableItem::UserId))
                    .col(big_integer(ConsumableItem::ItemDefId))
                    .col(integer(ConsumableItem::Quantity))
                    .primary_key(
                        Index::create()
                            .col(ConsumableItem::UserId)
                            .col(ConsumableItem::ItemDefId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumable_item_user_id")
                            .from(ConsumableItem::Table, ConsumableItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumable_item_item_def_id")
                            .from(ConsumableItem::Table, ConsumableItem::ItemDefId)
                            .to(ItemDef::Table, ItemDef::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsumableItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConsumableItem {
    Table,
    UserId,
    ItemDefId,
    Quantity,
}
