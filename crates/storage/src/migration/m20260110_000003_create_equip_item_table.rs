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
                    .table(EquipItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EquipItem::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(EquipItem::UserId))
                    .col(big_integer(EquipItem::ItemDefId))
                    .col(integer(EquipItem::EnhancementLevel))
                    .col(json(EquipItem::EnhancementData))
                    .col(string_null(EquipItem::NftTokenId))
                    .col(
                        timestamp(EquipItem::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equip_item_user_id")
                            .from(EquipItem::Table, EquipItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equip_item_item_def_id")
                            .from(EquipItem::Table, EquipItem::ItemDefId)
                            .to(ItemDef::Table, ItemDef::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One on-chain token maps to at most one equipment row.
        manager
            .create_index(
                Index::create()
                    .name("idx_equip_item_nft_token_id")
                    .table(EquipItem::Table)
                    .col(EquipItem::NftTokenId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EquipItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EquipItem {
    Table,
    Id,
    UserId,
    ItemDefId,
    EnhancementLevel,
    EnhancementData,
    NftTokenId,
    CreatedAt,
}
