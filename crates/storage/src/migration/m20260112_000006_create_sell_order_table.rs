// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_user_table::User,
    m20260110_000003_create_equip_item_table::EquipItem,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SellOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SellOrder::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(SellOrder::SellerId))
                    .col(big_integer(SellOrder::EquipItemId))
                    .col(big_integer(SellOrder::Price))
                    .col(string(SellOrder::Currency))
                    .col(string(SellOrder::Status))
                    .col(string(SellOrder::Signature))
                    .col(big_integer(SellOrder::Nonce))
                    .col(big_integer(SellOrder::Deadline))
                    .col(
                        timestamp(SellOrder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(SellOrder::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sell_order_seller_id")
                            .from(SellOrder::Table, SellOrder::SellerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sell_order_equip_item_id")
                            .from(SellOrder::Table, SellOrder::EquipItemId)
                            .to(EquipItem::Table, EquipItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Status listings are the hot market query path.
        manager
            .create_index(
                Index::create()
                    .name("idx_sell_order_status")
                    .table(SellOrder::Table)
                    .col(SellOrder::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SellOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SellOrder {
    Table,
    Id,
    SellerId,
    EquipItemId,
    Price,
    Currency,
    Status,
    Signature,
    Nonce,
    Deadline,
    CreatedAt,
    UpdatedAt,
}
