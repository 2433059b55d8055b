// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Schema migrations, applied in order by [`Migrator`].

pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_user_table;
mod m20260110_000002_create_item_def_table;
mod m20260110_000003_create_equip_item_table;
mod m20260110_000004_create_consumable_item_table;
mod m20260110_000005_create_game_profile_table;
mod m20260112_000006_create_sell_order_table;

/// Runs every migration this crate knows about.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_user_table::Migration),
            Box::new(m20260110_000002_create_item_def_table::Migration),
            Box::new(m20260110_000003_create_equip_item_table::Migration),
            Box::new(m20260110_000004_create_consumable_item_table::Migration),
            Box::new(m20260110_000005_create_game_profile_table::Migration),
            Box::new(m20260112_000006_create_sell_order_table::Migration),
        ]
    }
}
