// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Repositories wrapping the SeaORM query builders.
//!
//! Each repository borrows the shared [`sea_orm::DatabaseConnection`] and
//! exposes the operations one entity needs. Queries that act on behalf of a
//! player are scoped by `user_id` so a missing row and a foreign row are
//! indistinguishable to the caller.

mod consumable_item;
mod equip_item;
mod game_profile;
mod item_def;
mod sell_order;
mod user;

pub use consumable_item::ConsumableRepository;
pub use equip_item::EquipItemRepository;
pub use game_profile::{ProfileRepository, ProfileUpdate};
pub use item_def::{ItemDefRepository, NewItemDef, item_kind};
pub use sell_order::{
    NewOrder, OrderFilter, OrderRepository, PaginatedOrders, order_currency, order_status,
};
pub use user::UserRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::migration::Migrator;

    /// Fresh in-memory database with all migrations applied.
    pub async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    /// Inserts a user row and returns it.
    pub async fn seed_user(db: &DatabaseConnection, username: &str) -> crate::entity::user::Model {
        crate::repository::UserRepository::new(db)
            .create(
                username,
                "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$AAAAAAAAAAA",
                "0x00000000000000000000000000000000000000aa",
            )
            .await
            .unwrap()
    }

    /// Inserts a sword catalog entry and returns it.
    pub async fn seed_item_def(db: &DatabaseConnection) -> crate::entity::item_def::Model {
        crate::repository::ItemDefRepository::new(db)
            .create(crate::repository::NewItemDef {
                name: "Iron Sword".to_owned(),
                kind: shared_types::item::ItemKind::Weapon,
                attack: 10,
                defense: 0,
                rarity: 1,
            })
            .await
            .unwrap()
    }
}
