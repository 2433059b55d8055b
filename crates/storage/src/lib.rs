// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Relational persistence for the game API service.
//!
//! This crate owns the database schema, the SeaORM entities, and the
//! repository layer that the HTTP handlers call into. Repositories are the
//! only place that touches `sea_orm` query builders; handlers work with
//! entity models and domain enums from `shared-types`.
//!
//! Invariants enforced here rather than in handlers:
//!
//! - An NFT token ID is attached to at most one equipment item.
//! - Equipment items with an attached token cannot be deleted.
//! - Consumable quantities never go negative.
//! - Profile writes use optimistic locking on a version counter.
//! - Sell orders only move from `open` to a terminal status.

pub mod entity;
pub mod error;
pub mod migration;
pub mod repository;

pub use error::StorageError;
pub use migration::Migrator;
pub use repository::{
    ConsumableRepository, EquipItemRepository, ItemDefRepository, NewItemDef, NewOrder,
    OrderFilter, OrderRepository, PaginatedOrders, ProfileRepository, ProfileUpdate,
    UserRepository, item_kind, order_currency, order_status,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

/// Connects to the database at `url` and applies any pending migrations.
///
/// Accepts any URL SeaORM understands; the service uses PostgreSQL in
/// production and `sqlite::memory:` in tests.
pub async fn connect(url: &str) -> Result<DatabaseConnection, StorageError> {
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // A pooled in-memory SQLite would hand every connection its own empty
    // database, so tests get a single long-lived connection instead.
    if url.starts_with("sqlite::memory:") {
        options.max_connections(1);
    }

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    tracing::info!("database connected and migrated");
    Ok(db)
}
