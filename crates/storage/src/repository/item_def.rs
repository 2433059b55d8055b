// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Item catalog persistence.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use shared_types::item::ItemKind;

use crate::{
    entity::item_def::{self, Entity as ItemDef},
    error::StorageError,
};

/// Fields for a new catalog entry.
#[derive(Debug, Clone)]
pub struct NewItemDef {
    /// Display name.
    pub name: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Base attack stat.
    pub attack: i32,
    /// Base defense stat.
    pub defense: i32,
    /// Rarity tier.
    pub rarity: i32,
}

/// Data access for the item catalog.
#[derive(Debug, Clone, Copy)]
pub struct ItemDefRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ItemDefRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new catalog entry.
    pub async fn create(&self, def: NewItemDef) -> Result<item_def::Model, StorageError> {
        let row = item_def::ActiveModel {
            name: Set(def.name),
            kind: Set(def.kind.to_string()),
            attack: Set(def.attack),
            defense: Set(def.defense),
            rarity: Set(def.rarity),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(row)
    }

    /// Fetches one catalog entry.
    pub async fn get(&self, id: i64) -> Result<item_def::Model, StorageError> {
        ItemDef::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "item def",
                id: id.to_string(),
            })
    }

    /// Lists the whole catalog.
    pub async fn list(&self) -> Result<Vec<item_def::Model>, StorageError> {
        Ok(ItemDef::find().all(self.db).await?)
    }
}

/// Parses the stored kind column into its domain enum.
pub fn item_kind(model: &item_def::Model) -> Result<ItemKind, StorageError> {
    model
        .kind
        .parse()
        .map_err(|_| StorageError::CorruptColumn {
            column: "kind",
            id: model.id,
            value: model.kind.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    fn potion() -> NewItemDef {
        NewItemDef {
            name: "Healing Potion".to_owned(),
            kind: ItemKind::Consumable,
            attack: 0,
            defense: 0,
            rarity: 1,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let db = test_db().await;
        let repo = ItemDefRepository::new(&db);

        let created = repo.create(potion()).await.unwrap();
        assert_eq!(created.kind, "consumable");
        assert_eq!(item_kind(&created).unwrap(), ItemKind::Consumable);

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Healing Potion");
        assert_eq!(repo.list().await.unwrap().len(), 1);

        assert!(repo.get(created.id + 1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn corrupt_kind_column_is_reported() {
        let model = item_def::Model {
            id: 7,
            name: "???".to_owned(),
            kind: "mystery".to_owned(),
            attack: 0,
            defense: 0,
            rarity: 1,
        };
        let err = item_kind(&model).unwrap_err();
        assert!(matches!(err, StorageError::CorruptColumn { column: "kind", .. }));
    }
}
