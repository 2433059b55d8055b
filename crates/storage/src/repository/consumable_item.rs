// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Consumable stack persistence.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

use crate::{
    entity::consumable_item::{self, Entity as ConsumableItem},
    error::StorageError,
};

/// Data access for consumable stacks.
#[derive(Debug, Clone, Copy)]
pub struct ConsumableRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConsumableRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds `amount` to a player's stack, creating the row on first grant.
    pub async fn grant(
        &self,
        user_id: i64,
        item_def_id: i64,
        amount: i32,
    ) -> Result<consumable_item::Model, StorageError> {
        match self.find(user_id, item_def_id).await? {
            Some(existing) => {
                let quantity = existing.quantity.saturating_add(amount);
                let mut active: consumable_item::ActiveModel = existing.into();
                active.quantity = Set(quantity);
                Ok(active.update(self.db).await?)
            }
            None => {
                let row = consumable_item::ActiveModel {
                    user_id: Set(user_id),
                    item_def_id: Set(item_def_id),
                    quantity: Set(amount),
                }
                .insert(self.db)
                .await?;
                Ok(row)
            }
        }
    }

    /// Spends `amount` from a player's stack.
    ///
    /// Fails with [`StorageError::InsufficientQuantity`] rather than letting
    /// the quantity go negative. A stack that reaches zero is removed.
    pub async fn consume(
        &self,
        user_id: i64,
        item_def_id: i64,
        amount: i32,
    ) -> Result<consumable_item::Model, StorageError> {
        let existing = self
            .find(user_id, item_def_id)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "consumable item",
                id: item_def_id.to_string(),
            })?;

        if existing.quantity < amount {
            return Err(StorageError::InsufficientQuantity {
                available: existing.quantity,
                requested: amount,
            });
        }

        let quantity = existing.quantity - amount;
        if quantity == 0 {
            let mut drained = existing.clone();
            existing.delete(self.db).await?;
            drained.quantity = 0;
            return Ok(drained);
        }

        let mut active: consumable_item::ActiveModel = existing.into();
        active.quantity = Set(quantity);
        Ok(active.update(self.db).await?)
    }

    /// Fetches one stack, if the player holds any.
    pub async fn find(
        &self,
        user_id: i64,
        item_def_id: i64,
    ) -> Result<Option<consumable_item::Model>, StorageError> {
        Ok(ConsumableItem::find_by_id((user_id, item_def_id))
            .one(self.db)
            .await?)
    }

    /// Lists every stack a player holds.
    pub async fn list_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<consumable_item::Model>, StorageError> {
        Ok(ConsumableItem::find()
            .filter(consumable_item::Column::UserId.eq(user_id))
            .all(self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{seed_item_def, seed_user, test_db};

    #[tokio::test]
    async fn grant_accumulates() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = ConsumableRepository::new(&db);

        let first = repo.grant(user.id, def.id, 3).await.unwrap();
        assert_eq!(first.quantity, 3);

        let second = repo.grant(user.id, def.id, 2).await.unwrap();
        assert_eq!(second.quantity, 5);

        assert_eq!(repo.list_for_user(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn consume_never_goes_negative() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = ConsumableRepository::new(&db);

        repo.grant(user.id, def.id, 2).await.unwrap();

        let err = repo.consume(user.id, def.id, 3).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::InsufficientQuantity {
                available: 2,
                requested: 3
            }
        ));

        // The failed spend left the stack untouched.
        let stack = repo.find(user.id, def.id).await.unwrap().unwrap();
        assert_eq!(stack.quantity, 2);
    }

    #[tokio::test]
    async fn drained_stack_is_removed() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = ConsumableRepository::new(&db);

        repo.grant(user.id, def.id, 2).await.unwrap();
        let drained = repo.consume(user.id, def.id, 2).await.unwrap();
        assert_eq!(drained.quantity, 0);

        assert!(repo.find(user.id, def.id).await.unwrap().is_none());
        assert!(repo.list_for_user(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn consume_without_stack_is_not_found() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;

        let err = ConsumableRepository::new(&db)
            .consume(user.id, def.id, 1)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
