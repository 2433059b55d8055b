// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Owned equipment persistence, including the NFT attachment lifecycle.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    sea_query::Expr,
};

use crate::{
    entity::equip_item::{self, Entity as EquipItem},
    error::StorageError,
};

/// Data access for owned equipment items.
#[derive(Debug, Clone, Copy)]
pub struct EquipItemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EquipItemRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a fresh, unminted equipment instance for a player.
    pub async fn create(
        &self,
        user_id: i64,
        item_def_id: i64,
        enhancement_level: i32,
        enhancement_data: serde_json::Value,
    ) -> Result<equip_item::Model, StorageError> {
        let row = equip_item::ActiveModel {
            user_id: Set(user_id),
            item_def_id: Set(item_def_id),
            enhancement_level: Set(enhancement_level),
            enhancement_data: Set(enhancement_data),
            nft_token_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(row)
    }

    /// Fetches one item, scoped to its owner.
    pub async fn get(&self, user_id: i64, id: i64) -> Result<equip_item::Model, StorageError> {
        EquipItem::find_by_id(id)
            .filter(equip_item::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "equip item",
                id: id.to_string(),
            })
    }

    /// Lists every equipment item a player owns.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<equip_item::Model>, StorageError> {
        Ok(EquipItem::find()
            .filter(equip_item::Column::UserId.eq(user_id))
            .all(self.db)
            .await?)
    }

    /// Updates enhancement state on an owned item.
    pub async fn update_enhancement(
        &self,
        user_id: i64,
        id: i64,
        enhancement_level: i32,
        enhancement_data: serde_json::Value,
    ) -> Result<equip_item::Model, StorageError> {
        let existing = self.get(user_id, id).await?;

        let mut active: equip_item::ActiveModel = existing.into();
        active.enhancement_level = Set(enhancement_level);
        active.enhancement_data = Set(enhancement_data);

        Ok(active.update(self.db).await?)
    }

    /// Deletes an owned item.
    ///
    /// Refused with [`StorageError::TokenAttached`] while the item is minted;
    /// the token must be burned first so the chain and the database cannot
    /// disagree about whether the item exists.
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), StorageError> {
        let existing = self.get(user_id, id).await?;

        if let Some(token_id) = &existing.nft_token_id {
            return Err(StorageError::TokenAttached {
                item_id: id,
                token_id: token_id.clone(),
            });
        }

        existing.delete(self.db).await?;
        Ok(())
    }

    /// Records a freshly minted token on an owned item.
    ///
    /// Returns [`StorageError::Duplicate`] when the token is already attached
    /// to some row.
    pub async fn attach_token(
        &self,
        user_id: i64,
        id: i64,
        token_id: &str,
    ) -> Result<equip_item::Model, StorageError> {
        if self.find_by_token(token_id).await?.is_some() {
            return Err(StorageError::Duplicate {
                entity: "equip item",
                field: "nft_token_id",
                value: token_id.to_owned(),
            });
        }

        let existing = self.get(user_id, id).await?;

        let mut active: equip_item::ActiveModel = existing.into();
        active.nft_token_id = Set(Some(token_id.to_owned()));

        Ok(active.update(self.db).await?)
    }

    /// Clears the token after a burn.
    pub async fn detach_token(
        &self,
        user_id: i64,
        id: i64,
    ) -> Result<equip_item::Model, StorageError> {
        let existing = self.get(user_id, id).await?;

        let mut active: equip_item::ActiveModel = existing.into();
        active.nft_token_id = Set(None);

        Ok(active.update(self.db).await?)
    }

    /// Looks up the row a token is attached to, if any.
    pub async fn find_by_token(
        &self,
        token_id: &str,
    ) -> Result<Option<equip_item::Model>, StorageError> {
        Ok(EquipItem::find()
            .filter(equip_item::Column::NftTokenId.eq(token_id))
            .one(self.db)
            .await?)
    }

    /// Lists a player's minted items.
    pub async fn list_minted_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<equip_item::Model>, StorageError> {
        Ok(EquipItem::find()
            .filter(equip_item::Column::UserId.eq(user_id))
            .filter(equip_item::Column::NftTokenId.is_not_null())
            .all(self.db)
            .await?)
    }

    /// Detaches tokens the chain no longer reports for this wallet.
    ///
    /// `present` is the authoritative token list from the chain; any local
    /// attachment outside it is stale and gets cleared. Returns the number of
    /// rows changed.
    pub async fn detach_tokens_not_in(
        &self,
        user_id: i64,
        present: &[String],
    ) -> Result<u64, StorageError> {
        let mut query = EquipItem::update_many()
            .col_expr(equip_item::Column::NftTokenId, Expr::value(Option::<String>::None))
            .filter(equip_item::Column::UserId.eq(user_id))
            .filter(equip_item::Column::NftTokenId.is_not_null());

        if !present.is_empty() {
            query = query.filter(equip_item::Column::NftTokenId.is_not_in(present.iter().cloned()));
        }

        let result = query.exec(self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(
                user_id,
                detached = result.rows_affected,
                "cleared stale token attachments"
            );
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{seed_item_def, seed_user, test_db};
    use serde_json::json;

    #[tokio::test]
    async fn create_list_and_update() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let item = repo
            .create(user.id, def.id, 0, json!({}))
            .await
            .unwrap();
        assert_eq!(item.nft_token_id, None);

        let upgraded = repo
            .update_enhancement(user.id, item.id, 7, json!({"element": "fire"}))
            .await
            .unwrap();
        assert_eq!(upgraded.enhancement_level, 7);

        assert_eq!(repo.list_for_user(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn other_users_items_invisible() {
        let db = test_db().await;
        let alice = seed_user(&db, "alice").await;
        let mallory = seed_user(&db, "mallory").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let item = repo.create(alice.id, def.id, 0, json!({})).await.unwrap();

        let err = repo.get(mallory.id, item.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn minted_item_cannot_be_deleted() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let item = repo.create(user.id, def.id, 0, json!({})).await.unwrap();
        repo.attach_token(user.id, item.id, "token-1").await.unwrap();

        let err = repo.delete(user.id, item.id).await.unwrap_err();
        assert!(matches!(err, StorageError::TokenAttached { .. }));

        // Burn, then deletion goes through.
        repo.detach_token(user.id, item.id).await.unwrap();
        repo.delete(user.id, item.id).await.unwrap();
    }

    #[tokio::test]
    async fn token_attaches_to_at_most_one_item() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let first = repo.create(user.id, def.id, 0, json!({})).await.unwrap();
        let second = repo.create(user.id, def.id, 0, json!({})).await.unwrap();

        repo.attach_token(user.id, first.id, "token-1").await.unwrap();
        let err = repo
            .attach_token(user.id, second.id, "token-1")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { field: "nft_token_id", .. }));
    }

    #[tokio::test]
    async fn reconcile_detaches_stale_tokens() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let kept = repo.create(user.id, def.id, 0, json!({})).await.unwrap();
        let stale = repo.create(user.id, def.id, 0, json!({})).await.unwrap();
        repo.attach_token(user.id, kept.id, "token-kept").await.unwrap();
        repo.attach_token(user.id, stale.id, "token-stale").await.unwrap();

        let detached = repo
            .detach_tokens_not_in(user.id, &["token-kept".to_owned()])
            .await
            .unwrap();
        assert_eq!(detached, 1);

        assert_eq!(repo.list_minted_for_user(user.id).await.unwrap().len(), 1);
        assert!(repo.find_by_token("token-stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reconcile_with_empty_chain_list_detaches_all() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let def = seed_item_def(&db).await;
        let repo = EquipItemRepository::new(&db);

        let item = repo.create(user.id, def.id, 0, json!({})).await.unwrap();
        repo.attach_token(user.id, item.id, "token-1").await.unwrap();

        let detached = repo.detach_tokens_not_in(user.id, &[]).await.unwrap();
        assert_eq!(detached, 1);
        assert!(repo.list_minted_for_user(user.id).await.unwrap().is_empty());
    }
}
