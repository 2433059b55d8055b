// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Player account persistence.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::{
    entity::user::{self, Entity as User},
    error::StorageError,
};

/// Data access for player accounts.
#[derive(Debug, Clone, Copy)]
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// Returns [`StorageError::Duplicate`] when the username is already taken.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        wallet_address: &str,
    ) -> Result<user::Model, StorageError> {
        if self.find_by_username(username).await?.is_some() {
            return Err(StorageError::Duplicate {
                entity: "user",
                field: "username",
                value: username.to_owned(),
            });
        }

        let row = user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            wallet_address: Set(wallet_address.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::debug!(user_id = row.id, username, "user created");
        Ok(row)
    }

    /// Looks up an account by ID.
    pub async fn get(&self, id: i64) -> Result<user::Model, StorageError> {
        User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "user",
                id: id.to_string(),
            })
    }

    /// Looks up an account by login name.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, StorageError> {
        Ok(User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let db = test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo
            .create("alice", "hash", "0x00000000000000000000000000000000000000aa")
            .await
            .unwrap();

        let by_id = repo.get(created.id).await.unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let db = test_db().await;
        let repo = UserRepository::new(&db);

        repo.create("bob", "hash", "0x00000000000000000000000000000000000000bb")
            .await
            .unwrap();

        let err = repo
            .create("bob", "other", "0x00000000000000000000000000000000000000cc")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { field: "username", .. }));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let db = test_db().await;
        let err = UserRepository::new(&db).get(42).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
