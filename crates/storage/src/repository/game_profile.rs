// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Game profile persistence with optimistic locking.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};

use crate::{
    entity::game_profile::{self, Entity as GameProfile},
    error::StorageError,
};

/// Replacement state for a profile write.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// Character level.
    pub level: i32,
    /// Accumulated experience points.
    pub experience: i64,
    /// Soft-currency balance.
    pub gold: i64,
    /// Equipped item layout.
    pub equipped: serde_json::Value,
    /// Unlocked skills.
    pub skills: serde_json::Value,
}

/// Data access for game profiles.
#[derive(Debug, Clone, Copy)]
pub struct ProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the starting profile for a freshly registered player.
    pub async fn create_default(&self, user_id: i64) -> Result<game_profile::Model, StorageError> {
        let row = game_profile::ActiveModel {
            user_id: Set(user_id),
            level: Set(1),
            experience: Set(0),
            gold: Set(0),
            equipped: Set(serde_json::json!({})),
            skills: Set(serde_json::json!([])),
            version: Set(1),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(row)
    }

    /// Fetches a player's profile.
    pub async fn get_by_user(&self, user_id: i64) -> Result<game_profile::Model, StorageError> {
        GameProfile::find()
            .filter(game_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "game profile",
                id: user_id.to_string(),
            })
    }

    /// Replaces a profile's state, guarded by the version counter.
    ///
    /// The write only lands when the stored version still equals
    /// `expected_version`; the stored counter is bumped in the same
    /// statement. A stale version yields [`StorageError::VersionConflict`]
    /// so the client can re-fetch and retry.
    pub async fn update(
        &self,
        user_id: i64,
        expected_version: i32,
        update: ProfileUpdate,
    ) -> Result<game_profile::Model, StorageError> {
        let result = GameProfile::update_many()
            .col_expr(game_profile::Column::Level, Expr::value(update.level))
            .col_expr(game_profile::Column::Experience, Expr::value(update.experience))
            .col_expr(game_profile::Column::Gold, Expr::value(update.gold))
            .col_expr(game_profile::Column::Equipped, Expr::value(update.equipped))
            .col_expr(game_profile::Column::Skills, Expr::value(update.skills))
            .col_expr(
                game_profile::Column::Version,
                Expr::value(expected_version + 1),
            )
            .filter(game_profile::Column::UserId.eq(user_id))
            .filter(game_profile::Column::Version.eq(expected_version))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            // Distinguish a stale version from a missing profile.
            let current = self.get_by_user(user_id).await?;
            tracing::debug!(
                user_id,
                expected_version,
                current_version = current.version,
                "profile write lost the version race"
            );
            return Err(StorageError::VersionConflict {
                expected: expected_version,
            });
        }

        self.get_by_user(user_id).await
    }
}
