// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market sell order persistence and the status state machine.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, sea_query::Expr,
};
use shared_types::order::{Currency, OrderStatus};

use crate::{
    entity::{
        equip_item,
        sell_order::{self, Entity as SellOrder},
    },
    error::StorageError,
};

/// Fields for a new listing.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Player listing the item.
    pub seller_id: i64,
    /// Equipment item being sold.
    pub equip_item_id: i64,
    /// Asking price.
    pub price: i64,
    /// Listing currency.
    pub currency: Currency,
    /// Settlement signature, stored verbatim.
    pub signature: String,
    /// Settlement nonce, stored verbatim.
    pub nonce: i64,
    /// Unix-seconds expiry deadline.
    pub deadline: i64,
}

/// Optional filters for listing queries.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
    /// Only orders listed by this player.
    pub seller_id: Option<i64>,
    /// Only orders in this currency.
    pub currency: Option<Currency>,
    /// Only orders selling items stamped from this catalog entry.
    pub item_def_id: Option<i64>,
}

/// One page of orders plus pagination metadata.
#[derive(Debug, Clone)]
pub struct PaginatedOrders {
    /// Orders for this page, newest first.
    pub orders: Vec<sell_order::Model>,
    /// Total number of matching orders across all pages.
    pub total: u64,
    /// Zero-indexed page number.
    pub page: u64,
    /// Page size the query was run with.
    pub per_page: u64,
}

/// Data access for sell orders.
#[derive(Debug, Clone, Copy)]
pub struct OrderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderRepository<'a> {
    /// Creates a repository borrowing the shared connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new listing in `open` status.
    pub async fn create(&self, order: NewOrder) -> Result<sell_order::Model, StorageError> {
        let now = Utc::now();
        let row = sell_order::ActiveModel {
            seller_id: Set(order.seller_id),
            equip_item_id: Set(order.equip_item_id),
            price: Set(order.price),
            currency: Set(order.currency.to_string()),
            status: Set(OrderStatus::Open.to_string()),
            signature: Set(order.signature),
            nonce: Set(order.nonce),
            deadline: Set(order.deadline),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::debug!(order_id = row.id, seller_id = row.seller_id, "order listed");
        Ok(row)
    }

    /// Fetches one order.
    pub async fn get(&self, id: i64) -> Result<sell_order::Model, StorageError> {
        SellOrder::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "sell order",
                id: id.to_string(),
            })
    }

    /// Lists one page of orders matching the filter, newest first.
    pub async fn list(
        &self,
        filter: OrderFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedOrders, StorageError> {
        let mut query = SellOrder::find().order_by_desc(sell_order::Column::CreatedAt);

        if let Some(status) = filter.status {
            query = query.filter(sell_order::Column::Status.eq(status.to_string()));
        }
        if let Some(seller_id) = filter.seller_id {
            query = query.filter(sell_order::Column::SellerId.eq(seller_id));
        }
        if let Some(currency) = filter.currency {
            query = query.filter(sell_order::Column::Currency.eq(currency.to_string()));
        }
        if let Some(item_def_id) = filter.item_def_id {
            query = query
                .join(JoinType::InnerJoin, sell_order::Relation::EquipItem.def())
                .filter(equip_item::Column::ItemDefId.eq(item_def_id));
        }

        let paginator = query.paginate(self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page).await?;

        Ok(PaginatedOrders {
            orders,
            total,
            page,
            per_page: per_page.max(1),
        })
    }

    /// Moves an order to a new status.
    ///
    /// Only `open` orders move; every other transition is rejected with
    /// [`StorageError::InvalidTransition`], so a filled order can never be
    /// cancelled after the fact.
    pub async fn set_status(
        &self,
        id: i64,
        next: OrderStatus,
    ) -> Result<sell_order::Model, StorageError> {
        let existing = self.get(id).await?;
        let current = order_status(&existing)?;

        if !current.can_transition_to(next) {
            return Err(StorageError::InvalidTransition {
                order_id: id,
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        let mut active: sell_order::ActiveModel = existing.into();
        active.status = Set(next.to_string());
        active.updated_at = Set(Utc::now());

        Ok(active.update(self.db).await?)
    }

    /// Expires every open order whose deadline has passed.
    ///
    /// Returns the number of orders expired. Run before serving market
    /// queries so clients never see a listing that can no longer settle.
    pub async fn expire_due(&self, now_unix: i64) -> Result<u64, StorageError> {
        let result = SellOrder::update_many()
            .col_expr(
                sell_order::Column::Status,
                Expr::value(OrderStatus::Expired.to_string()),
            )
            .col_expr(sell_order::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(sell_order::Column::Status.eq(OrderStatus::Open.to_string()))
            .filter(sell_order::Column::Deadline.lt(now_unix))
            .exec(self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(expired = result.rows_affected, "expired overdue orders");
        }
        Ok(result.rows_affected)
    }
}

/// Parses the stored status column into its domain enum.
pub fn order_status(model: &sell_order::Model) -> Result<OrderStatus, StorageError> {
    model
        .status
        .parse()
        .map_err(|_| StorageError::CorruptColumn {
            column: "status",
            id: model.id,
            value: model.status.clone(),
        })
}

/// Parses the stored currency column into its domain enum.
pub fn order_currency(model: &sell_order::Model) -> Result<Currency, StorageError> {
    model
        .currency
        .parse()
        .map_err(|_| StorageError::CorruptColumn {
            column: "currency",
            id: model.id,
            value: model.currency.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        EquipItemRepository,
        test_support::{seed_item_def, seed_user, test_db},
    };
    use serde_json::json;

    async fn seed_order(db: &sea_orm::DatabaseConnection, deadline: i64) -> sell_order::Model {
        let user = seed_user(db, "seller").await;
        let def = seed_item_def(db).await;
        let item = EquipItemRepository::new(db)
            .create(user.id, def.id, 0, json!({}))
            .await
            .unwrap();

        OrderRepository::new(db)
            .create(NewOrder {
                seller_id: user.id,
                equip_item_id: item.id,
                price: 1000,
                currency: Currency::Gold,
                signature: "0xsig".to_owned(),
                nonce: 1,
                deadline,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn new_orders_open() {
        let db = test_db().await;
        let order = seed_order(&db, i64::MAX).await;

        assert_eq!(order_status(&order).unwrap(), OrderStatus::Open);
        assert_eq!(order_currency(&order).unwrap(), Currency::Gold);
    }

    #[tokio::test]
    async fn open_order_can_fill_but_not_reopen() {
        let db = test_db().await;
        let order = seed_order(&db, i64::MAX).await;
        let repo = OrderRepository::new(&db);

        let filled = repo.set_status(order.id, OrderStatus::Filled).await.unwrap();
        assert_eq!(order_status(&filled).unwrap(), OrderStatus::Filled);

        let err = repo
            .set_status(order.id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_status_and_seller() {
        let db = test_db().await;
        let order = seed_order(&db, i64::MAX).await;
        let repo = OrderRepository::new(&db);

        let open = repo
            .list(
                OrderFilter {
                    status: Some(OrderStatus::Open),
                    seller_id: Some(order.seller_id),
                    ..Default::default()
                },
                0,
                20,
            )
            .await
            .unwrap();
        assert_eq!(open.total, 1);
        assert_eq!(open.orders.len(), 1);

        repo.set_status(order.id, OrderStatus::Cancelled).await.unwrap();

        let open = repo
            .list(
                OrderFilter {
                    status: Some(OrderStatus::Open),
                    ..Default::default()
                },
                0,
                20,
            )
            .await
            .unwrap();
        assert_eq!(open.total, 0);
        assert!(open.orders.is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_item_def() {
        let db = test_db().await;
        let order = seed_order(&db, i64::MAX).await;
        let repo = OrderRepository::new(&db);

        let item = crate::entity::prelude::EquipItem::find_by_id(order.equip_item_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        let matched = repo
            .list(
                OrderFilter {
                    item_def_id: Some(item.item_def_id),
                    ..Default::default()
                },
                0,
                20,
            )
            .await
            .unwrap();
        assert_eq!(matched.total, 1);

        let unmatched = repo
            .list(
                OrderFilter {
                    item_def_id: Some(item.item_def_id + 1),
                    ..Default::default()
                },
                0,
                20,
            )
            .await
            .unwrap();
        assert_eq!(unmatched.total, 0);
    }

    #[tokio::test]
    async fn overdue_orders_expire_in_bulk() {
        let db = test_db().await;
        let order = seed_order(&db, 1000).await;
        let repo = OrderRepository::new(&db);

        let expired = repo.expire_due(2000).await.unwrap();
        assert_eq!(expired, 1);

        let current = repo.get(order.id).await.unwrap();
        assert_eq!(order_status(&current).unwrap(), OrderStatus::Expired);

        // Expired is terminal; running again is a no-op.
        assert_eq!(repo.expire_due(3000).await.unwrap(), 0);
    }
}
