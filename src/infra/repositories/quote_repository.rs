//! Quote repository. Quotes and their requested items are written together.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::quote::{self, ActiveModel, Entity as QuoteEntity};
use super::entities::quote_item::{self, Entity as QuoteItemEntity};
use crate::domain::{CreateQuote, CreateQuoteItem, Quote, QuoteDetail, QuoteItem, UpdateQuote};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Insert the quote and its items in one transaction
    async fn create(&self, requester_id: Uuid, input: CreateQuote) -> AppResult<QuoteDetail>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quote>>;

    /// Requested items of a quote
    async fn items(&self, quote_id: Uuid) -> AppResult<Vec<QuoteItem>>;

    /// Append items to an existing quote in one transaction
    async fn add_items(&self, quote_id: Uuid, items: Vec<CreateQuoteItem>) -> AppResult<Vec<QuoteItem>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Quote>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateQuote) -> AppResult<Quote>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct QuoteStore {
    db: DatabaseConnection,
}

impl QuoteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Insert items one by one so callers get them back in request order.
async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    quote_id: Uuid,
    items: Vec<CreateQuoteItem>,
) -> AppResult<Vec<QuoteItem>> {
    let mut stored = Vec::with_capacity(items.len());
    for item in items {
        let model = quote_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            quote_id: Set(quote_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            notes: Set(item.notes),
        }
        .insert(conn)
        .await?;
        stored.push(QuoteItem::from(model));
    }
    Ok(stored)
}

impl ReadRepository<QuoteEntity, quote::Model> for QuoteStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<QuoteEntity> {
        QuoteEntity::find().order_by_desc(quote::Column::CreatedAt)
    }
}

impl DeleteRepository<QuoteEntity> for QuoteStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl QuoteRepository for QuoteStore {
    async fn create(&self, requester_id: Uuid, input: CreateQuote) -> AppResult<QuoteDetail> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            requester_id: Set(requester_id),
            department_id: Set(input.department_id),
            status: Set(crate::domain::QuoteStatus::Draft.as_str().to_string()),
            due_date: Set(input.due_date),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let items = insert_items(&txn, model.id, input.items).await?;
        txn.commit().await?;

        Ok(QuoteDetail {
            quote: Quote::from(model),
            items,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quote>> {
        Ok(self.find_model(id).await?.map(Quote::from))
    }

    async fn items(&self, quote_id: Uuid) -> AppResult<Vec<QuoteItem>> {
        let models = QuoteItemEntity::find()
            .filter(quote_item::Column::QuoteId.eq(quote_id))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(QuoteItem::from).collect())
    }

    async fn add_items(&self, quote_id: Uuid, items: Vec<CreateQuoteItem>) -> AppResult<Vec<QuoteItem>> {
        let txn = self.db.begin().await?;
        let stored = insert_items(&txn, quote_id, items).await?;
        txn.commit().await?;
        Ok(stored)
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Quote>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Quote::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateQuote) -> AppResult<Quote> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(status) = input.status {
            active.status = Set(status.as_str().to_string());
        }
        if input.department_id.is_some() {
            active.department_id = Set(input.department_id);
        }
        if input.due_date.is_some() {
            active.due_date = Set(input.due_date);
        }
        if input.notes.is_some() {
            active.notes = Set(input.notes);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Quote::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}
