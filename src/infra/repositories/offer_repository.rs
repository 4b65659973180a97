//! Offer repository: offers and their priced lines.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::offer::{self, ActiveModel, Entity as OfferEntity};
use super::entities::offer_line::{self, Entity as OfferLineEntity};
use crate::domain::{CreateOffer, CreateOfferLine, Offer, OfferLine, UpdateOffer, UpdateOfferLine};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create(&self, input: CreateOffer) -> AppResult<Offer>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Offer>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Offer>, u64)>;

    /// All offers submitted for a quote, oldest first
    async fn list_by_quote(&self, quote_id: Uuid) -> AppResult<Vec<Offer>>;

    /// Lines belonging to any of the given offers
    async fn lines_for(&self, offer_ids: Vec<Uuid>) -> AppResult<Vec<OfferLine>>;

    async fn update(&self, id: Uuid, input: UpdateOffer) -> AppResult<Offer>;

    /// Delete an offer; its lines go with it
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Bulk insert lines, skipping any whose `(offer, quote item)` pair is
    /// already stored. Returns the number of rows inserted.
    async fn insert_lines(&self, offer_id: Uuid, lines: Vec<CreateOfferLine>) -> AppResult<u64>;

    async fn update_line(&self, id: Uuid, input: UpdateOfferLine) -> AppResult<OfferLine>;

    async fn delete_line(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct OfferStore {
    db: DatabaseConnection,
}

impl OfferStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<OfferEntity, offer::Model> for OfferStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<OfferEntity> {
        OfferEntity::find().order_by_desc(offer::Column::CreatedAt)
    }
}

impl DeleteRepository<OfferEntity> for OfferStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl DeleteRepository<OfferLineEntity> for OfferStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl OfferRepository for OfferStore {
    async fn create(&self, input: CreateOffer) -> AppResult<Offer> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            quote_id: Set(input.quote_id),
            supplier_id: Set(input.supplier_id),
            currency: Set(input.currency),
            valid_until: Set(input.valid_until),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Offer::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Offer>> {
        Ok(self.find_model(id).await?.map(Offer::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Offer>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Offer::from).collect(), total))
    }

    async fn list_by_quote(&self, quote_id: Uuid) -> AppResult<Vec<Offer>> {
        let models = OfferEntity::find()
            .filter(offer::Column::QuoteId.eq(quote_id))
            .order_by_asc(offer::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Offer::from).collect())
    }

    async fn lines_for(&self, offer_ids: Vec<Uuid>) -> AppResult<Vec<OfferLine>> {
        if offer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = OfferLineEntity::find()
            .filter(offer_line::Column::OfferId.is_in(offer_ids))
            .order_by_asc(offer_line::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(OfferLine::from).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateOffer) -> AppResult<Offer> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(currency) = input.currency {
            active.currency = Set(currency);
        }
        if input.valid_until.is_some() {
            active.valid_until = Set(input.valid_until);
        }
        if input.notes.is_some() {
            active.notes = Set(input.notes);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Offer::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        DeleteRepository::<OfferEntity>::delete_by_id(self, id).await
    }

    async fn insert_lines(&self, offer_id: Uuid, lines: Vec<CreateOfferLine>) -> AppResult<u64> {
        if lines.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now();
        let rows = lines.into_iter().map(|line| offer_line::ActiveModel {
            id: Set(Uuid::new_v4()),
            offer_id: Set(offer_id),
            pr_item_id: Set(line.pr_item_id),
            unit_price: Set(line.unit_price),
            delivery_days: Set(line.delivery_days),
            notes: Set(line.notes),
            created_at: Set(now),
            updated_at: Set(now),
        });

        let inserted = OfferLineEntity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([offer_line::Column::OfferId, offer_line::Column::PrItemId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted)
    }

    async fn update_line(&self, id: Uuid, input: UpdateOfferLine) -> AppResult<OfferLine> {
        let mut active: offer_line::ActiveModel = OfferLineEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?
            .into();

        if let Some(unit_price) = input.unit_price {
            active.unit_price = Set(unit_price);
        }
        if input.delivery_days.is_some() {
            active.delivery_days = Set(input.delivery_days);
        }
        if input.notes.is_some() {
            active.notes = Set(input.notes);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(OfferLine::from(active.update(&self.db).await?))
    }

    async fn delete_line(&self, id: Uuid) -> AppResult<()> {
        DeleteRepository::<OfferLineEntity>::delete_by_id(self, id).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.count_all().await
    }
}
