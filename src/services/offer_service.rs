//! Offer service - supplier offers on a quote and their priced lines.
//!
//! Lines are keyed by `(offer, quote item)`. Adding lines never fails on a
//! repeated quote item: the first line of the batch wins and lines already
//! stored for the offer are left untouched.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    dedup_lines_by_item, AddOfferLines, CreateOffer, LinesAdded, Offer, OfferDetail, OfferLine,
    UpdateOffer, UpdateOfferLine,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait OfferService: Send + Sync {
    async fn create_offer(&self, input: CreateOffer) -> AppResult<Offer>;

    /// Offer with all of its lines
    async fn get_offer(&self, id: Uuid) -> AppResult<OfferDetail>;

    async fn list_offers(&self, params: PaginationParams) -> AppResult<Paginated<Offer>>;

    /// Every offer submitted for a quote, each with its lines
    async fn list_by_quote(&self, quote_id: Uuid) -> AppResult<Vec<OfferDetail>>;

    async fn update_offer(&self, id: Uuid, input: UpdateOffer) -> AppResult<Offer>;

    async fn delete_offer(&self, id: Uuid) -> AppResult<()>;

    /// Bulk insert lines, skipping quote items that already have a line.
    async fn add_lines(&self, offer_id: Uuid, input: AddOfferLines) -> AppResult<LinesAdded>;

    async fn update_line(&self, line_id: Uuid, input: UpdateOfferLine) -> AppResult<OfferLine>;

    async fn delete_line(&self, line_id: Uuid) -> AppResult<()>;
}

pub struct OfferManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OfferManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OfferService for OfferManager<U> {
    async fn create_offer(&self, input: CreateOffer) -> AppResult<Offer> {
        let offer = self.uow.offers().create(input).await?;
        tracing::info!(
            offer_id = %offer.id,
            quote_id = %offer.quote_id,
            supplier_id = %offer.supplier_id,
            "Offer created"
        );
        Ok(offer)
    }

    async fn get_offer(&self, id: Uuid) -> AppResult<OfferDetail> {
        let offers = self.uow.offers();
        let (offer, lines) = parallel::join2(offers.find_by_id(id), offers.lines_for(vec![id])).await?;

        Ok(OfferDetail {
            offer: offer.ok_or_not_found()?,
            lines,
        })
    }

    async fn list_offers(&self, params: PaginationParams) -> AppResult<Paginated<Offer>> {
        let (data, total) = self.uow.offers().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn list_by_quote(&self, quote_id: Uuid) -> AppResult<Vec<OfferDetail>> {
        let offers_repo = self.uow.offers();
        let offers = offers_repo.list_by_quote(quote_id).await?;
        if offers.is_empty() {
            return Ok(Vec::new());
        }

        let ids = offers.iter().map(|offer| offer.id).collect();
        let lines = offers_repo.lines_for(ids).await?;
        Ok(OfferDetail::group(offers, lines))
    }

    async fn update_offer(&self, id: Uuid, input: UpdateOffer) -> AppResult<Offer> {
        self.uow.offers().update(id, input).await
    }

    async fn delete_offer(&self, id: Uuid) -> AppResult<()> {
        self.uow.offers().delete(id).await
    }

    async fn add_lines(&self, offer_id: Uuid, input: AddOfferLines) -> AppResult<LinesAdded> {
        if input.lines.is_empty() {
            return Err(AppError::validation("lines: at least one line is required"));
        }

        let offers = self.uow.offers();
        offers.find_by_id(offer_id).await?.ok_or_not_found()?;

        let requested = input.lines.len();
        let lines = dedup_lines_by_item(input.lines);
        let inserted = offers.insert_lines(offer_id, lines).await?;

        let added = LinesAdded::new(requested, inserted);
        tracing::info!(
            offer_id = %offer_id,
            count = added.count,
            skipped = added.skipped,
            "Offer lines added"
        );
        Ok(added)
    }

    async fn update_line(&self, line_id: Uuid, input: UpdateOfferLine) -> AppResult<OfferLine> {
        self.uow.offers().update_line(line_id, input).await
    }

    async fn delete_line(&self, line_id: Uuid) -> AppResult<()> {
        self.uow.offers().delete_line(line_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateOfferLine;
    use crate::infra::{MockOfferRepository, MockUnitOfWork, OfferRepository};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn service_with(offers: MockOfferRepository) -> OfferManager<MockUnitOfWork> {
        let offers: Arc<dyn OfferRepository> = Arc::new(offers);
        let mut uow = MockUnitOfWork::new();
        uow.expect_offers().returning(move || offers.clone());
        OfferManager::new(Arc::new(uow))
    }

    fn offer(id: Uuid) -> Offer {
        let now = Utc::now();
        Offer {
            id,
            quote_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            currency: "EUR".to_string(),
            valid_until: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn line(pr_item_id: Uuid, price: i64) -> CreateOfferLine {
        CreateOfferLine {
            pr_item_id,
            unit_price: Decimal::new(price, 2),
            delivery_days: Some(5),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_add_lines_dedups_batch_before_insert() {
        let offer_id = Uuid::new_v4();
        let item = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut offers = MockOfferRepository::new();
        offers
            .expect_find_by_id()
            .with(eq(offer_id))
            .returning(|id| Ok(Some(offer(id))));
        offers
            .expect_insert_lines()
            .withf(move |id, lines| {
                *id == offer_id
                    && lines.len() == 2
                    && lines[0].pr_item_id == item
                    && lines[0].unit_price == Decimal::new(1000, 2)
                    && lines[1].pr_item_id == other
            })
            .times(1)
            .returning(|_, lines| Ok(lines.len() as u64));

        let added = service_with(offers)
            .add_lines(
                offer_id,
                AddOfferLines {
                    lines: vec![line(item, 1000), line(item, 900), line(other, 500)],
                },
            )
            .await
            .unwrap();

        assert_eq!(added, LinesAdded { count: 2, skipped: 1 });
    }

    #[tokio::test]
    async fn test_add_lines_counts_stored_duplicates_as_skipped() {
        let offer_id = Uuid::new_v4();

        let mut offers = MockOfferRepository::new();
        offers.expect_find_by_id().returning(|id| Ok(Some(offer(id))));
        // Store already holds a line for every item
        offers.expect_insert_lines().returning(|_, _| Ok(0));

        let added = service_with(offers)
            .add_lines(
                offer_id,
                AddOfferLines {
                    lines: vec![line(Uuid::new_v4(), 100), line(Uuid::new_v4(), 200)],
                },
            )
            .await
            .unwrap();

        assert_eq!(added, LinesAdded { count: 0, skipped: 2 });
    }

    #[tokio::test]
    async fn test_add_lines_to_missing_offer_is_not_found() {
        let mut offers = MockOfferRepository::new();
        offers.expect_find_by_id().returning(|_| Ok(None));
        offers.expect_insert_lines().never();

        let result = service_with(offers)
            .add_lines(
                Uuid::new_v4(),
                AddOfferLines {
                    lines: vec![line(Uuid::new_v4(), 100)],
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_lines_rejects_empty_batch() {
        let mut offers = MockOfferRepository::new();
        offers.expect_find_by_id().never();
        offers.expect_insert_lines().never();

        let result = service_with(offers)
            .add_lines(Uuid::new_v4(), AddOfferLines { lines: vec![] })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_by_quote_groups_lines() {
        let quote_id = Uuid::new_v4();
        let first = offer(Uuid::new_v4());
        let second = offer(Uuid::new_v4());
        let first_id = first.id;
        let now = Utc::now();
        let stored_line = OfferLine {
            id: Uuid::new_v4(),
            offer_id: first_id,
            pr_item_id: Uuid::new_v4(),
            unit_price: Decimal::ONE,
            delivery_days: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let mut offers = MockOfferRepository::new();
        let listed = vec![first, second];
        offers
            .expect_list_by_quote()
            .with(eq(quote_id))
            .returning(move |_| Ok(listed.clone()));
        offers
            .expect_lines_for()
            .returning(move |_| Ok(vec![stored_line.clone()]));

        let details = service_with(offers).list_by_quote(quote_id).await.unwrap();

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].offer.id, first_id);
        assert_eq!(details[0].lines.len(), 1);
        assert!(details[1].lines.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_quote_without_offers_skips_line_lookup() {
        let mut offers = MockOfferRepository::new();
        offers.expect_list_by_quote().returning(|_| Ok(vec![]));
        offers.expect_lines_for().never();

        let details = service_with(offers).list_by_quote(Uuid::new_v4()).await.unwrap();
        assert!(details.is_empty());
    }
}
