//! Quote service - purchase requests and their requested items.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{AddQuoteItems, CreateQuote, Quote, QuoteDetail, QuoteItem, UpdateQuote};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Create a quote with its items; `requester_id` is the caller
    async fn create_quote(&self, requester_id: Uuid, input: CreateQuote) -> AppResult<QuoteDetail>;

    /// Quote with its requested items
    async fn get_quote(&self, id: Uuid) -> AppResult<QuoteDetail>;

    async fn list_quotes(&self, params: PaginationParams) -> AppResult<Paginated<Quote>>;

    async fn update_quote(&self, id: Uuid, input: UpdateQuote) -> AppResult<Quote>;

    async fn delete_quote(&self, id: Uuid) -> AppResult<()>;

    /// Append items to an existing quote
    async fn add_items(&self, quote_id: Uuid, input: AddQuoteItems) -> AppResult<Vec<QuoteItem>>;
}

pub struct QuoteManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> QuoteManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> QuoteService for QuoteManager<U> {
    async fn create_quote(&self, requester_id: Uuid, input: CreateQuote) -> AppResult<QuoteDetail> {
        let detail = self.uow.quotes().create(requester_id, input).await?;
        tracing::info!(quote_id = %detail.quote.id, items = detail.items.len(), "Quote created");
        Ok(detail)
    }

    async fn get_quote(&self, id: Uuid) -> AppResult<QuoteDetail> {
        let quotes = self.uow.quotes();
        let (quote, items) = parallel::join2(quotes.find_by_id(id), quotes.items(id)).await?;

        Ok(QuoteDetail {
            quote: quote.ok_or_not_found()?,
            items,
        })
    }

    async fn list_quotes(&self, params: PaginationParams) -> AppResult<Paginated<Quote>> {
        let (data, total) = self.uow.quotes().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_quote(&self, id: Uuid, input: UpdateQuote) -> AppResult<Quote> {
        self.uow.quotes().update(id, input).await
    }

    async fn delete_quote(&self, id: Uuid) -> AppResult<()> {
        self.uow.quotes().delete(id).await
    }

    async fn add_items(&self, quote_id: Uuid, input: AddQuoteItems) -> AppResult<Vec<QuoteItem>> {
        let quotes = self.uow.quotes();
        quotes.find_by_id(quote_id).await?.ok_or_not_found()?;
        quotes.add_items(quote_id, input.items).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateQuoteItem;
    use crate::errors::AppError;
    use crate::infra::{MockQuoteRepository, MockUnitOfWork, QuoteRepository};
    use rust_decimal::Decimal;

    fn service_with(quotes: MockQuoteRepository) -> QuoteManager<MockUnitOfWork> {
        let quotes: Arc<dyn QuoteRepository> = Arc::new(quotes);
        let mut uow = MockUnitOfWork::new();
        uow.expect_quotes().returning(move || quotes.clone());
        QuoteManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_get_missing_quote_is_not_found() {
        let mut quotes = MockQuoteRepository::new();
        quotes.expect_find_by_id().returning(|_| Ok(None));
        quotes.expect_items().returning(|_| Ok(vec![]));

        let result = service_with(quotes).get_quote(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_items_to_missing_quote_writes_nothing() {
        let mut quotes = MockQuoteRepository::new();
        quotes.expect_find_by_id().returning(|_| Ok(None));
        quotes.expect_add_items().never();

        let result = service_with(quotes)
            .add_items(
                Uuid::new_v4(),
                AddQuoteItems {
                    items: vec![CreateQuoteItem {
                        product_id: Uuid::new_v4(),
                        quantity: Decimal::ONE,
                        notes: None,
                    }],
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
