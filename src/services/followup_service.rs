//! Followup service - notes and reminders on purchase orders.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateFollowup, Followup, FollowupFilter, UpdateFollowup};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait FollowupService: Send + Sync {
    /// Record a followup; `author_id` is the authenticated user
    async fn create_followup(&self, author_id: Uuid, input: CreateFollowup) -> AppResult<Followup>;

    async fn get_followup(&self, id: Uuid) -> AppResult<Followup>;

    async fn list_followups(
        &self,
        params: PaginationParams,
        filter: FollowupFilter,
    ) -> AppResult<Paginated<Followup>>;

    async fn update_followup(&self, id: Uuid, input: UpdateFollowup) -> AppResult<Followup>;

    async fn delete_followup(&self, id: Uuid) -> AppResult<()>;
}

pub struct FollowupManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FollowupManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FollowupService for FollowupManager<U> {
    async fn create_followup(&self, author_id: Uuid, input: CreateFollowup) -> AppResult<Followup> {
        self.uow.followups().create(Some(author_id), input).await
    }

    async fn get_followup(&self, id: Uuid) -> AppResult<Followup> {
        self.uow.followups().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_followups(
        &self,
        params: PaginationParams,
        filter: FollowupFilter,
    ) -> AppResult<Paginated<Followup>> {
        let (data, total) = self
            .uow
            .followups()
            .list(&params, filter.purchase_order_id)
            .await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_followup(&self, id: Uuid, input: UpdateFollowup) -> AppResult<Followup> {
        self.uow.followups().update(id, input).await
    }

    async fn delete_followup(&self, id: Uuid) -> AppResult<()> {
        self.uow.followups().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{FollowupRepository, MockFollowupRepository, MockUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_list_passes_purchase_order_filter() {
        let order_id = Uuid::new_v4();

        let mut followups = MockFollowupRepository::new();
        followups
            .expect_list()
            .withf(move |_, filter| *filter == Some(order_id))
            .returning(|_, _| Ok((vec![], 0)));
        let followups: Arc<dyn FollowupRepository> = Arc::new(followups);

        let mut uow = MockUnitOfWork::new();
        uow.expect_followups().returning(move || followups.clone());

        let page = FollowupManager::new(Arc::new(uow))
            .list_followups(
                PaginationParams::default(),
                FollowupFilter {
                    purchase_order_id: Some(order_id),
                },
            )
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 0);
    }

    #[tokio::test]
    async fn test_create_records_author() {
        let author = Uuid::new_v4();

        let mut followups = MockFollowupRepository::new();
        followups
            .expect_create()
            .with(eq(Some(author)), mockall::predicate::always())
            .returning(|author_id, input| {
                let now = chrono::Utc::now();
                Ok(Followup {
                    id: Uuid::new_v4(),
                    purchase_order_id: input.purchase_order_id,
                    author_id,
                    note: input.note,
                    due_date: input.due_date,
                    completed: false,
                    created_at: now,
                    updated_at: now,
                })
            });
        let followups: Arc<dyn FollowupRepository> = Arc::new(followups);

        let mut uow = MockUnitOfWork::new();
        uow.expect_followups().returning(move || followups.clone());

        let created = FollowupManager::new(Arc::new(uow))
            .create_followup(
                author,
                CreateFollowup {
                    purchase_order_id: Uuid::new_v4(),
                    note: "Call supplier".to_string(),
                    due_date: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.author_id, Some(author));
    }
}
