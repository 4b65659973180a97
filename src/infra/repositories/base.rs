//! Read and delete helpers shared by the sea-orm stores.
//!
//! Stores implement these traits by exposing their connection; the default
//! methods then provide paging, counting and delete-with-404.

use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, PrimaryKeyTrait, Select,
};
use std::fmt::Debug;

use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Read operations over one entity
#[async_trait]
pub trait ReadRepository<E, M>: Send + Sync
where
    E: EntityTrait<Model = M>,
    M: Send + Sync + FromQueryResult,
{
    fn db(&self) -> &DatabaseConnection;

    /// Base query used for listings; stores override it to set ordering
    fn listing(&self) -> Select<E> {
        E::find()
    }

    async fn find_model(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<Option<M>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id)
            .one(self.db())
            .await
            .map_err(Into::into)
    }

    /// One page of `listing()` plus the total row count
    async fn find_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<M>, u64)> {
        let paginator = self.listing().paginate(self.db(), params.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(params.page().saturating_sub(1)).await?;
        Ok((data, total))
    }

    async fn count_all(&self) -> AppResult<u64> {
        E::find()
            .count(self.db())
            .await
            .map_err(Into::into)
    }
}

/// Delete by primary key
#[async_trait]
pub trait DeleteRepository<E>: Send + Sync
where
    E: EntityTrait,
{
    fn db(&self) -> &DatabaseConnection;

    /// Delete a row; `NotFound` when nothing matched.
    async fn delete_by_id(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<()>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Debug,
    {
        let result = E::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
