//! Department service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateDepartment, Department, UpdateDepartment};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn create_department(&self, input: CreateDepartment) -> AppResult<Department>;

    async fn get_department(&self, id: Uuid) -> AppResult<Department>;

    async fn list_departments(&self, params: PaginationParams) -> AppResult<Paginated<Department>>;

    async fn update_department(&self, id: Uuid, input: UpdateDepartment) -> AppResult<Department>;

    async fn delete_department(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn create_department(&self, input: CreateDepartment) -> AppResult<Department> {
        self.uow.departments().create(input).await
    }

    async fn get_department(&self, id: Uuid) -> AppResult<Department> {
        self.uow.departments().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_departments(&self, params: PaginationParams) -> AppResult<Paginated<Department>> {
        let (data, total) = self.uow.departments().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_department(&self, id: Uuid, input: UpdateDepartment) -> AppResult<Department> {
        self.uow.departments().update(id, input).await
    }

    async fn delete_department(&self, id: Uuid) -> AppResult<()> {
        self.uow.departments().delete(id).await
    }
}
