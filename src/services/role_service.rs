//! Role service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateRole, Role, UpdateRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait RoleService: Send + Sync {
    async fn create_role(&self, input: CreateRole) -> AppResult<Role>;

    async fn get_role(&self, id: Uuid) -> AppResult<Role>;

    /// Role by unique name; `None` when absent
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    async fn list_roles(&self, params: PaginationParams) -> AppResult<Paginated<Role>>;

    async fn update_role(&self, id: Uuid, input: UpdateRole) -> AppResult<Role>;

    async fn delete_role(&self, id: Uuid) -> AppResult<()>;
}

pub struct RoleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RoleService for RoleManager<U> {
    async fn create_role(&self, input: CreateRole) -> AppResult<Role> {
        self.uow.roles().create(input).await
    }

    async fn get_role(&self, id: Uuid) -> AppResult<Role> {
        self.uow.roles().find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.uow.roles().find_by_name(name).await
    }

    async fn list_roles(&self, params: PaginationParams) -> AppResult<Paginated<Role>> {
        let (data, total) = self.uow.roles().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_role(&self, id: Uuid, input: UpdateRole) -> AppResult<Role> {
        self.uow.roles().update(id, input).await
    }

    async fn delete_role(&self, id: Uuid) -> AppResult<()> {
        self.uow.roles().delete(id).await
    }
}
